use crate::quadtree::point::Point;

/// One of the four children of a subdivided square.
///
/// The discriminant is the index of the child in a node's children array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    UpperRight = 0,
    UpperLeft = 1,
    LowerLeft = 2,
    LowerRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::UpperLeft,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Classify `p` relative to `center`.
    ///
    /// Points on either center line go to the left and/or lower side, so a point exactly on the
    /// center is `LowerLeft` and nothing on a center line is ever `UpperRight`. Every input maps
    /// to exactly one quadrant, NaN coordinates included (they compare like `<=`).
    pub fn of(center: Point, p: Point) -> Self {
        let right = p.x > center.x;
        let up = p.y > center.y;

        match (right, up) {
            (true, true) => Quadrant::UpperRight,
            (false, true) => Quadrant::UpperLeft,
            (false, false) => Quadrant::LowerLeft,
            (true, false) => Quadrant::LowerRight,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned square region, stored by its lower-left corner and side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point,
    size: f32,
}

impl Aabb {
    /// Create the square with lower-left corner `min` and side length `size`.
    pub fn square(min: Point, size: f32) -> Self {
        Aabb { min, size }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.min.offset(self.size, self.size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn center(&self) -> Point {
        let hs = self.size * 0.5;
        self.min.offset(hs, hs)
    }

    /// Closed containment check, edges included.
    #[cfg(test)]
    pub(crate) fn contains(&self, p: Point) -> bool {
        let max = self.max();
        (self.min.x..=max.x).contains(&p.x) && (self.min.y..=max.y).contains(&p.y)
    }

    /// The quarter of this square that [`Quadrant::of`] sends points to.
    pub fn quadrant(&self, q: Quadrant) -> Aabb {
        let hs = self.size * 0.5;
        let (dx, dy) = match q {
            Quadrant::UpperRight => (hs, hs),
            Quadrant::UpperLeft => (0.0, hs),
            Quadrant::LowerLeft => (0.0, 0.0),
            Quadrant::LowerRight => (hs, 0.0),
        };

        Aabb::square(self.min.offset(dx, dy), hs)
    }

    /// Splits the square into four equal quadrants, indexed by [`Quadrant::index`].
    pub fn split(&self) -> [Aabb; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }

    /// Squared distance from `p` to the closest point of the square. Zero when `p` is inside.
    pub fn distance_sq(&self, p: Point) -> f32 {
        // min/max instead of `clamp` so a NaN coordinate can't panic
        let max = self.max();
        let dx = p.x - p.x.min(max.x).max(self.min.x);
        let dy = p.y - p.y.min(max.y).max(self.min.y);

        dx * dx + dy * dy
    }

    /// Conservative circle overlap: the closest point of the square lies within `radius`.
    pub fn touches_circle(&self, center: Point, radius: f32) -> bool {
        self.distance_sq(center) <= radius * radius
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::Aabb;
    use super::Quadrant;
    use crate::quadtree::Point;

    fn unit() -> Aabb {
        Aabb::square(Point::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn quadrant_routing() {
        let c = Point::new(0.5, 0.5);

        assert_eq!(Quadrant::of(c, Point::new(0.9, 0.9)), Quadrant::UpperRight);
        assert_eq!(Quadrant::of(c, Point::new(0.1, 0.9)), Quadrant::UpperLeft);
        assert_eq!(Quadrant::of(c, Point::new(0.1, 0.1)), Quadrant::LowerLeft);
        assert_eq!(Quadrant::of(c, Point::new(0.9, 0.1)), Quadrant::LowerRight);
    }

    #[test]
    fn quadrant_ties_never_go_upper_right() {
        let c = Point::new(0.5, 0.5);

        assert_eq!(Quadrant::of(c, c), Quadrant::LowerLeft);
        assert_eq!(Quadrant::of(c, Point::new(0.5, 0.9)), Quadrant::UpperLeft);
        assert_eq!(Quadrant::of(c, Point::new(0.9, 0.5)), Quadrant::LowerRight);
        assert_eq!(Quadrant::of(c, Point::new(f32::NAN, f32::NAN)), Quadrant::LowerLeft);
    }

    #[test]
    fn split_tiles_parent() {
        let [ur, ul, ll, lr] = unit().split();

        assert_eq!(ur, Aabb::square(Point::new(0.5, 0.5), 0.5));
        assert_eq!(ul, Aabb::square(Point::new(0.0, 0.5), 0.5));
        assert_eq!(ll, Aabb::square(Point::new(0.0, 0.0), 0.5));
        assert_eq!(lr, Aabb::square(Point::new(0.5, 0.0), 0.5));

        let area: f32 = unit().split().iter().map(|b| b.size() * b.size()).sum();
        assert_eq!(area, 1.0);
    }

    #[test]
    fn split_matches_routing() {
        let parent = unit();

        for (q, child) in Quadrant::ALL.iter().zip(parent.split()) {
            assert_eq!(Quadrant::of(parent.center(), child.center()), *q);
        }
    }

    #[test]
    fn clamp_distance() {
        let b = unit();

        assert_eq!(b.distance_sq(Point::new(0.5, 0.5)), 0.0);
        assert_eq!(b.distance_sq(Point::new(2.0, 0.5)), 1.0);
        assert_eq!(b.distance_sq(Point::new(-3.0, -4.0)), 25.0);

        assert!(b.touches_circle(Point::new(2.0, 0.5), 1.0));
        assert!(!b.touches_circle(Point::new(2.0, 0.5), 0.99));
    }

    #[test]
    fn contains_is_closed() {
        let b = unit();

        assert!(b.contains(Point::new(0.0, 1.0)));
        assert!(!b.contains(Point::new(1.01, 0.5)));
    }

    proptest! {
        #[test]
        fn quadrant_partition_is_total_and_disjoint(
            cx in -2.0f32..2.0f32,
            cy in -2.0f32..2.0f32,
            // bias toward the center lines, where ties happen
            x in prop_oneof![Just(0.0f32), -4.0f32..4.0f32],
            y in prop_oneof![Just(0.0f32), -4.0f32..4.0f32],
            on_x in any::<bool>(),
            on_y in any::<bool>(),
        ) {
            let c = Point::new(cx, cy);
            let p = Point::new(if on_x { cx } else { x }, if on_y { cy } else { y });

            let held = [
                p.x > c.x && p.y > c.y,
                p.x <= c.x && p.y > c.y,
                p.x <= c.x && p.y <= c.y,
                p.x > c.x && p.y <= c.y,
            ];

            prop_assert_eq!(held.iter().filter(|&&h| h).count(), 1);
            prop_assert!(held[Quadrant::of(c, p).index()]);
        }

        #[test]
        fn routed_points_lie_in_their_quadrant(
            x in 0.0f32..=1.0f32,
            y in 0.0f32..=1.0f32,
        ) {
            let parent = unit();
            let p = Point::new(x, y);

            prop_assert!(parent.quadrant(Quadrant::of(parent.center(), p)).contains(p));
        }
    }
}
