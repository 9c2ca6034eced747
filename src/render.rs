use crate::camera::Camera;
use crate::quadtree::Aabb;
use crate::quadtree::Point;
use crate::quadtree::SpatialQuadTree;
use crate::settings::Settings;

/// Marker side length for root nodes, as a fraction of the root size
const MARKER_ROOT: f32 = 0.2;

/// Marker side length for max-depth nodes, as a fraction of the root size
const MARKER_LEAF: f32 = 0.02;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Maps world coordinates (y up) onto camera pixels (y down).
///
/// The root square is scaled to fit the smaller camera dimension and pinned to the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Aabb,

    /// Pixels per world unit
    scale: f32,

    /// Side length of the root square in pixels
    side: i64,
}

impl Viewport {
    pub fn fit(bounds: Aabb, cam: &Camera) -> Self {
        let px = (cam.width().min(cam.height()) as f32 - 1.0).max(1.0);
        let scale = px / bounds.size();

        Self {
            bounds,
            scale,
            side: (bounds.size() * scale).round() as i64,
        }
    }

    pub fn world_to_pixel(&self, p: Point) -> (i64, i64) {
        let min = self.bounds.min();
        let x = ((p.x - min.x) * self.scale).round() as i64;
        let y = ((p.y - min.y) * self.scale).round() as i64;

        (x, self.side - y)
    }

    pub fn pixel_to_world(&self, x: i64, y: i64) -> Point {
        let min = self.bounds.min();

        Point::new(
            min.x + x as f32 / self.scale,
            min.y + (self.side - y) as f32 / self.scale,
        )
    }

    /// World point at the middle of terminal cell `(col, row)`. Each cell is 2x4 pixels.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Point {
        self.pixel_to_world(col as i64 * 2 + 1, row as i64 * 4 + 2)
    }

    /// Length of `len` world units in pixels, at least one
    pub fn pixels(&self, len: f32) -> i64 {
        ((len * self.scale).round() as i64).max(1)
    }
}

/// Draw the frame, subdivision crosses and value markers of `tree`.
///
/// Markers shrink the deeper a node is. With `show_only_full_values` only nodes holding `1` are
/// marked; otherwise those get a filled marker and every other node a single dot.
pub fn draw_tree(cam: &mut Camera, tree: &SpatialQuadTree, view: &Viewport, settings: &Settings) {
    let root_size = tree.bounds().size();

    for node in tree.nodes() {
        let (cx, cy) = view.world_to_pixel(node.center());
        let (x0, y1) = view.world_to_pixel(node.position());
        let (x1, y0) = view.world_to_pixel(node.bounds().max());

        if settings.show_grid {
            if node.is_root() {
                cam.draw_rect(x0, y0, x1, y1);
            }

            if !node.is_leaf() {
                cam.draw_hline(x0, x1, cy);
                cam.draw_vline(cx, y0, y1);
            }
        }

        // a zero-height tree only has its root, which is also as deep as it gets
        let t = match tree.max_depth() {
            0 => 1.0,
            max => node.depth() as f32 / max as f32,
        };

        let full = node.value() == 1.0;
        if full {
            let s = view.pixels(lerp(MARKER_ROOT, MARKER_LEAF, t) * root_size);
            cam.draw_square(cx - s / 2, cy - s / 2, s);
        } else if !settings.show_only_full_values {
            cam.draw_pixel(cx, cy);
        }
    }
}

#[cfg(test)]
mod test {
    use super::Viewport;
    use super::draw_tree;
    use crate::camera::Camera;
    use crate::quadtree::Point;
    use crate::quadtree::SpatialQuadTree;
    use crate::settings::Settings;

    fn unit_tree(max_depth: u8) -> SpatialQuadTree {
        SpatialQuadTree::new(Point::new(0.0, 0.0), 1.0, 0.0, max_depth).unwrap()
    }

    #[test]
    fn viewport_corners() {
        let cam = Camera::new(10, 5);
        let view = Viewport::fit(unit_tree(0).bounds(), &cam);

        assert_eq!(view.world_to_pixel(Point::new(0.0, 0.0)), (0, 19));
        assert_eq!(view.world_to_pixel(Point::new(1.0, 1.0)), (19, 0));
        assert_eq!(view.pixel_to_world(0, 19), Point::new(0.0, 0.0));
    }

    #[test]
    fn terminal_cells_land_in_the_tree() {
        let cam = Camera::new(10, 5);
        let tree = unit_tree(3);
        let view = Viewport::fit(tree.bounds(), &cam);

        assert!(tree.bounds().contains(view.cell_to_world(0, 0)));
        assert!(tree.bounds().contains(view.cell_to_world(9, 4)));
        assert!(!tree.bounds().contains(view.cell_to_world(10, 0)));
    }

    #[test]
    fn draws_frame_cross_and_full_markers() {
        let mut cam = Camera::new(10, 5);
        let mut tree = unit_tree(1);
        tree.set_value(Point::new(0.9, 0.9), 1.0);

        let view = Viewport::fit(tree.bounds(), &cam);
        let settings = Settings {
            show_only_full_values: true,
            ..Default::default()
        };

        draw_tree(&mut cam, &tree, &view, &settings);

        // frame corners
        assert!(cam.pixel(0, 0));
        assert!(cam.pixel(19, 19));

        // root cross through (0.5, 0.5)
        assert!(cam.pixel(10, 9));
        assert!(cam.pixel(2, 9));
        assert!(cam.pixel(10, 15));

        // upper-right child holds 1, upper-left child doesn't
        assert!(cam.pixel(14, 5));
        assert!(!cam.pixel(5, 5));
    }

    #[test]
    fn hidden_grid_only_draws_markers() {
        let mut cam = Camera::new(10, 5);
        let tree = unit_tree(0);
        let view = Viewport::fit(tree.bounds(), &cam);
        let settings = Settings {
            show_grid: false,
            ..Default::default()
        };

        draw_tree(&mut cam, &tree, &view, &settings);

        let lit: Vec<(i64, i64)> = (0..20)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|&(x, y)| cam.pixel(x, y))
            .collect();

        // the root's center dot
        assert_eq!(lit, [(10, 9)]);
    }
}
