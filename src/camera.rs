/// Codepoint of the braille cell with no dots raised. Every other cell is this plus its dot bits.
const BRAILLE_BLANK: u32 = 0x2800;

/// Dot bit of each pixel in a 2x4 braille cell, indexed `[row][col]` with row `0` on top.
///
/// Braille numbers the top three dots of the left column before those of the right, so the bottom
/// row sits apart from the rest.
const DOT_BITS: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// A monochrome pixel buffer that renders to braille text, 2x4 pixels per terminal cell.
///
/// Pixel `(0, 0)` is the top left of the terminal.
pub struct Camera {
    /// On/off state of every pixel, row by row
    pixels: Vec<bool>,

    /// Last rendered frame
    text: String,

    /// Dot bits of the terminal row being rendered
    line: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,
}

impl Camera {
    /// Create a camera covering a terminal area of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);

        Self {
            pixels: vec![false; cols * 2 * rows * 4],
            // braille characters are 3 bytes of UTF-8, plus a newline per row
            text: String::with_capacity((3 * cols + 1) * rows),
            line: vec![0; cols],
            w: cols * 2,
            h: rows * 4,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.w
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Turns on a single pixel. Pixels off the buffer are dropped.
    pub fn draw_pixel(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = true;
        }
    }

    /// Whether pixel `(x, y)` is on. Pixels off the buffer are always off.
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.pixels[i])
    }

    pub fn draw_hline(&mut self, x0: i64, x1: i64, y: i64) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.draw_pixel(x, y);
        }
    }

    pub fn draw_vline(&mut self, x: i64, y0: i64, y1: i64) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.draw_pixel(x, y);
        }
    }

    /// Outline of the rectangle with corners `(x0, y0)` and `(x1, y1)`, inclusive.
    pub fn draw_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        self.draw_hline(x0, x1, y0);
        self.draw_hline(x0, x1, y1);
        self.draw_vline(x0, y0, y1);
        self.draw_vline(x1, y0, y1);
    }

    /// Turns on a square grid of `s` x `s` pixels with top left corner `(x, y)`
    pub fn draw_square(&mut self, x: i64, y: i64, s: i64) {
        for dx in 0..s {
            for dy in 0..s {
                self.draw_pixel(x + dx, y + dy);
            }
        }
    }

    /// Turn every pixel off
    pub fn reset(&mut self) {
        self.pixels.fill(false);
    }

    /// The pixel buffer as text, one line per terminal row, each ending in a newline.
    pub fn render(&mut self) -> &str {
        self.text.clear();

        if self.w == 0 {
            return &self.text;
        }

        for band in self.pixels.chunks(self.w * 4) {
            self.line.fill(0);

            for (y, row) in band.chunks(self.w).enumerate() {
                for (x, _) in row.iter().enumerate().filter(|(_, on)| **on) {
                    self.line[x / 2] |= DOT_BITS[y][x % 2];
                }
            }

            self.text.extend(
                self.line
                    .iter()
                    .map(|&dots| char::from_u32(BRAILLE_BLANK | dots).unwrap_or(' ')),
            );
            self.text.push('\n');
        }

        &self.text
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.w)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.h)?;

        Some(y * self.w + x)
    }
}
