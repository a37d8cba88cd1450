//! RGB pixel buffer and the two drawing primitives the generators need.
//!
//! A `Raster` stores `width * height` [`Rgb`] values in row-major layout.
//! Drawing clips to the buffer: primitives accept arbitrary (even enormous)
//! f64 coordinates and write only the covered in-bounds pixels, so degenerate
//! geometry upstream can never index out of range or stall the scan loops.

use crate::color::Rgb;
use crate::error::FractalError;
use glam::DVec2;

/// A 2D RGB image buffer with clipped, bounds-safe drawing primitives.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `FractalError::InvalidDimensions` if either dimension is zero
    /// or `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Result<Self, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FractalError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![background; len],
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major pixel data.
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Writes a pixel, silently clipping writes outside the buffer.
    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.data[y as usize * self.width + x as usize] = color;
        }
    }

    /// Draws a butt-capped thick line from `p0` to `p1`.
    ///
    /// Both endpoints are first extended outward by `width / 2` along the
    /// segment direction so consecutive strokes of the same width meet without
    /// a notch at direction changes. The extension overshoots at the joint by
    /// construction; the curve's visuals were tuned against exactly this
    /// behavior, so it is kept rather than replaced with a true join.
    pub fn draw_thick_line(&mut self, p0: DVec2, p1: DVec2, width: f64, color: Rgb) {
        let dir = p1 - p0;
        let len = dir.length();
        if !(len > 0.0) || !(width > 0.0) {
            return;
        }
        let dir = dir / len;
        let half = width / 2.0;
        let a = p0 - dir * half;
        let b = p1 + dir * half;
        let n = DVec2::new(-dir.y, dir.x) * half;
        self.scan_fill(&[a - n, a + n, b + n, b - n], color);
    }

    /// Fills a polygon given by `corners`, with an optional 1-px outline.
    ///
    /// Uses even-odd scanline filling sampled at pixel centers. Fewer than
    /// three corners draws nothing.
    pub fn fill_polygon(&mut self, corners: &[DVec2], outline: Option<Rgb>, fill: Rgb) {
        if corners.len() < 3 {
            return;
        }
        self.scan_fill(corners, fill);
        if let Some(outline_color) = outline {
            for i in 0..corners.len() {
                let a = corners[i];
                let b = corners[(i + 1) % corners.len()];
                self.draw_segment(a, b, outline_color);
            }
        }
    }

    /// Even-odd scanline fill sampled at pixel centers (y + 0.5).
    fn scan_fill(&mut self, vertices: &[DVec2], color: Rgb) {
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for v in vertices {
            min_y = min_y.min(v.y);
            max_y = max_y.max(v.y);
        }
        if !(max_y >= 0.0) || !(min_y < self.height as f64) {
            return;
        }
        let y_start = min_y.max(0.0) as usize;
        let y_end = max_y.min(self.height as f64 - 1.0) as usize;

        let n = vertices.len();
        let mut intersections: Vec<f64> = Vec::with_capacity(n);
        for y in y_start..=y_end {
            let yc = y as f64 + 0.5;
            intersections.clear();
            for i in 0..n {
                let a = vertices[i];
                let b = vertices[(i + 1) % n];
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    intersections.push(a.x + (yc - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            intersections.sort_unstable_by(|p, q| p.total_cmp(q));
            for pair in intersections.chunks_exact(2) {
                self.fill_span(y, pair[0], pair[1], color);
            }
        }
    }

    /// Fills pixels on row `y` whose centers lie in `[x0, x1]`, clamped in f64
    /// before any integer cast so huge span ends cannot overflow.
    fn fill_span(&mut self, y: usize, x0: f64, x1: f64, color: Rgb) {
        let start = x0.max(0.0);
        let end = x1.min(self.width as f64 - 1.0);
        if end < start {
            return;
        }
        let row = y * self.width;
        for x in start.round() as usize..=end.round() as usize {
            self.data[row + x] = color;
        }
    }

    /// Draws a 1-px line segment, clipping to the raster first.
    fn draw_segment(&mut self, p0: DVec2, p1: DVec2, color: Rgb) {
        let Some((a, b)) = clip_segment(p0, p1, self.width as f64, self.height as f64) else {
            return;
        };
        let (mut x, mut y) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Cohen-Sutherland outcode for the rectangle `[0, w-1] x [0, h-1]`.
fn outcode(p: DVec2, w: f64, h: f64) -> u8 {
    let mut code = 0;
    if p.x < 0.0 {
        code |= LEFT;
    } else if p.x > w - 1.0 {
        code |= RIGHT;
    }
    if p.y < 0.0 {
        code |= TOP;
    } else if p.y > h - 1.0 {
        code |= BOTTOM;
    }
    code
}

/// Clips a segment to the raster rectangle.
///
/// Bounded iteration count, so NaN or astronomically large coordinates
/// terminate instead of looping; such segments are simply dropped.
fn clip_segment(mut a: DVec2, mut b: DVec2, w: f64, h: f64) -> Option<(DVec2, DVec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let mut code_a = outcode(a, w, h);
    let mut code_b = outcode(b, w, h);
    // Converges in at most 4 clips per endpoint.
    for _ in 0..16 {
        if (code_a | code_b) == 0 {
            return Some((a, b));
        }
        if (code_a & code_b) != 0 {
            return None;
        }
        let (out, p) = if code_a != 0 { (code_a, a) } else { (code_b, b) };
        let q = if (out & LEFT) != 0 {
            DVec2::new(0.0, p.y + (b.y - a.y) * (0.0 - p.x) / (b.x - a.x))
        } else if (out & RIGHT) != 0 {
            DVec2::new(w - 1.0, p.y + (b.y - a.y) * (w - 1.0 - p.x) / (b.x - a.x))
        } else if (out & TOP) != 0 {
            DVec2::new(p.x + (b.x - a.x) * (0.0 - p.y) / (b.y - a.y), 0.0)
        } else {
            DVec2::new(p.x + (b.x - a.x) * (h - 1.0 - p.y) / (b.y - a.y), h - 1.0)
        };
        if !q.is_finite() {
            return None;
        }
        if out == code_a {
            a = q;
            code_a = outcode(a, w, h);
        } else {
            b = q;
            code_b = outcode(b, w, h);
        }
    }
    None
}
