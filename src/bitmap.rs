//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::{Color, Position, Recti, Size, dim};

/// Direction of a linear gradient fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GradientDirection {
    /// Color interpolates left to right.
    Horizontal,
    /// Color interpolates top to bottom.
    Vertical,
}

/// Integer square root used by the disk and ellipse scanline fills.
fn isqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// A fixed-size grid of packed-RGBA pixels that every widget and theme draws
/// into. All primitives clip silently: out-of-range writes are no-ops and
/// out-of-range reads return 0, so callers on the render hot path never pay
/// for error plumbing.
pub struct Bitmap {
    buffer: Vec<Color>,
    size: Size,
    background_color: Color,
}

impl Bitmap {
    /// Creates a bitmap of the given size filled with the background color.
    pub fn new(size: Size, background_color: Color) -> Self {
        let count = (size.width.max(0) * size.height.max(0)) as usize;
        Self {
            buffer: vec![background_color; count],
            size: dim(size.width.max(0), size.height.max(0)),
            background_color,
        }
    }

    /// Returns the bitmap dimensions.
    pub fn size(&self) -> Size { self.size }

    /// Returns the width in pixels.
    pub fn width(&self) -> i32 { self.size.width }

    /// Returns the height in pixels.
    pub fn height(&self) -> i32 { self.size.height }

    /// Returns the background color used by [`Bitmap::clear`].
    pub fn background_color(&self) -> Color { self.background_color }

    /// Replaces the background color without repainting.
    pub fn set_background_color(&mut self, color: Color) { self.background_color = color; }

    /// Returns the raw pixel buffer, row-major with stride = width.
    pub fn buffer(&self) -> &[Color] { &self.buffer }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            None
        } else {
            Some((y * self.size.width + x) as usize)
        }
    }

    /// Writes a pixel; out-of-range coordinates are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.buffer[i] = color;
        }
    }

    /// Reads a pixel; out-of-range coordinates return 0.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => self.buffer[i],
            None => 0,
        }
    }

    /// Blends `color` over the existing pixel with the given opacity.
    /// Each channel is interpolated as `((255 - alpha) * dst + alpha * src) / 255`,
    /// so alpha 0 leaves the pixel untouched and 255 replaces it.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        let i = match self.index(x, y) {
            Some(i) => i,
            None => return,
        };
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.buffer[i] = color;
            return;
        }
        let dst = self.buffer[i];
        let a = alpha as u32;
        let na = 255 - a;
        let mut out = 0u32;
        for shift in [0u32, 8, 16, 24] {
            let d = (dst >> shift) & 0xFF;
            let s = (color >> shift) & 0xFF;
            out |= ((na * d + a * s) / 255) << shift;
        }
        self.buffer[i] = out;
    }

    /// Resizes the bitmap. The buffer is reallocated only when the total pixel
    /// count changes; a shape change that preserves the pixel count (e.g.
    /// 100x200 to 200x100) reinterprets the same storage, leaving the old
    /// contents visible as stale data until the owner repaints. This is a
    /// deliberate allocation-avoidance quirk, not a bug.
    pub fn resize(&mut self, size: Size) {
        let size = dim(size.width.max(0), size.height.max(0));
        if size.width == self.size.width && size.height == self.size.height {
            return;
        }
        let count = (size.width * size.height) as usize;
        if count != self.buffer.len() {
            self.buffer = vec![self.background_color; count];
        }
        self.size = size;
    }

    /// Fills the whole surface with the background color.
    pub fn clear(&mut self) {
        let bg = self.background_color;
        self.buffer.fill(bg);
    }

    /// Fills a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, r: Recti, color: Color) {
        let x0 = r.x.max(0);
        let y0 = r.y.max(0);
        let x1 = (r.x + r.width).min(self.size.width);
        let y1 = (r.y + r.height).min(self.size.height);
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let row = (y * self.size.width) as usize;
            self.buffer[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Fills a disk using the `dx*dx + dy*dy <= r*r` membership test, one
    /// horizontal span per row.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let r = radius as i64;
        for dy in -radius..=radius {
            let dx = isqrt(r * r - (dy as i64) * (dy as i64)) as i32;
            self.fill_rect(Recti::new(cx - dx, cy + dy, dx * 2 + 1, 1), color);
        }
    }

    /// Fills an axis-aligned ellipse with the given semi-axes.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        if ry == 0 {
            self.fill_rect(Recti::new(cx - rx, cy, rx * 2 + 1, 1), color);
            return;
        }
        let (a, b) = (rx as i64, ry as i64);
        for dy in -ry..=ry {
            let d = dy as i64;
            let dx = isqrt(a * a * (b * b - d * d) / (b * b)) as i32;
            self.fill_rect(Recti::new(cx - dx, cy + dy, dx * 2 + 1, 1), color);
        }
    }

    /// Draws a 1-pixel line between two points using integer Bresenham
    /// stepping.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;
        loop {
            self.put_pixel(x, y, color);
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

    /// Draws a line of the given thickness by scanning the bounding box and
    /// keeping every pixel within half the thickness of the segment.
    pub fn line_thickness(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        if thickness <= 1 {
            self.line(x0, y0, x1, y1, color);
            return;
        }
        let half = thickness as f32 / 2.0;
        let margin = half.ceil() as i32 + 1;
        let (fx0, fy0) = (x0 as f32, y0 as f32);
        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        let len2 = dx * dx + dy * dy;
        for y in y0.min(y1) - margin..=y0.max(y1) + margin {
            for x in x0.min(x1) - margin..=x0.max(x1) + margin {
                let px = x as f32 - fx0;
                let py = y as f32 - fy0;
                let t = if len2 == 0.0 { 0.0 } else { ((px * dx + py * dy) / len2).clamp(0.0, 1.0) };
                let ex = px - t * dx;
                let ey = py - t * dy;
                if ex * ex + ey * ey <= half * half {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws a 1-pixel rectangle outline with separate colors for the
    /// top/left and bottom/right edges, producing the classic bevel look.
    pub fn draw_rectangle(&mut self, r: Recti, top_left: Color, bottom_right: Color) {
        if r.width <= 0 || r.height <= 0 {
            return;
        }
        let (x1, y1) = (r.x + r.width - 1, r.y + r.height - 1);
        self.line(r.x, r.y, x1, r.y, top_left);
        self.line(r.x, r.y, r.x, y1, top_left);
        self.line(r.x, y1, x1, y1, bottom_right);
        self.line(x1, r.y, x1, y1, bottom_right);
    }

    /// Draws a rounded rectangle outline with bevel colors. Corner arcs take
    /// the color of the edges they join.
    pub fn draw_rounded_rectangle(&mut self, r: Recti, radius: i32, top_left: Color, bottom_right: Color) {
        if r.width <= 0 || r.height <= 0 {
            return;
        }
        let rad = radius.max(0).min(r.width / 2).min(r.height / 2);
        if rad == 0 {
            self.draw_rectangle(r, top_left, bottom_right);
            return;
        }
        let (x1, y1) = (r.x + r.width - 1, r.y + r.height - 1);
        self.line(r.x + rad, r.y, x1 - rad, r.y, top_left);
        self.line(r.x, r.y + rad, r.x, y1 - rad, top_left);
        self.line(r.x + rad, y1, x1 - rad, y1, bottom_right);
        self.line(x1, r.y + rad, x1, y1 - rad, bottom_right);

        // Quarter arcs via the midpoint circle walk, one octant pair per corner.
        let mut x = rad;
        let mut y = 0;
        let mut err = 1 - rad;
        while x >= y {
            self.put_pixel(r.x + rad - x, r.y + rad - y, top_left);
            self.put_pixel(r.x + rad - y, r.y + rad - x, top_left);
            self.put_pixel(x1 - rad + x, r.y + rad - y, top_left);
            self.put_pixel(x1 - rad + y, r.y + rad - x, top_left);
            self.put_pixel(r.x + rad - x, y1 - rad + y, bottom_right);
            self.put_pixel(r.x + rad - y, y1 - rad + x, bottom_right);
            self.put_pixel(x1 - rad + x, y1 - rad + y, bottom_right);
            self.put_pixel(x1 - rad + y, y1 - rad + x, bottom_right);
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draws a circle outline using the integer midpoint algorithm with
    /// 8-way symmetric plotting.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;
        while x >= y {
            self.put_pixel(cx + x, cy + y, color);
            self.put_pixel(cx - x, cy + y, color);
            self.put_pixel(cx + x, cy - y, color);
            self.put_pixel(cx - x, cy - y, color);
            self.put_pixel(cx + y, cy + x, color);
            self.put_pixel(cx - y, cy + x, color);
            self.put_pixel(cx + y, cy - x, color);
            self.put_pixel(cx - y, cy - x, color);
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draws an ellipse outline using the two-region integer midpoint
    /// algorithm with 4-way symmetric plotting.
    pub fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        if rx == 0 || ry == 0 {
            self.line(cx - rx, cy - ry, cx + rx, cy + ry, color);
            return;
        }
        let a2 = (rx as i64) * (rx as i64);
        let b2 = (ry as i64) * (ry as i64);

        let mut x = 0i64;
        let mut y = ry as i64;
        let mut sigma = 2 * b2 + a2 * (1 - 2 * ry as i64);
        while b2 * x <= a2 * y {
            self.plot4(cx, cy, x as i32, y as i32, color);
            if sigma >= 0 {
                sigma += 4 * a2 * (1 - y);
                y -= 1;
            }
            sigma += b2 * (4 * x + 6);
            x += 1;
        }

        let mut x = rx as i64;
        let mut y = 0i64;
        let mut sigma = 2 * a2 + b2 * (1 - 2 * rx as i64);
        while a2 * y <= b2 * x {
            self.plot4(cx, cy, x as i32, y as i32, color);
            if sigma >= 0 {
                sigma += 4 * b2 * (1 - x);
                x -= 1;
            }
            sigma += a2 * (4 * y + 6);
            y += 1;
        }
    }

    fn plot4(&mut self, cx: i32, cy: i32, dx: i32, dy: i32, color: Color) {
        self.put_pixel(cx + dx, cy + dy, color);
        self.put_pixel(cx - dx, cy + dy, color);
        self.put_pixel(cx + dx, cy - dy, color);
        self.put_pixel(cx - dx, cy - dy, color);
    }

    /// Draws a quadratic Bezier segment with integer error-driven stepping
    /// (Zingl). The gradient sign must not change along the segment, i.e. the
    /// control point has to lie on the same side of both endpoints on each
    /// axis; callers violating this get undefined pixel output, not an error.
    pub fn draw_bezier(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (mut x0, mut y0, mut x2, mut y2) = (x0, y0, x2, y2);
        let mut sx = x2 - x1;
        let mut sy = y2 - y1;
        let mut xx = (x0 - x1) as i64;
        let mut yy = (y0 - y1) as i64;
        let mut cur = (xx * sy as i64 - yy * sx as i64) as f64;

        debug_assert!(xx * sx as i64 <= 0 && yy * sy as i64 <= 0, "bezier gradient sign must not change");

        if (sx as i64 * sx as i64 + sy as i64 * sy as i64) > xx * xx + yy * yy {
            // Begin with the longer part; swap the endpoints.
            x2 = x0;
            x0 = sx + x1;
            y2 = y0;
            y0 = sy + y1;
            cur = -cur;
        }
        if cur != 0.0 {
            xx += sx as i64;
            sx = if x0 < x2 { 1 } else { -1 };
            xx *= sx as i64;
            yy += sy as i64;
            sy = if y0 < y2 { 1 } else { -1 };
            yy *= sy as i64;
            let mut xy = 2 * xx * yy;
            xx *= xx;
            yy *= yy;
            if cur * sx as f64 * (sy as f64) < 0.0 {
                xx = -xx;
                yy = -yy;
                xy = -xy;
                cur = -cur;
            }
            let mut dx = 4.0 * sy as f64 * cur * (x1 - x0) as f64 + xx as f64 - xy as f64;
            let mut dy = 4.0 * sx as f64 * cur * (y0 - y1) as f64 + yy as f64 - xy as f64;
            let xx2 = (xx + xx) as f64;
            let yy2 = (yy + yy) as f64;
            let mut err = dx + dy + xy as f64;
            loop {
                self.put_pixel(x0, y0, color);
                if x0 == x2 && y0 == y2 {
                    return;
                }
                let step_y = 2.0 * err < dx;
                if 2.0 * err > dy {
                    x0 += sx;
                    dx -= xy as f64;
                    dy += yy2;
                    err += dy;
                }
                if step_y {
                    y0 += sy;
                    dy -= xy as f64;
                    dx += xx2;
                    err += dx;
                }
                if dy >= dx {
                    break;
                }
            }
        }
        self.line(x0, y0, x2, y2, color);
    }

    /// 4-connected flood fill replacing `old` with `new`, starting at the
    /// given seed. Runs over an explicit worklist so large regions cannot
    /// overflow the call stack.
    pub fn fill(&mut self, x: i32, y: i32, old: Color, new: Color) {
        if old == new || self.get_pixel(x, y) != old {
            return;
        }
        let mut worklist = vec![(x, y)];
        while let Some((x, y)) = worklist.pop() {
            if self.get_pixel(x, y) != old {
                continue;
            }
            // put_pixel marks the cell visited, so revisits fall out above.
            self.put_pixel(x, y, new);
            if x > 0 {
                worklist.push((x - 1, y));
            }
            if x + 1 < self.size.width {
                worklist.push((x + 1, y));
            }
            if y > 0 {
                worklist.push((x, y - 1));
            }
            if y + 1 < self.size.height {
                worklist.push((x, y + 1));
            }
        }
    }

    /// Blits another bitmap at `position`, clipping at this surface's bounds.
    pub fn draw(&mut self, position: Position, other: &Bitmap) {
        let src_x0 = (-position.x).max(0);
        let src_y0 = (-position.y).max(0);
        let src_x1 = other.size.width.min(self.size.width - position.x);
        let src_y1 = other.size.height.min(self.size.height - position.y);
        if src_x0 >= src_x1 || src_y0 >= src_y1 {
            return;
        }
        let span = (src_x1 - src_x0) as usize;
        for sy in src_y0..src_y1 {
            let src_row = (sy * other.size.width + src_x0) as usize;
            let dst_row = ((position.y + sy) * self.size.width + position.x + src_x0) as usize;
            self.buffer[dst_row..dst_row + span].copy_from_slice(&other.buffer[src_row..src_row + span]);
        }
    }

    /// Fills a rectangle with a linear gradient between two colors.
    pub fn fill_gradient(&mut self, r: Recti, from: Color, to: Color, direction: GradientDirection) {
        let steps = match direction {
            GradientDirection::Horizontal => r.width,
            GradientDirection::Vertical => r.height,
        };
        if steps <= 0 {
            return;
        }
        for i in 0..steps {
            let t = (i * 255 / steps.max(1)) as u32;
            let mut color = 0u32;
            for shift in [0u32, 8, 16, 24] {
                let f = (from >> shift) & 0xFF;
                let g = (to >> shift) & 0xFF;
                color |= ((f * (255 - t) + g * t) / 255) << shift;
            }
            match direction {
                GradientDirection::Horizontal => self.fill_rect(Recti::new(r.x + i, r.y, 1, r.height), color),
                GradientDirection::Vertical => self.fill_rect(Recti::new(r.x, r.y + i, r.width, 1), color),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rgb, vec2};

    #[test]
    fn put_get_round_trip() {
        let mut b = Bitmap::new(dim(8, 6), 0);
        for y in 0..6 {
            for x in 0..8 {
                let c = rgb(x as u8, y as u8, 7);
                b.put_pixel(x, y, c);
                assert_eq!(b.get_pixel(x, y), c);
            }
        }
    }

    #[test]
    fn out_of_bounds_is_silent() {
        let mut b = Bitmap::new(dim(4, 4), 0);
        b.put_pixel(-1, 0, 0xFFFF_FFFF);
        b.put_pixel(0, -1, 0xFFFF_FFFF);
        b.put_pixel(4, 0, 0xFFFF_FFFF);
        b.put_pixel(0, 4, 0xFFFF_FFFF);
        assert_eq!(b.get_pixel(-1, 0), 0);
        assert_eq!(b.get_pixel(4, 4), 0);
        assert!(b.buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn blend_alpha_extremes() {
        let mut b = Bitmap::new(dim(2, 2), 0);
        b.put_pixel(0, 0, rgb(10, 20, 30));
        b.blend_pixel(0, 0, rgb(200, 200, 200), 0);
        assert_eq!(b.get_pixel(0, 0), rgb(10, 20, 30));
        b.blend_pixel(0, 0, rgb(200, 210, 220), 255);
        assert_eq!(b.get_pixel(0, 0), rgb(200, 210, 220));
    }

    #[test]
    fn blend_midpoint() {
        let mut b = Bitmap::new(dim(1, 1), 0);
        b.put_pixel(0, 0, rgb(0, 0, 0));
        b.blend_pixel(0, 0, rgb(255, 255, 255), 128);
        let c = b.get_pixel(0, 0);
        assert!((crate::red(c) as i32 - 128).abs() <= 1);
    }

    #[test]
    fn resize_keeps_storage_when_pixel_count_is_preserved() {
        let mut b = Bitmap::new(dim(4, 2), 0);
        b.put_pixel(3, 1, 0xAABBCCDD);
        // 4x2 -> 2x4 preserves the pixel count; the backing storage is
        // reinterpreted and the old bytes stay visible (documented quirk).
        b.resize(dim(2, 4));
        assert_eq!(b.width(), 2);
        assert_eq!(b.height(), 4);
        assert_eq!(b.get_pixel(1, 3), 0xAABBCCDD);
    }

    #[test]
    fn resize_reallocates_on_count_change() {
        let mut b = Bitmap::new(dim(4, 2), 0x11);
        b.put_pixel(0, 0, 0xFF);
        b.resize(dim(4, 4));
        assert_eq!(b.buffer().len(), 16);
        assert_eq!(b.get_pixel(0, 0), 0x11);
    }

    #[test]
    fn fill_rect_clips() {
        let mut b = Bitmap::new(dim(4, 4), 0);
        b.fill_rect(Recti::new(-2, -2, 100, 100), 7);
        assert!(b.buffer().iter().all(|&p| p == 7));
    }

    #[test]
    fn line_hits_endpoints() {
        let mut b = Bitmap::new(dim(10, 10), 0);
        b.line(1, 1, 8, 5, 9);
        assert_eq!(b.get_pixel(1, 1), 9);
        assert_eq!(b.get_pixel(8, 5), 9);
    }

    #[test]
    fn circle_symmetry() {
        let mut b = Bitmap::new(dim(21, 21), 0);
        b.draw_circle(10, 10, 6, 1);
        assert_eq!(b.get_pixel(16, 10), 1);
        assert_eq!(b.get_pixel(4, 10), 1);
        assert_eq!(b.get_pixel(10, 16), 1);
        assert_eq!(b.get_pixel(10, 4), 1);
    }

    #[test]
    fn fill_circle_covers_center() {
        let mut b = Bitmap::new(dim(11, 11), 0);
        b.fill_circle(5, 5, 3, 4);
        assert_eq!(b.get_pixel(5, 5), 4);
        assert_eq!(b.get_pixel(8, 5), 4);
        assert_eq!(b.get_pixel(9, 5), 0);
    }

    #[test]
    fn flood_fill_is_bounded_by_other_colors() {
        let mut b = Bitmap::new(dim(8, 8), 0);
        b.draw_rectangle(Recti::new(1, 1, 6, 6), 1, 1);
        b.fill(3, 3, 0, 5);
        assert_eq!(b.get_pixel(3, 3), 5);
        assert_eq!(b.get_pixel(2, 2), 5);
        // outside the box stays untouched
        assert_eq!(b.get_pixel(0, 0), 0);
        assert_eq!(b.get_pixel(1, 1), 1);
    }

    #[test]
    fn flood_fill_noop_when_colors_match() {
        let mut b = Bitmap::new(dim(4, 4), 0);
        b.fill(1, 1, 0, 0);
        assert!(b.buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn blit_clips_at_destination() {
        let mut dst = Bitmap::new(dim(4, 4), 0);
        let mut src = Bitmap::new(dim(3, 3), 2);
        src.clear();
        dst.draw(vec2(2, 2), &src);
        assert_eq!(dst.get_pixel(2, 2), 2);
        assert_eq!(dst.get_pixel(3, 3), 2);
        assert_eq!(dst.get_pixel(1, 1), 0);
        dst.draw(vec2(-2, -2), &src);
        assert_eq!(dst.get_pixel(0, 0), 2);
    }

    #[test]
    fn bezier_endpoints_plotted() {
        let mut b = Bitmap::new(dim(32, 32), 0);
        b.draw_bezier(2, 20, 15, 2, 28, 20, 3);
        assert_eq!(b.get_pixel(2, 20), 3);
        assert_eq!(b.get_pixel(28, 20), 3);
    }
}
