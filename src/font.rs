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
use crate::{Bitmap, Color, Position, Size, dim};

/// Measures and rasterizes text into widget surfaces. Text is UTF-8; the
/// provider decodes it into code points. Implementations blend glyph coverage
/// through [`Bitmap::blend_pixel`], so out-of-bounds glyphs clip silently
/// like every other primitive.
pub trait FontProvider {
    /// Pixel extent of `text` on a single line.
    fn text_size(&self, text: &str) -> Size;

    /// Draws `text` with its top-left corner at `position`.
    fn write(&self, bitmap: &mut Bitmap, position: Position, text: &str, color: Color);
}

/// The degraded provider substituted when a real font fails to load: both
/// operations return immediately without drawing, so text simply disappears
/// instead of taking the toolkit down.
pub struct NullFont;

impl NullFont {
    /// Creates the no-op provider.
    pub fn new() -> Self { Self }

    /// Creates the no-op provider while logging why a real one is missing.
    pub fn degraded(reason: &dyn std::fmt::Display) -> Self {
        tracing::warn!("font provider unavailable, text rendering disabled: {reason}");
        Self
    }
}

impl Default for NullFont {
    fn default() -> Self { Self::new() }
}

impl FontProvider for NullFont {
    fn text_size(&self, _text: &str) -> Size { dim(0, 0) }

    fn write(&self, _bitmap: &mut Bitmap, _position: Position, _text: &str, _color: Color) {}
}

/// TrueType provider rasterizing glyphs with `fontdue` and blending their
/// coverage into the target surface.
#[cfg(feature = "fontdue-font")]
pub struct FontdueFont {
    font: fontdue::Font,
    px: f32,
    ascent: i32,
    line_height: i32,
}

#[cfg(feature = "fontdue-font")]
impl FontdueFont {
    /// Parses TTF/OTF bytes at the given pixel size.
    pub fn from_bytes(data: &[u8], px: f32) -> Result<Self, crate::Error> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default()).map_err(|e| crate::Error::FontLoad(e.to_string()))?;
        let line = font.horizontal_line_metrics(px).ok_or_else(|| crate::Error::FontLoad("font has no horizontal metrics".into()))?;
        Ok(Self { font, px, ascent: line.ascent.ceil() as i32, line_height: (line.ascent - line.descent).ceil() as i32 })
    }

    /// Reads and parses a font file at the given pixel size.
    pub fn from_file(path: &str, px: f32) -> Result<Self, crate::Error> {
        let data = std::fs::read(path).map_err(|e| crate::Error::FontLoad(format!("{path}: {e}")))?;
        Self::from_bytes(&data, px)
    }

    /// The configured pixel size.
    pub fn px(&self) -> f32 { self.px }
}

#[cfg(feature = "fontdue-font")]
impl FontProvider for FontdueFont {
    fn text_size(&self, text: &str) -> Size {
        let mut width = 0f32;
        for ch in text.chars() {
            width += self.font.metrics(ch, self.px).advance_width;
        }
        dim(width.ceil() as i32, self.line_height)
    }

    fn write(&self, bitmap: &mut Bitmap, position: Position, text: &str, color: Color) {
        let baseline = position.y + self.ascent;
        let mut pen = position.x as f32;
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, self.px);
            let gx = pen as i32 + metrics.xmin;
            let gy = baseline - metrics.height as i32 - metrics.ymin;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    if alpha > 0 {
                        bitmap.blend_pixel(gx + col as i32, gy + row as i32, color, alpha);
                    }
                }
            }
            pen += metrics.advance_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2;

    #[test]
    fn null_font_is_a_no_op() {
        let font = NullFont::new();
        let mut b = Bitmap::new(dim(8, 8), 0);
        font.write(&mut b, vec2(0, 0), "hello", 0xFFFFFFFF);
        assert!(b.buffer().iter().all(|&p| p == 0));
        let s = font.text_size("hello");
        assert_eq!((s.width, s.height), (0, 0));
    }
}
