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

/// Packed RGBA color. Red occupies the lowest byte and alpha the highest, so
/// the in-memory byte order on little-endian targets is `r, g, b, a`.
pub type Color = u32;

/// Packs the four 8-bit channels into a [`Color`].
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color { r as u32 | (g as u32) << 8 | (b as u32) << 16 | (a as u32) << 24 }

/// Packs an opaque color from the three 8-bit channels.
pub fn rgb(r: u8, g: u8, b: u8) -> Color { rgba(r, g, b, 0xFF) }

/// Returns the red channel of a packed color.
pub fn red(c: Color) -> u8 { (c & 0xFF) as u8 }

/// Returns the green channel of a packed color.
pub fn green(c: Color) -> u8 { ((c >> 8) & 0xFF) as u8 }

/// Returns the blue channel of a packed color.
pub fn blue(c: Color) -> u8 { ((c >> 16) & 0xFF) as u8 }

/// Returns the alpha channel of a packed color.
pub fn alpha(c: Color) -> u8 { ((c >> 24) & 0xFF) as u8 }

/// Converts a packed color to hue/saturation/lightness. Hue is in degrees
/// `[0, 360)`, saturation and lightness in `[0, 1]`. The alpha channel is
/// dropped.
pub fn rgb_to_hsl(c: Color) -> (f32, f32, f32) {
    let r = red(c) as f32 / 255.0;
    let g = green(c) as f32 / 255.0;
    let b = blue(c) as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;
    let l = (max + min) / 2.0;

    if chroma == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = chroma / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * (((g - b) / chroma).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };
    (h, s, l)
}

/// Converts hue/saturation/lightness back into a packed color with the given
/// alpha. Hue is taken modulo 360; saturation and lightness are clamped to
/// `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32, a: u8) -> Color {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = chroma * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_byte = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    rgba(to_byte(r1), to_byte(g1), to_byte(b1), a)
}

/// Returns the color with its lightness raised by `percent` of the full range,
/// clamped to `[0, 1]`. The alpha channel is preserved.
pub fn lighter(c: Color, percent: f32) -> Color {
    let (h, s, l) = rgb_to_hsl(c);
    hsl_to_rgb(h, s, l + percent / 100.0, alpha(c))
}

/// Returns the color with its lightness lowered by `percent` of the full
/// range, clamped to `[0, 1]`. The alpha channel is preserved.
pub fn darker(c: Color, percent: f32) -> Color {
    let (h, s, l) = rgb_to_hsl(c);
    hsl_to_rgb(h, s, l - percent / 100.0, alpha(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        let c = rgba(12, 34, 56, 78);
        assert_eq!(red(c), 12);
        assert_eq!(green(c), 34);
        assert_eq!(blue(c), 56);
        assert_eq!(alpha(c), 78);
    }

    #[test]
    fn hsl_round_trip_primaries() {
        for &c in &[rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255), rgb(255, 255, 255), rgb(0, 0, 0), rgb(128, 64, 32)] {
            let (h, s, l) = rgb_to_hsl(c);
            let back = hsl_to_rgb(h, s, l, 0xFF);
            assert!((red(back) as i32 - red(c) as i32).abs() <= 1);
            assert!((green(back) as i32 - green(c) as i32).abs() <= 1);
            assert!((blue(back) as i32 - blue(c) as i32).abs() <= 1);
        }
    }

    #[test]
    fn lighter_darker_clamp() {
        assert_eq!(lighter(rgb(255, 255, 255), 50.0), rgb(255, 255, 255));
        assert_eq!(darker(rgb(0, 0, 0), 50.0), rgb(0, 0, 0));
        let grey = rgb(100, 100, 100);
        let (_, _, l0) = rgb_to_hsl(grey);
        let (_, _, l1) = rgb_to_hsl(lighter(grey, 20.0));
        assert!(l1 > l0);
    }

    #[test]
    fn lighter_preserves_alpha() {
        let c = rgba(10, 20, 30, 99);
        assert_eq!(alpha(lighter(c, 10.0)), 99);
    }
}
