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
use crate::{Bitmap, Error, dim, rgba};

use png::{BitDepth, ColorType, Decoder, Transformations};
use std::io::Cursor;

/// Decodes a PNG payload into a [`Bitmap`]. Grayscale and RGB images are
/// expanded to opaque RGBA; indexed images are expanded by the decoder.
pub fn decode_png(bytes: &[u8]) -> Result<Bitmap, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut decoder = Decoder::new(&mut cursor);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| Error::ImageDecode(e.to_string()))?;
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| Error::ImageDecode("PNG decoder did not report output size".into()))?;
    let mut img_data = vec![0; buf_size];
    let info = reader.next_frame(&mut img_data).map_err(|e| Error::ImageDecode(e.to_string()))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(Error::ImageDecode(format!("unsupported PNG bit depth: {:?}", info.bit_depth)));
    }

    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err(Error::ImageDecode("indexed PNGs are not supported".into())),
    };

    let mut bitmap = Bitmap::new(dim(info.width as i32, info.height as i32), 0);
    let line_size = info.line_size;
    for y in 0..info.height {
        let line = &img_data[(y as usize * line_size)..((y as usize + 1) * line_size)];
        for x in 0..info.width {
            let xx = (x as usize) * pixel_size;
            let color = match info.color_type {
                ColorType::Grayscale => {
                    let v = line[xx];
                    rgba(v, v, v, 0xFF)
                }
                ColorType::GrayscaleAlpha => rgba(line[xx], line[xx], line[xx], line[xx + 1]),
                ColorType::Rgb => rgba(line[xx], line[xx + 1], line[xx + 2], 0xFF),
                _ => rgba(line[xx], line[xx + 1], line[xx + 2], line[xx + 3]),
            };
            bitmap.put_pixel(x as i32, y as i32, color);
        }
    }
    Ok(bitmap)
}

/// Reads and decodes a PNG file.
pub fn load_png(path: &str) -> Result<Bitmap, Error> {
    let bytes = std::fs::read(path).map_err(|e| Error::ImageDecode(format!("{path}: {e}")))?;
    decode_png(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alpha, blue, green, red};

    fn encode_png(color: ColorType, data: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(color);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        bytes
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let bytes = encode_png(ColorType::Rgb, &[10, 20, 30], 1, 1);
        let bitmap = decode_png(&bytes).unwrap();
        let c = bitmap.get_pixel(0, 0);
        assert_eq!((red(c), green(c), blue(c), alpha(c)), (10, 20, 30, 0xFF));
    }

    #[test]
    fn grayscale_replicates_channels() {
        let bytes = encode_png(ColorType::Grayscale, &[128, 7], 2, 1);
        let bitmap = decode_png(&bytes).unwrap();
        assert_eq!(bitmap.width(), 2);
        let c = bitmap.get_pixel(1, 0);
        assert_eq!((red(c), green(c), blue(c), alpha(c)), (7, 7, 7, 0xFF));
    }

    #[test]
    fn rgba_round_trips() {
        let bytes = encode_png(ColorType::Rgba, &[1, 2, 3, 4], 1, 1);
        let bitmap = decode_png(&bytes).unwrap();
        assert_eq!(bitmap.get_pixel(0, 0), rgba(1, 2, 3, 4));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(decode_png(b"not a png"), Err(Error::ImageDecode(_))));
    }
}
