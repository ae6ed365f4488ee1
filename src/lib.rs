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
#![deny(missing_docs)]
//! `pixelui` is a retained-mode GUI widget toolkit rendered entirely in
//! software. Widgets own their pixel surface as a [`Bitmap`], are arranged by
//! a weighted layout engine, and receive translated platform events through a
//! [`PlatformWindow`]. Platform backends, font providers, and image decoders
//! are thin collaborators behind traits; the toolkit itself never touches a
//! GPU or a native widget set.

mod bitmap;
mod color;
mod error;
mod event;
mod font;
mod layout;
mod platform;
mod theme;
mod widget;
mod widgets;
mod window;

#[cfg(feature = "png-source")]
mod image;

#[cfg(feature = "sdl2-backend")]
mod backend_sdl2;

pub use bitmap::*;
pub use color::*;
pub use error::*;
pub use event::*;
pub use font::*;
pub use layout::*;
pub use platform::*;
pub use rs_math3d::*;
pub use theme::*;
pub use widget::*;
pub use widgets::*;
pub use window::*;

#[cfg(feature = "png-source")]
pub use image::*;

#[cfg(feature = "sdl2-backend")]
pub use backend_sdl2::*;

/// Widget position relative to its parent (or the window for top-level widgets).
pub type Position = Vec2i;

/// Pixel dimensions of a widget surface or window.
pub type Size = Dimensioni;

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Dimensioni`].
pub fn dim(w: i32, h: i32) -> Dimensioni { Dimensioni { width: w, height: h } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Returns `true` when `point` lies inside `r` (right/bottom edges exclusive).
pub fn point_in_rect(point: Vec2i, r: Recti) -> bool {
    point.x >= r.x && point.x < r.x + r.width && point.y >= r.y && point.y < r.y + r.height
}
