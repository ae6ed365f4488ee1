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

/// Failures surfaced to the embedding application. Drawing never errors (the
/// rasterizer clips silently); what remains are resource and platform
/// failures, which propagate instead of terminating the process so a toolkit
/// embedder cannot be killed by a transient OS hiccup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform backend failed to create or configure the native window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The platform timer facility refused to create a timer.
    #[error("timer creation failed: {0}")]
    TimerCreation(String),

    /// No timer host has been installed on the window.
    #[error("no timer host installed")]
    TimerUnavailable,

    /// A font could not be loaded or parsed.
    #[error("font load failed: {0}")]
    FontLoad(String),

    /// An image payload could not be decoded.
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// Any other backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
