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
use super::widget_core;
use crate::{Color, FontProvider, Theme, Widget, WidgetCore, dim, vec2};

/// Static single-line text. Never focusable.
pub struct Label {
    core: WidgetCore,
    text: String,
    text_color: Option<Color>,
}

impl Label {
    /// Creates a label with the given text.
    pub fn new(text: &str) -> Self {
        let mut core = WidgetCore::new(dim(80, 18), crate::BevelTheme::FACE);
        core.set_size_hint(dim(0, 18));
        Self { core, text: text.into(), text_color: None }
    }

    /// The text shown.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.into();
            self.core.mark_dirty();
        }
    }

    /// Overrides the theme text color. `None` returns to the theme default.
    pub fn set_text_color(&mut self, color: Option<Color>) {
        self.text_color = color;
        self.core.mark_dirty();
    }

    /// Replaces the surface background color.
    pub fn set_background_color(&mut self, color: Color) {
        self.core.content.set_background_color(color);
        self.core.mark_dirty();
    }
}

impl Widget for Label {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        self.core.content.clear();
        match self.text_color {
            Some(color) => {
                let s = self.core.content.size();
                let ts = font.text_size(&self.text);
                font.write(&mut self.core.content, vec2(2, (s.height - ts.height) / 2), &self.text, color);
            }
            None => theme.draw_label(&mut self.core.content, &self.text, font),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_never_take_focus() {
        let label = Label::new("hi");
        assert!(!label.core().can_focus());
    }

    #[test]
    fn set_text_marks_dirty_only_on_change() {
        let mut label = Label::new("hi");
        label.core_mut().needs_redraw = false;
        label.set_text("hi");
        assert!(!label.core().needs_redraw());
        label.set_text("bye");
        assert!(label.core().needs_redraw());
    }
}
