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
use crate::{Bitmap, ButtonState, Color, FontProvider, ItemStatus, Recti, Spacing, darker, lighter, rect, vec2};

/// Direction of a scrollbar step-button arrow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrowDirection {
    /// Pointing up.
    Up,
    /// Pointing down.
    Down,
    /// Pointing left.
    Left,
    /// Pointing right.
    Right,
}

/// Control class whose inner padding a theme defines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaddingStyle {
    /// Push buttons.
    Button,
    /// Single-line text editors.
    TextField,
    /// List view rows.
    ListItem,
    /// Tab headers.
    TabHeader,
}

/// A pluggable, stateless drawing strategy mapping widget state to pixels.
/// Themes only paint into the supplied [`Bitmap`]; they never mutate widget
/// state. Widgets pass their current state in and the theme decides colors
/// and shapes.
pub trait Theme {
    /// Fills the window back buffer before widgets are composited.
    fn draw_window_background(&self, bitmap: &mut Bitmap);

    /// Paints a push button over the whole surface.
    fn draw_button(&self, bitmap: &mut Bitmap, has_focus: bool, is_default: bool, is_enabled: bool, state: ButtonState, text: &str, font: &dyn FontProvider);

    /// Paints a checkbox (box, mark, and label) over the whole surface.
    fn draw_checkbox(&self, bitmap: &mut Bitmap, has_focus: bool, is_enabled: bool, state: ButtonState, checked: bool, text: &str, font: &dyn FontProvider);

    /// Paints a static text label over the whole surface.
    fn draw_label(&self, bitmap: &mut Bitmap, text: &str, font: &dyn FontProvider);

    /// Paints a single-line text editor. `cursor` is the char index of the
    /// insertion point when it should be visible this blink phase.
    fn draw_textfield(&self, bitmap: &mut Bitmap, has_focus: bool, text: &str, cursor: Option<usize>, font: &dyn FontProvider);

    /// Fills a scrollbar's track background over the whole surface.
    fn draw_scrollbar_background(&self, bitmap: &mut Bitmap);

    /// Paints one scrollbar step button into `r`.
    fn draw_scrollbar_button(&self, bitmap: &mut Bitmap, r: Recti, direction: ArrowDirection, state: ButtonState, is_enabled: bool);

    /// Paints the scrollbar thumb into `r`.
    fn draw_scrollbar_thumb(&self, bitmap: &mut Bitmap, r: Recti);

    /// Paints a list row's background strip into `r`.
    fn draw_listview_item(&self, bitmap: &mut Bitmap, r: Recti, status: ItemStatus);

    /// Paints one tab header into `r`.
    fn draw_tab_header(&self, bitmap: &mut Bitmap, r: Recti, title: &str, active: bool, font: &dyn FontProvider);

    /// Paints the closed face of a combobox into `r`.
    fn draw_combobox(&self, bitmap: &mut Bitmap, r: Recti, has_focus: bool, is_open: bool, text: &str, font: &dyn FontProvider);

    /// Draws the focus indicator around a widget. The window calls this into
    /// its own buffer, outside the widget's surface, when
    /// [`Theme::needs_frame_for_focus`] is `true`.
    fn draw_focus_frame(&self, bitmap: &mut Bitmap, r: Recti);

    /// Thickness of scrollbars in pixels.
    fn scrollbar_size(&self) -> i32;

    /// Whether the window should draw [`Theme::draw_focus_frame`] around the
    /// focused widget.
    fn needs_frame_for_focus(&self) -> bool;

    /// Inner padding for the given control class.
    fn get_padding(&self, style: PaddingStyle) -> Spacing;
}

/// The built-in skin: light-grey beveled controls with a dark selection bar.
pub struct BevelTheme;

impl BevelTheme {
    /// Window and control face color.
    pub const FACE: Color = 0xFFC8D0D4; // rgb(212, 208, 200)
    /// Editable surface color.
    pub const SURFACE: Color = 0xFFFFFFFF;
    /// Regular text color.
    pub const TEXT: Color = 0xFF000000;
    /// Disabled text color.
    pub const TEXT_DISABLED: Color = 0xFF808080;
    /// Selection bar color.
    pub const SELECTION: Color = 0xFF6A240A;
    /// Text color on the selection bar.
    pub const SELECTION_TEXT: Color = 0xFFFFFFFF;

    /// Creates the theme.
    pub fn new() -> Self { Self }

    fn bevel(&self, bitmap: &mut Bitmap, r: Recti, sunken: bool) {
        let face = Self::FACE;
        let (light, dark) = (lighter(face, 20.0), darker(face, 30.0));
        let (light_inner, dark_inner) = (lighter(face, 10.0), darker(face, 15.0));
        let inner = rect(r.x + 1, r.y + 1, r.width - 2, r.height - 2);
        if sunken {
            bitmap.draw_rectangle(r, dark, light);
            bitmap.draw_rectangle(inner, dark_inner, light_inner);
        } else {
            bitmap.draw_rectangle(r, light, dark);
            bitmap.draw_rectangle(inner, light_inner, dark_inner);
        }
    }

    fn centered_text(&self, bitmap: &mut Bitmap, r: Recti, text: &str, color: Color, font: &dyn FontProvider) {
        let ts = font.text_size(text);
        let x = r.x + (r.width - ts.width) / 2;
        let y = r.y + (r.height - ts.height) / 2;
        font.write(bitmap, vec2(x, y), text, color);
    }

    fn arrow(&self, bitmap: &mut Bitmap, r: Recti, direction: ArrowDirection, color: Color) {
        let steps = (r.width.min(r.height) / 3).max(2);
        let cx = r.x + r.width / 2;
        let cy = r.y + r.height / 2;
        for i in 0..steps {
            let half = steps - 1 - i;
            match direction {
                ArrowDirection::Up => bitmap.line(cx - half, cy - steps / 2 + i, cx + half, cy - steps / 2 + i, color),
                ArrowDirection::Down => bitmap.line(cx - half, cy + steps / 2 - i, cx + half, cy + steps / 2 - i, color),
                ArrowDirection::Left => bitmap.line(cx - steps / 2 + i, cy - half, cx - steps / 2 + i, cy + half, color),
                ArrowDirection::Right => bitmap.line(cx + steps / 2 - i, cy - half, cx + steps / 2 - i, cy + half, color),
            }
        }
    }
}

impl Default for BevelTheme {
    fn default() -> Self { Self::new() }
}

impl Theme for BevelTheme {
    fn draw_window_background(&self, bitmap: &mut Bitmap) {
        let s = bitmap.size();
        bitmap.fill_rect(rect(0, 0, s.width, s.height), Self::FACE);
    }

    fn draw_button(&self, bitmap: &mut Bitmap, has_focus: bool, is_default: bool, is_enabled: bool, state: ButtonState, text: &str, font: &dyn FontProvider) {
        let s = bitmap.size();
        let mut face_rect = rect(0, 0, s.width, s.height);
        if is_default {
            bitmap.draw_rectangle(face_rect, Self::TEXT, Self::TEXT);
            face_rect = rect(1, 1, s.width - 2, s.height - 2);
        }
        let pressed = state == ButtonState::ClickedInside;
        let face = if state == ButtonState::Hovered { lighter(Self::FACE, 5.0) } else { Self::FACE };
        bitmap.fill_rect(face_rect, face);
        self.bevel(bitmap, face_rect, pressed);
        let text_color = if is_enabled { Self::TEXT } else { Self::TEXT_DISABLED };
        let offset = if pressed { 1 } else { 0 };
        self.centered_text(bitmap, rect(face_rect.x + offset, face_rect.y + offset, face_rect.width, face_rect.height), text, text_color, font);
        if has_focus {
            bitmap.draw_rectangle(rect(face_rect.x + 3, face_rect.y + 3, face_rect.width - 6, face_rect.height - 6), darker(face, 50.0), darker(face, 50.0));
        }
    }

    fn draw_checkbox(&self, bitmap: &mut Bitmap, has_focus: bool, is_enabled: bool, state: ButtonState, checked: bool, text: &str, font: &dyn FontProvider) {
        let s = bitmap.size();
        bitmap.fill_rect(rect(0, 0, s.width, s.height), Self::FACE);
        let box_size = 13;
        let box_y = (s.height - box_size) / 2;
        let box_rect = rect(1, box_y, box_size, box_size);
        let surface = if !is_enabled {
            Self::FACE
        } else if state == ButtonState::ClickedInside {
            darker(Self::SURFACE, 10.0)
        } else {
            Self::SURFACE
        };
        bitmap.fill_rect(box_rect, surface);
        self.bevel(bitmap, box_rect, true);
        if checked {
            let color = if is_enabled { Self::TEXT } else { Self::TEXT_DISABLED };
            let (cx, cy) = (box_rect.x + 3, box_rect.y + 6);
            bitmap.line(cx, cy, cx + 2, cy + 2, color);
            bitmap.line(cx, cy + 1, cx + 2, cy + 3, color);
            bitmap.line(cx + 2, cy + 2, cx + 6, cy - 2, color);
            bitmap.line(cx + 2, cy + 3, cx + 6, cy - 1, color);
        }
        let text_color = if is_enabled { Self::TEXT } else { Self::TEXT_DISABLED };
        let ts = font.text_size(text);
        font.write(bitmap, vec2(box_rect.x + box_size + 5, (s.height - ts.height) / 2), text, text_color);
        if has_focus {
            let w = ts.width + 4;
            bitmap.draw_rectangle(rect(box_rect.x + box_size + 3, 0, w, s.height), darker(Self::FACE, 50.0), darker(Self::FACE, 50.0));
        }
    }

    fn draw_label(&self, bitmap: &mut Bitmap, text: &str, font: &dyn FontProvider) {
        let s = bitmap.size();
        let ts = font.text_size(text);
        font.write(bitmap, vec2(2, (s.height - ts.height) / 2), text, Self::TEXT);
    }

    fn draw_textfield(&self, bitmap: &mut Bitmap, has_focus: bool, text: &str, cursor: Option<usize>, font: &dyn FontProvider) {
        let s = bitmap.size();
        let pad = self.get_padding(PaddingStyle::TextField);
        bitmap.fill_rect(rect(0, 0, s.width, s.height), Self::SURFACE);
        self.bevel(bitmap, rect(0, 0, s.width, s.height), true);
        let ts = font.text_size(text);
        let baseline_y = (s.height - ts.height) / 2;
        font.write(bitmap, vec2(pad.start, baseline_y), text, Self::TEXT);
        if has_focus {
            if let Some(cursor) = cursor {
                let prefix: String = text.chars().take(cursor).collect();
                let cx = pad.start + font.text_size(&prefix).width;
                bitmap.line(cx, pad.top.max(2), cx, s.height - pad.bottom.max(2) - 1, Self::TEXT);
            }
        }
    }

    fn draw_scrollbar_background(&self, bitmap: &mut Bitmap) {
        let s = bitmap.size();
        bitmap.fill_rect(rect(0, 0, s.width, s.height), lighter(Self::FACE, 8.0));
    }

    fn draw_scrollbar_button(&self, bitmap: &mut Bitmap, r: Recti, direction: ArrowDirection, state: ButtonState, is_enabled: bool) {
        bitmap.fill_rect(r, Self::FACE);
        self.bevel(bitmap, r, is_enabled && state == ButtonState::ClickedInside);
        let color = if is_enabled { Self::TEXT } else { Self::TEXT_DISABLED };
        self.arrow(bitmap, r, direction, color);
    }

    fn draw_scrollbar_thumb(&self, bitmap: &mut Bitmap, r: Recti) {
        bitmap.fill_rect(r, Self::FACE);
        self.bevel(bitmap, r, false);
    }

    fn draw_listview_item(&self, bitmap: &mut Bitmap, r: Recti, status: ItemStatus) {
        let color = match status {
            ItemStatus::Selected => Self::SELECTION,
            ItemStatus::Normal => Self::SURFACE,
        };
        bitmap.fill_rect(r, color);
    }

    fn draw_tab_header(&self, bitmap: &mut Bitmap, r: Recti, title: &str, active: bool, font: &dyn FontProvider) {
        let face = if active { Self::FACE } else { darker(Self::FACE, 10.0) };
        bitmap.fill_rect(r, face);
        bitmap.draw_rectangle(r, lighter(face, 20.0), darker(face, 30.0));
        if active {
            // merge the header into the page below it
            bitmap.line(r.x + 1, r.y + r.height - 1, r.x + r.width - 2, r.y + r.height - 1, face);
        }
        self.centered_text(bitmap, r, title, Self::TEXT, font);
    }

    fn draw_combobox(&self, bitmap: &mut Bitmap, r: Recti, has_focus: bool, is_open: bool, text: &str, font: &dyn FontProvider) {
        bitmap.fill_rect(r, Self::SURFACE);
        self.bevel(bitmap, r, true);
        let pad = self.get_padding(PaddingStyle::TextField);
        let ts = font.text_size(text);
        font.write(bitmap, vec2(r.x + pad.start, r.y + (r.height - ts.height) / 2), text, Self::TEXT);
        let button = rect(r.x + r.width - r.height, r.y + 2, r.height - 2, r.height - 4);
        bitmap.fill_rect(button, Self::FACE);
        self.bevel(bitmap, button, is_open);
        self.arrow(bitmap, button, ArrowDirection::Down, Self::TEXT);
        if has_focus && !is_open {
            bitmap.draw_rectangle(rect(r.x + 2, r.y + 2, r.width - r.height - 3, r.height - 4), Self::SELECTION, Self::SELECTION);
        }
    }

    fn draw_focus_frame(&self, bitmap: &mut Bitmap, r: Recti) { bitmap.draw_rectangle(r, darker(Self::FACE, 50.0), darker(Self::FACE, 50.0)); }

    fn scrollbar_size(&self) -> i32 { 16 }

    fn needs_frame_for_focus(&self) -> bool { false }

    fn get_padding(&self, style: PaddingStyle) -> Spacing {
        match style {
            PaddingStyle::Button => Spacing::uniform(4),
            PaddingStyle::TextField => Spacing { top: 3, bottom: 3, start: 4, end: 4 },
            PaddingStyle::ListItem => Spacing { top: 1, bottom: 1, start: 3, end: 3 },
            PaddingStyle::TabHeader => Spacing { top: 3, bottom: 3, start: 8, end: 8 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullFont, dim};

    #[test]
    fn window_background_fills_everything() {
        let theme = BevelTheme::new();
        let mut b = Bitmap::new(dim(8, 8), 0);
        theme.draw_window_background(&mut b);
        assert!(b.buffer().iter().all(|&p| p == BevelTheme::FACE));
    }

    #[test]
    fn listview_item_uses_selection_color() {
        let theme = BevelTheme::new();
        let mut b = Bitmap::new(dim(10, 4), 0);
        theme.draw_listview_item(&mut b, rect(0, 0, 10, 2), ItemStatus::Selected);
        theme.draw_listview_item(&mut b, rect(0, 2, 10, 2), ItemStatus::Normal);
        assert_eq!(b.get_pixel(5, 0), BevelTheme::SELECTION);
        assert_eq!(b.get_pixel(5, 3), BevelTheme::SURFACE);
    }

    #[test]
    fn button_face_renders_without_font() {
        let theme = BevelTheme::new();
        let font = NullFont::new();
        let mut b = Bitmap::new(dim(40, 20), 0);
        theme.draw_button(&mut b, false, false, true, ButtonState::Normal, "ok", &font);
        assert_eq!(b.get_pixel(20, 10), BevelTheme::FACE);
    }
}
