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
use crate::{EventKeyboard, EventMouse, FontProvider, Key, MouseEventKind, Propagation, Theme, TimerId, Widget, WidgetCore, dim};

/// Editable single-line text with a blinking insertion cursor. The cursor
/// position is a char index into the text; all editing keys operate on whole
/// code points.
pub struct TextField {
    core: WidgetCore,
    text: String,
    cursor: usize,
    cursor_visible: bool,
    blink_timer: Option<TimerId>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl TextField {
    /// Cursor blink half-period in milliseconds.
    pub const BLINK_MS: u64 = 530;

    /// Creates a field with the given initial text, cursor at the end.
    pub fn new(text: &str) -> Self {
        let mut core = WidgetCore::new(dim(120, 22), 0);
        core.set_can_focus(true);
        core.set_size_hint(dim(0, 22));
        Self { core, text: text.into(), cursor: text.chars().count(), cursor_visible: false, blink_timer: None, on_change: None }
    }

    /// The current text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text, clamping the cursor, without firing the callback.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.into();
        self.cursor = self.cursor.min(self.text.chars().count());
        self.core.mark_dirty();
    }

    /// Cursor position as a char index.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Moves the cursor, clamped to the text length.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.text.chars().count());
        self.core.mark_dirty();
    }

    /// Installs the change callback, invoked with the new text after every
    /// edit.
    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) { self.on_change = Some(Box::new(callback)); }

    fn byte_at(&self, char_index: usize) -> usize {
        self.text.char_indices().nth(char_index).map(|(b, _)| b).unwrap_or(self.text.len())
    }

    fn changed(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.text);
        }
        // edits restart the visible blink phase
        self.cursor_visible = true;
        self.core.mark_dirty();
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.changed();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_at(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.changed();
    }

    fn delete(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
        self.changed();
    }
}

impl Widget for TextField {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        let cursor = (self.core.has_focus && self.cursor_visible).then_some(self.cursor);
        theme.draw_textfield(&mut self.core.content, self.core.has_focus, &self.text, cursor, font);
    }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        if event.kind == MouseEventKind::Press && event.is_local {
            return Propagation::Handled;
        }
        Propagation::Propagate
    }

    fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if !event.keydown {
            return Propagation::Propagate;
        }
        match event.key {
            Key::Char(ch) if !event.modifiers.is_ctrl() && !event.modifiers.is_alt() => self.insert_char(ch),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.cursor_visible = true;
                self.core.mark_dirty();
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                self.cursor_visible = true;
                self.core.mark_dirty();
            }
            Key::Home => {
                self.cursor = 0;
                self.cursor_visible = true;
                self.core.mark_dirty();
            }
            Key::End => {
                self.cursor = self.text.chars().count();
                self.cursor_visible = true;
                self.core.mark_dirty();
            }
            _ => return Propagation::Propagate,
        }
        Propagation::Handled
    }

    fn on_focus_changed(&mut self, focused: bool) {
        if focused {
            self.cursor_visible = true;
            self.blink_timer = self.core.start_timer(Self::BLINK_MS, Some(Self::BLINK_MS));
        } else {
            if let Some(id) = self.blink_timer.take() {
                self.core.cancel_timer(id);
            }
            self.cursor_visible = false;
        }
        self.core.mark_dirty();
    }

    fn on_timer(&mut self, timer: TimerId) {
        if self.blink_timer != Some(timer) {
            return;
        }
        if !self.core.has_focus {
            // stale firing after focus left; the timer is already cancelled
            return;
        }
        self.cursor_visible = !self.cursor_visible;
        self.core.mark_dirty();
    }

    fn on_remove(&mut self) {
        if let Some(id) = self.blink_timer.take() {
            self.core.cancel_timer(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn typed(field: &mut TextField, keys: &[Key]) {
        for &key in keys {
            field.on_keyboard(&EventKeyboard::down(key));
        }
    }

    #[test]
    fn typing_inserts_at_the_cursor() {
        let mut field = TextField::new("");
        typed(&mut field, &[Key::Char('a'), Key::Char('b'), Key::Left, Key::Char('x')]);
        assert_eq!(field.text(), "axb");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete_remove_around_the_cursor() {
        let mut field = TextField::new("abc");
        typed(&mut field, &[Key::Backspace]);
        assert_eq!(field.text(), "ab");
        typed(&mut field, &[Key::Home, Key::Delete]);
        assert_eq!(field.text(), "b");
        // at the ends both are no-ops
        typed(&mut field, &[Key::Backspace]);
        assert_eq!(field.text(), "b");
        typed(&mut field, &[Key::End, Key::Delete]);
        assert_eq!(field.text(), "b");
    }

    #[test]
    fn cursor_navigation_clamps() {
        let mut field = TextField::new("ab");
        typed(&mut field, &[Key::Right, Key::Right, Key::Right]);
        assert_eq!(field.cursor(), 2);
        typed(&mut field, &[Key::Home, Key::Left]);
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn multibyte_text_edits_on_char_boundaries() {
        let mut field = TextField::new("héllo");
        typed(&mut field, &[Key::Home, Key::Right, Key::Right, Key::Backspace]);
        assert_eq!(field.text(), "hllo");
        typed(&mut field, &[Key::Char('é')]);
        assert_eq!(field.text(), "héllo");
    }

    #[test]
    fn change_callback_sees_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut field = TextField::new("");
        let sink = seen.clone();
        field.set_on_change(move |t| sink.borrow_mut().push(t.to_string()));
        typed(&mut field, &[Key::Char('h'), Key::Char('i'), Key::Backspace]);
        assert_eq!(*seen.borrow(), vec!["h", "hi", "h"]);
    }

    #[test]
    fn navigation_alone_does_not_fire_the_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut field = TextField::new("hi");
        let sink = seen.clone();
        field.set_on_change(move |t| sink.borrow_mut().push(t.to_string()));
        typed(&mut field, &[Key::Home, Key::End, Key::Left, Key::Right]);
        assert!(seen.borrow().is_empty());
    }
}
