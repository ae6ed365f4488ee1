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
use crate::{
    EventKeyboard, EventMouse, FontProvider, Key, ListView, MouseEventKind, Propagation, SelectionReason, TextAdapter, Theme, TimerId, Widget, WidgetCore,
    dim, rect, vec2,
};

use std::rc::Rc;

/// A closed text face that drops down a [`ListView`] popup. Only `Mouse` and
/// `Keyboard` selection reasons confirm a choice and close the popup;
/// `KeyboardMove` merely navigates inside it.
///
/// The popup lives below the closed face on the widget's own surface, which
/// grows while open so window hit-testing covers the dropdown.
pub struct Combobox {
    core: WidgetCore,
    items: Vec<String>,
    popup: ListView,
    selected: Option<usize>,
    open: bool,
    closed_height: i32,
    on_selected: Option<Box<dyn FnMut(usize)>>,
}

impl Combobox {
    /// Height of the closed face in pixels.
    pub const CLOSED_HEIGHT: i32 = 24;
    /// Most rows the popup shows before scrolling.
    pub const POPUP_ROWS: usize = 6;

    /// Creates a combobox over the given choices, nothing selected.
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let mut core = WidgetCore::new(dim(140, Self::CLOSED_HEIGHT), 0);
        core.set_can_focus(true);
        core.set_size_hint(dim(0, Self::CLOSED_HEIGHT));
        let mut popup = ListView::new();
        popup.set_adapter(Rc::new(TextAdapter::new(items.iter().cloned())));
        Self { core, items, popup, selected: None, open: false, closed_height: Self::CLOSED_HEIGHT, on_selected: None }
    }

    /// The choices.
    pub fn items(&self) -> &[String] { &self.items }

    /// The confirmed choice, if any.
    pub fn selected(&self) -> Option<usize> { self.selected }

    /// Sets the choice without firing the callback.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.items.len());
        self.core.mark_dirty();
    }

    /// Installs the confirmation callback.
    pub fn set_on_selected(&mut self, callback: impl FnMut(usize) + 'static) { self.on_selected = Some(Box::new(callback)); }

    /// Whether the popup is showing.
    pub fn is_open(&self) -> bool { self.open }

    fn popup_height(&self) -> i32 { self.popup.item_height() * self.items.len().min(Self::POPUP_ROWS) as i32 }

    /// Drops the popup down.
    pub fn open(&mut self) {
        if self.open || self.items.is_empty() {
            return;
        }
        self.open = true;
        self.grow_surface();
        if let Some(selected) = self.selected {
            self.popup.ensure_item_in_viewport(selected);
        }
        self.core.mark_dirty();
    }

    /// Retracts the popup.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let w = self.core.content.size().width;
        self.core.content.resize(dim(w, self.closed_height));
        self.core.mark_dirty();
    }

    fn grow_surface(&mut self) {
        let w = self.core.content.size().width;
        let ph = self.popup_height();
        self.core.content.resize(dim(w, self.closed_height + ph));
        self.popup.core_mut().window = self.core.window.clone();
        self.popup.core_mut().set_position(vec2(0, self.closed_height));
        self.popup.core_mut().content_mut().resize(dim(w, ph));
        self.popup.on_resize();
    }

    fn confirm(&mut self, index: usize) {
        self.selected = Some(index);
        self.close();
        if let Some(callback) = self.on_selected.as_mut() {
            callback(index);
        }
        self.core.mark_dirty();
    }

    fn poll_popup_selection(&mut self) {
        if let Some((index, reason)) = self.popup.take_selection() {
            match reason {
                SelectionReason::Mouse | SelectionReason::Keyboard => self.confirm(index),
                SelectionReason::KeyboardMove => self.core.mark_dirty(),
            }
        }
    }

    fn display_text(&self) -> &str { self.selected.and_then(|i| self.items.get(i)).map_or("", |s| s.as_str()) }
}

impl Widget for Combobox {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        self.core.content.clear();
        let w = self.core.content.size().width;
        let face = rect(0, 0, w, self.closed_height);
        let text = self.display_text().to_string();
        theme.draw_combobox(&mut self.core.content, face, self.core.has_focus, self.open, &text, font);
        if self.open {
            self.popup.draw(theme, font);
            self.popup.core_mut().needs_redraw = false;
            self.core.content.draw(self.popup.core().position(), self.popup.core().content());
        }
    }

    fn on_resize(&mut self) {
        if self.open {
            self.grow_surface();
        }
    }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        match event.kind {
            MouseEventKind::Press => {
                if !self.open {
                    self.open();
                    return Propagation::Handled;
                }
                if event.position.y < self.closed_height {
                    self.close();
                    return Propagation::Handled;
                }
                let forwarded = event.to_local(vec2(0, self.closed_height), true);
                let result = self.popup.on_mouse_click(&forwarded);
                self.poll_popup_selection();
                self.core.mark_dirty();
                result
            }
            MouseEventKind::Release | MouseEventKind::Scroll => {
                if !self.open {
                    return Propagation::Propagate;
                }
                let inside = event.is_local && event.position.y >= self.closed_height;
                let mut forwarded = event.to_local(vec2(0, self.closed_height), inside);
                forwarded.is_local = inside;
                let result = self.popup.on_mouse_click(&forwarded);
                self.poll_popup_selection();
                self.core.mark_dirty();
                result
            }
            MouseEventKind::Move => Propagation::Propagate,
        }
    }

    fn on_hover(&mut self, event: &EventMouse) {
        if self.open && event.position.y >= self.closed_height {
            let forwarded = event.to_local(vec2(0, self.closed_height), true);
            self.popup.on_hover(&forwarded);
        }
    }

    fn on_mouse_leave(&mut self) {
        if self.open {
            self.popup.on_mouse_leave();
        }
    }

    fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if !event.keydown {
            return Propagation::Propagate;
        }
        if !self.open {
            return match event.key {
                Key::Return | Key::Down | Key::Char(' ') => {
                    self.open();
                    Propagation::Handled
                }
                _ => Propagation::Propagate,
            };
        }
        if event.key == Key::Escape {
            self.close();
            return Propagation::Handled;
        }
        let result = self.popup.on_keyboard(event);
        self.poll_popup_selection();
        result
    }

    fn on_focus_changed(&mut self, focused: bool) {
        if !focused {
            self.close();
        }
        self.core.mark_dirty();
    }

    fn on_timer(&mut self, timer: TimerId) {
        if self.open {
            self.popup.on_timer(timer);
        }
    }

    fn on_remove(&mut self) { self.popup.on_remove(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MouseButton;
    use std::cell::RefCell;

    fn press_at(x: i32, y: i32) -> EventMouse {
        let mut e = EventMouse::press(MouseButton::LEFT, x, y);
        e.is_local = true;
        e
    }

    fn combobox() -> Combobox { Combobox::new(["alpha", "beta", "gamma"]) }

    #[test]
    fn click_opens_and_grows_the_surface() {
        let mut cb = combobox();
        assert_eq!(cb.core().size().height, Combobox::CLOSED_HEIGHT);
        cb.on_mouse_click(&press_at(10, 10));
        assert!(cb.is_open());
        assert_eq!(cb.core().size().height, Combobox::CLOSED_HEIGHT + 3 * cb.popup.item_height());
        cb.on_mouse_click(&press_at(10, 10));
        assert!(!cb.is_open());
        assert_eq!(cb.core().size().height, Combobox::CLOSED_HEIGHT);
    }

    #[test]
    fn popup_click_confirms_and_closes() {
        let picked = std::rc::Rc::new(RefCell::new(Vec::new()));
        let mut cb = combobox();
        let sink = picked.clone();
        cb.set_on_selected(move |i| sink.borrow_mut().push(i));
        cb.open();
        // second row of the popup
        let y = Combobox::CLOSED_HEIGHT + cb.popup.item_height() + 5;
        cb.on_mouse_click(&press_at(10, y));
        assert!(!cb.is_open());
        assert_eq!(cb.selected(), Some(1));
        assert_eq!(*picked.borrow(), vec![1]);
    }

    #[test]
    fn keyboard_navigation_stays_open_until_return() {
        let mut cb = combobox();
        cb.on_keyboard(&EventKeyboard::down(Key::Down)); // opens
        assert!(cb.is_open());
        cb.on_keyboard(&EventKeyboard::down(Key::Down)); // navigate: KeyboardMove
        assert!(cb.is_open(), "navigation does not confirm");
        assert_eq!(cb.selected(), None);
        cb.on_keyboard(&EventKeyboard::down(Key::Return)); // confirm
        assert!(!cb.is_open());
        assert_eq!(cb.selected(), Some(0));
    }

    #[test]
    fn escape_closes_without_selecting() {
        let mut cb = combobox();
        cb.open();
        cb.on_keyboard(&EventKeyboard::down(Key::Down));
        cb.on_keyboard(&EventKeyboard::down(Key::Escape));
        assert!(!cb.is_open());
        assert_eq!(cb.selected(), None);
    }

    #[test]
    fn losing_focus_closes_the_popup() {
        let mut cb = combobox();
        cb.open();
        cb.on_focus_changed(false);
        assert!(!cb.is_open());
    }

    #[test]
    fn empty_combobox_never_opens() {
        let mut cb = Combobox::new(Vec::<String>::new());
        cb.open();
        assert!(!cb.is_open());
    }
}
