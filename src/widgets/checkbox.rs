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
use crate::{AbstractButtonState, EventKeyboard, EventMouse, FontProvider, Propagation, Theme, Widget, WidgetCore, dim};

/// A two-state toggle sharing the button click machine: the value flips on
/// every completed click and never on an aborted one.
pub struct Checkbox {
    core: WidgetCore,
    text: String,
    machine: AbstractButtonState,
    checked: bool,
    enabled: bool,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    /// Creates an unchecked box with the given label.
    pub fn new(text: &str) -> Self {
        let mut core = WidgetCore::new(dim(100, 18), 0);
        core.set_can_focus(true);
        core.set_size_hint(dim(0, 18));
        Self { core, text: text.into(), machine: AbstractButtonState::new(), checked: false, enabled: true, on_change: None }
    }

    /// The label text.
    pub fn text(&self) -> &str { &self.text }

    /// Current toggle value.
    pub fn is_checked(&self) -> bool { self.checked }

    /// Sets the toggle value without firing the change callback.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.core.mark_dirty();
        }
    }

    /// Whether the checkbox reacts to input.
    pub fn is_enabled(&self) -> bool { self.enabled }

    /// Enables or disables the checkbox.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            if !enabled {
                self.machine.reset();
            }
            self.core.mark_dirty();
        }
    }

    /// Installs the change callback, invoked with the new value.
    pub fn set_on_change(&mut self, callback: impl FnMut(bool) + 'static) { self.on_change = Some(Box::new(callback)); }

    fn toggle(&mut self) {
        self.checked = !self.checked;
        let checked = self.checked;
        if let Some(callback) = self.on_change.as_mut() {
            callback(checked);
        }
        self.core.mark_dirty();
    }
}

impl Widget for Checkbox {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        theme.draw_checkbox(&mut self.core.content, self.core.has_focus, self.enabled, self.machine.state(), self.checked, &self.text, font);
    }

    fn on_mouse_enter(&mut self) {
        if self.enabled {
            self.machine.on_mouse_enter();
            self.core.mark_dirty();
        }
    }

    fn on_mouse_leave(&mut self) {
        if self.enabled {
            self.machine.on_mouse_leave();
            self.core.mark_dirty();
        }
    }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        if !self.enabled {
            return Propagation::Propagate;
        }
        let (result, clicked) = self.machine.on_mouse_click(event);
        if clicked {
            self.toggle();
        }
        self.core.mark_dirty();
        result
    }

    fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if !self.enabled {
            return Propagation::Propagate;
        }
        let (result, clicked) = self.machine.on_keyboard(event);
        if clicked {
            self.toggle();
        }
        result
    }

    fn on_focus_changed(&mut self, _focused: bool) { self.core.mark_dirty(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventMouse, Key, MouseButton};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press_local() -> EventMouse {
        let mut e = EventMouse::press(MouseButton::LEFT, 3, 3);
        e.is_local = true;
        e
    }

    fn release(local: bool) -> EventMouse {
        let mut e = EventMouse::release(MouseButton::LEFT, 3, 3);
        e.is_local = local;
        e
    }

    #[test]
    fn completed_click_toggles_and_reports() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut checkbox = Checkbox::new("opt");
        let sink = seen.clone();
        checkbox.set_on_change(move |v| sink.borrow_mut().push(v));
        checkbox.on_mouse_enter();
        checkbox.on_mouse_click(&press_local());
        checkbox.on_mouse_click(&release(true));
        assert!(checkbox.is_checked());
        checkbox.on_mouse_click(&press_local());
        checkbox.on_mouse_click(&release(true));
        assert!(!checkbox.is_checked());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn aborted_click_leaves_the_value_alone() {
        let mut checkbox = Checkbox::new("opt");
        checkbox.on_mouse_enter();
        checkbox.on_mouse_click(&press_local());
        checkbox.on_mouse_leave();
        checkbox.on_mouse_click(&release(false));
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn space_toggles_from_the_keyboard() {
        let mut checkbox = Checkbox::new("opt");
        assert_eq!(checkbox.on_keyboard(&EventKeyboard::down(Key::Char(' '))), Propagation::Handled);
        assert!(checkbox.is_checked());
    }

    #[test]
    fn set_checked_does_not_fire_the_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut checkbox = Checkbox::new("opt");
        let sink = seen.clone();
        checkbox.set_on_change(move |v| sink.borrow_mut().push(v));
        checkbox.set_checked(true);
        assert!(seen.borrow().is_empty());
    }
}
