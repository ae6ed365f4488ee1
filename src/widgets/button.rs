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

/// The canonical interactive pointer state shared by [`Button`],
/// [`super::Checkbox`], and the scrollbar step buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Pointer elsewhere, no press in flight.
    Normal,
    /// Pointer inside, no press in flight.
    Hovered,
    /// Pressed with the pointer currently inside.
    ClickedInside,
    /// Pressed but the pointer has left; releasing here aborts the click.
    ClickedOutside,
}

/// The state machine driving press/release/enter/leave for button-like
/// controls. A click fires exactly once per completed press-then-release-
/// inside sequence and never for a press-then-release-outside abort,
/// regardless of how many enter/leave toggles happen in between.
#[derive(Debug)]
pub struct AbstractButtonState {
    state: ButtonState,
}

impl AbstractButtonState {
    /// Starts at [`ButtonState::Normal`].
    pub fn new() -> Self { Self { state: ButtonState::Normal } }

    /// The current state.
    pub fn state(&self) -> ButtonState { self.state }

    /// Forces the machine back to [`ButtonState::Normal`].
    pub fn reset(&mut self) { self.state = ButtonState::Normal; }

    /// The pointer entered the control. Re-entering while the press is still
    /// held resumes the click in flight.
    pub fn on_mouse_enter(&mut self) {
        self.state = match self.state {
            ButtonState::Normal => ButtonState::Hovered,
            ButtonState::ClickedOutside => ButtonState::ClickedInside,
            s => s,
        };
    }

    /// The pointer left the control.
    pub fn on_mouse_leave(&mut self) {
        self.state = match self.state {
            ButtonState::Hovered => ButtonState::Normal,
            ButtonState::ClickedInside => ButtonState::ClickedOutside,
            ButtonState::ClickedOutside => ButtonState::ClickedInside,
            s => s,
        };
    }

    /// Feeds a press or release. Returns the propagation outcome and whether
    /// a click completed on this event.
    pub fn on_mouse_click(&mut self, event: &EventMouse) -> (Propagation, bool) {
        match (event.kind, self.state) {
            (MouseEventKind::Press, ButtonState::Normal) => {
                self.state = ButtonState::ClickedInside;
                (Propagation::Propagate, false)
            }
            (MouseEventKind::Press, ButtonState::Hovered) | (MouseEventKind::Press, ButtonState::ClickedOutside) => {
                self.state = ButtonState::ClickedInside;
                (Propagation::Handled, false)
            }
            (MouseEventKind::Release, ButtonState::ClickedInside) if event.is_local => {
                self.state = ButtonState::Hovered;
                (Propagation::Handled, true)
            }
            (MouseEventKind::Release, ButtonState::ClickedInside) | (MouseEventKind::Release, ButtonState::ClickedOutside) => {
                // released away from the control: the click is aborted
                self.state = ButtonState::Normal;
                (Propagation::Propagate, false)
            }
            _ => (Propagation::Propagate, false),
        }
    }

    /// Feeds a key event. Return and Space activate on key-down from any
    /// state.
    pub fn on_keyboard(&mut self, event: &EventKeyboard) -> (Propagation, bool) {
        if event.keydown && matches!(event.key, Key::Return | Key::Char(' ')) {
            (Propagation::Handled, true)
        } else {
            (Propagation::Propagate, false)
        }
    }
}

impl Default for AbstractButtonState {
    fn default() -> Self { Self::new() }
}

/// Phase of the press-and-hold auto-repeat, layered over the click machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RepeatState {
    /// No repeat in flight.
    Normal,
    /// Pressed; the start delay is running.
    WaitForFirstRepeat,
    /// The periodic timer is delivering repeats.
    Repeating,
}

/// A push button with an optional auto-repeat while held.
pub struct Button {
    core: WidgetCore,
    text: String,
    machine: AbstractButtonState,
    enabled: bool,
    is_default: bool,
    on_click: Option<Box<dyn FnMut()>>,
    autorepeat: Option<(u64, u64)>,
    repeat_state: RepeatState,
    repeat_timer: Option<TimerId>,
}

impl Button {
    /// Default delay before the first auto-repeat, in milliseconds.
    pub const AUTOREPEAT_START: u64 = 500;
    /// Default interval between auto-repeats, in milliseconds.
    pub const AUTOREPEAT_INTERVAL: u64 = 50;

    /// Creates a button with the given label.
    pub fn new(text: &str) -> Self {
        let mut core = WidgetCore::new(dim(80, 24), 0);
        core.set_can_focus(true);
        core.set_size_hint(dim(0, 24));
        Self {
            core,
            text: text.into(),
            machine: AbstractButtonState::new(),
            enabled: true,
            is_default: false,
            on_click: None,
            autorepeat: None,
            repeat_state: RepeatState::Normal,
            repeat_timer: None,
        }
    }

    /// The label text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the label text.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.into();
        self.core.mark_dirty();
    }

    /// Whether the button reacts to input.
    pub fn is_enabled(&self) -> bool { self.enabled }

    /// Enables or disables the button.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            if !enabled {
                self.machine.reset();
                self.stop_repeat();
            }
            self.core.mark_dirty();
        }
    }

    /// Marks this button as the window default, drawn with a heavier border.
    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
        self.core.mark_dirty();
    }

    /// Installs the click callback.
    pub fn set_on_click(&mut self, callback: impl FnMut() + 'static) { self.on_click = Some(Box::new(callback)); }

    /// Enables press-and-hold auto-repeat with the default timings.
    pub fn set_autorepeat(&mut self, enabled: bool) {
        self.autorepeat = enabled.then_some((Self::AUTOREPEAT_START, Self::AUTOREPEAT_INTERVAL));
    }

    /// Enables auto-repeat with an explicit start delay and interval.
    pub fn set_autorepeat_millis(&mut self, start_ms: u64, interval_ms: u64) { self.autorepeat = Some((start_ms, interval_ms)); }

    /// The current pointer-interaction state.
    pub fn state(&self) -> ButtonState { self.machine.state() }

    fn fire_click(&mut self) {
        if let Some(callback) = self.on_click.as_mut() {
            callback();
        }
    }

    fn start_repeat(&mut self) {
        let (start_ms, _) = match self.autorepeat {
            Some(times) => times,
            None => return,
        };
        self.stop_repeat();
        self.repeat_timer = self.core.start_timer(start_ms, None);
        if self.repeat_timer.is_some() {
            self.repeat_state = RepeatState::WaitForFirstRepeat;
        }
    }

    fn stop_repeat(&mut self) {
        if let Some(id) = self.repeat_timer.take() {
            self.core.cancel_timer(id);
        }
        self.repeat_state = RepeatState::Normal;
    }
}

impl Widget for Button {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        theme.draw_button(&mut self.core.content, self.core.has_focus, self.is_default, self.enabled, self.machine.state(), &self.text, font);
    }

    fn on_mouse_enter(&mut self) {
        if !self.enabled {
            return;
        }
        let was = self.machine.state();
        self.machine.on_mouse_enter();
        // re-entry while held resets the repeat cycle
        if was == ButtonState::ClickedOutside && self.machine.state() == ButtonState::ClickedInside {
            self.stop_repeat();
        }
        self.core.mark_dirty();
    }

    fn on_mouse_leave(&mut self) {
        if !self.enabled {
            return;
        }
        self.machine.on_mouse_leave();
        self.core.mark_dirty();
    }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        if !self.enabled {
            return Propagation::Propagate;
        }
        let (result, clicked) = self.machine.on_mouse_click(event);
        match event.kind {
            MouseEventKind::Press if self.machine.state() == ButtonState::ClickedInside => self.start_repeat(),
            MouseEventKind::Release => self.stop_repeat(),
            _ => {}
        }
        if clicked {
            self.fire_click();
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
            self.fire_click();
        }
        result
    }

    fn on_timer(&mut self, timer: TimerId) {
        if self.repeat_timer != Some(timer) {
            return;
        }
        // the firing may have raced a release; re-check before acting
        if self.machine.state() != ButtonState::ClickedInside {
            self.stop_repeat();
            return;
        }
        match self.repeat_state {
            RepeatState::WaitForFirstRepeat => {
                self.fire_click();
                let (_, interval_ms) = self.autorepeat.unwrap_or((Self::AUTOREPEAT_START, Self::AUTOREPEAT_INTERVAL));
                self.repeat_timer = self.core.start_timer(interval_ms, Some(interval_ms));
                self.repeat_state = RepeatState::Repeating;
            }
            RepeatState::Repeating => self.fire_click(),
            RepeatState::Normal => {}
        }
    }

    fn on_focus_changed(&mut self, _focused: bool) { self.core.mark_dirty(); }

    fn on_remove(&mut self) { self.stop_repeat(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MouseButton;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press_local() -> EventMouse {
        let mut e = EventMouse::press(MouseButton::LEFT, 5, 5);
        e.is_local = true;
        e
    }

    fn release(local: bool) -> EventMouse {
        let mut e = EventMouse::release(MouseButton::LEFT, 5, 5);
        e.is_local = local;
        e
    }

    fn counted_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let mut button = Button::new("go");
        let counter = clicks.clone();
        button.set_on_click(move || counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn completed_click_fires_once() {
        let (mut button, clicks) = counted_button();
        button.on_mouse_enter();
        assert_eq!(button.state(), ButtonState::Hovered);
        assert_eq!(button.on_mouse_click(&press_local()), Propagation::Handled);
        assert_eq!(button.state(), ButtonState::ClickedInside);
        assert_eq!(button.on_mouse_click(&release(true)), Propagation::Handled);
        assert_eq!(button.state(), ButtonState::Hovered);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn release_outside_aborts_the_click() {
        let (mut button, clicks) = counted_button();
        button.on_mouse_enter();
        button.on_mouse_click(&press_local());
        button.on_mouse_leave();
        assert_eq!(button.state(), ButtonState::ClickedOutside);
        button.on_mouse_click(&release(false));
        assert_eq!(button.state(), ButtonState::Normal);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn abort_is_idempotent_over_enter_leave_toggles() {
        let (mut button, clicks) = counted_button();
        button.on_mouse_enter();
        button.on_mouse_click(&press_local());
        for _ in 0..3 {
            button.on_mouse_leave();
            button.on_mouse_enter();
        }
        assert_eq!(button.state(), ButtonState::ClickedInside);
        button.on_mouse_leave();
        button.on_mouse_click(&release(false));
        assert_eq!(button.state(), ButtonState::Normal);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn reentry_then_release_inside_completes_the_click() {
        let (mut button, clicks) = counted_button();
        button.on_mouse_enter();
        button.on_mouse_click(&press_local());
        button.on_mouse_leave();
        button.on_mouse_enter();
        assert_eq!(button.state(), ButtonState::ClickedInside);
        button.on_mouse_click(&release(true));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn press_from_normal_propagates_press_from_hovered_handles() {
        let mut machine = AbstractButtonState::new();
        let (result, _) = machine.on_mouse_click(&press_local());
        assert_eq!(result, Propagation::Propagate);
        assert_eq!(machine.state(), ButtonState::ClickedInside);

        let mut machine = AbstractButtonState::new();
        machine.on_mouse_enter();
        let (result, _) = machine.on_mouse_click(&press_local());
        assert_eq!(result, Propagation::Handled);
    }

    #[test]
    fn keyboard_activation_fires_from_any_state() {
        for prime in [0usize, 1, 2] {
            let (mut button, clicks) = counted_button();
            match prime {
                1 => button.on_mouse_enter(),
                2 => {
                    button.on_mouse_enter();
                    button.on_mouse_click(&press_local());
                }
                _ => {}
            }
            assert_eq!(button.on_keyboard(&EventKeyboard::down(Key::Return)), Propagation::Handled);
            assert_eq!(button.on_keyboard(&EventKeyboard::down(Key::Char(' '))), Propagation::Handled);
            // key-up does not activate
            assert_eq!(button.on_keyboard(&EventKeyboard::up(Key::Return)), Propagation::Propagate);
            assert_eq!(clicks.get(), 2);
        }
    }

    #[test]
    fn disabled_button_ignores_everything() {
        let (mut button, clicks) = counted_button();
        button.set_enabled(false);
        button.on_mouse_enter();
        assert_eq!(button.on_mouse_click(&press_local()), Propagation::Propagate);
        button.on_mouse_click(&release(true));
        assert_eq!(button.on_keyboard(&EventKeyboard::down(Key::Return)), Propagation::Propagate);
        assert_eq!(clicks.get(), 0);
        assert_eq!(button.state(), ButtonState::Normal);
    }

    #[test]
    fn stale_timer_firing_after_release_is_ignored() {
        let (mut button, clicks) = counted_button();
        button.set_autorepeat(true);
        // without a window link no timer can be armed, so the repeat stays off
        button.on_mouse_enter();
        button.on_mouse_click(&press_local());
        assert_eq!(button.repeat_state, RepeatState::Normal);
        // a firing for a timer the button never armed is a no-op
        button.on_timer(TimerId(99));
        assert_eq!(clicks.get(), 0);
    }
}
