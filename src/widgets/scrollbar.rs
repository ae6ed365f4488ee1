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
    AbstractButtonState, ArrowDirection, Button, ButtonState, EventMouse, FontProvider, MouseEventKind, Propagation, RepeatState, Recti, Theme, TimerId,
    Widget, WidgetCore, dim, rect,
};

/// Main axis of a [`ScrollBar`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Track runs left to right.
    Horizontal,
    /// Track runs top to bottom.
    Vertical,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Zone {
    Decrement,
    Increment,
    Thumb,
    Track,
}

/// A scrollbar with two repeat-enabled step buttons and a draggable thumb.
/// The thumb geometry is derived, never stored: it is recomputed from
/// `minimum`/`maximum`/`value`/`step` and the track size on every query, so
/// it can never drift out of sync after a mutator.
pub struct ScrollBar {
    core: WidgetCore,
    orientation: Orientation,
    minimum: i32,
    maximum: i32,
    value: i32,
    step: i32,
    dec_machine: AbstractButtonState,
    inc_machine: AbstractButtonState,
    hovered_zone: Option<Zone>,
    dragging: Option<i32>,
    repeat_timer: Option<TimerId>,
    repeat_state: RepeatState,
    repeat_delta: i32,
    did_change: Option<Box<dyn FnMut(i32)>>,
}

impl ScrollBar {
    /// Smallest thumb length under the proportional regime.
    pub const MIN_THUMB: i32 = 8;
    /// Default track thickness (and step-button length).
    pub const DEFAULT_THICKNESS: i32 = 16;

    /// Creates a scrollbar with range `[0, 100]`, value 0, step 1.
    pub fn new(orientation: Orientation) -> Self {
        let size = match orientation {
            Orientation::Horizontal => dim(100, Self::DEFAULT_THICKNESS),
            Orientation::Vertical => dim(Self::DEFAULT_THICKNESS, 100),
        };
        let mut core = WidgetCore::new(size, 0);
        core.set_size_hint(match orientation {
            Orientation::Horizontal => dim(0, Self::DEFAULT_THICKNESS),
            Orientation::Vertical => dim(Self::DEFAULT_THICKNESS, 0),
        });
        Self {
            core,
            orientation,
            minimum: 0,
            maximum: 100,
            value: 0,
            step: 1,
            dec_machine: AbstractButtonState::new(),
            inc_machine: AbstractButtonState::new(),
            hovered_zone: None,
            dragging: None,
            repeat_timer: None,
            repeat_state: RepeatState::Normal,
            repeat_delta: 0,
            did_change: None,
        }
    }

    /// Lower bound of the value range.
    pub fn minimum(&self) -> i32 { self.minimum }

    /// Upper bound of the value range.
    pub fn maximum(&self) -> i32 { self.maximum }

    /// Current value, always within `[minimum, maximum]`.
    pub fn value(&self) -> i32 { self.value }

    /// Step applied by the buttons and the wheel.
    pub fn step(&self) -> i32 { self.step }

    /// Sets the step; values below 1 are raised to 1.
    pub fn set_step(&mut self, step: i32) { self.step = step.max(1); }

    /// Sets the range, re-clamping the current value. A maximum below the
    /// minimum collapses the range to a point.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.core.mark_dirty();
        self.set_value(self.value);
    }

    /// Clamps `value` into the range and stores it. The change callback fires
    /// exactly once when the clamped value differs from the previous one, and
    /// not at all otherwise.
    pub fn set_value(&mut self, value: i32) {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped == self.value {
            return;
        }
        self.value = clamped;
        self.core.mark_dirty();
        if let Some(callback) = self.did_change.as_mut() {
            callback(clamped);
        }
    }

    /// Moves the value up by one step, clamped at the maximum.
    pub fn step_up(&mut self) { self.set_value(self.value + self.step); }

    /// Moves the value down by one step, clamped at the minimum.
    pub fn step_down(&mut self) { self.set_value(self.value - self.step); }

    /// Installs the change callback, invoked with the new value.
    pub fn set_did_change(&mut self, callback: impl FnMut(i32) + 'static) { self.did_change = Some(Box::new(callback)); }

    /// Whether the decrement button reacts; disabled at the lower clamp.
    pub fn can_step_down(&self) -> bool { self.value > self.minimum }

    /// Whether the increment button reacts; disabled at the upper clamp.
    pub fn can_step_up(&self) -> bool { self.value < self.maximum }

    fn length(&self) -> i32 {
        let s = self.core.content.size();
        match self.orientation {
            Orientation::Horizontal => s.width,
            Orientation::Vertical => s.height,
        }
    }

    fn thickness(&self) -> i32 {
        let s = self.core.content.size();
        match self.orientation {
            Orientation::Horizontal => s.height,
            Orientation::Vertical => s.width,
        }
    }

    /// Step-button length: the buttons are square, so it equals the track
    /// thickness.
    pub fn button_size(&self) -> i32 { self.thickness() }

    fn available(&self) -> i32 { (self.length() - 2 * self.button_size()).max(0) }

    /// Derived thumb length and offset within the track. Two regimes: when
    /// the range fits the track, the thumb shrinks as the range grows and the
    /// offset maps 1:1 to the value; when the range exceeds the track, the
    /// thumb length reflects the viewport-to-content ratio and the offset is
    /// scaled proportionally (elevator behavior).
    pub fn thumb_geometry(&self) -> (i32, i32) {
        let available = self.available();
        let range = self.maximum - self.minimum;
        if range <= 0 || available <= 0 {
            return (available, 0);
        }
        if available >= range {
            let size = (available - range).max(self.button_size()).min(available);
            let offset = (self.value - self.minimum).min(available - size).max(0);
            (size, offset)
        } else {
            let visible = (range / self.step.max(1)).max(1);
            let size = ((available as i64 * visible as i64 / range as i64).max(Self::MIN_THUMB as i64).min(available as i64)) as i32;
            let offset = ((self.value - self.minimum) as i64 * (available - size) as i64 / range as i64) as i32;
            (size, offset)
        }
    }

    fn value_at_offset(&self, offset: i32) -> i32 {
        let available = self.available();
        let range = self.maximum - self.minimum;
        if range <= 0 {
            return self.minimum;
        }
        if available >= range {
            self.minimum + offset
        } else {
            let (size, _) = self.thumb_geometry();
            let span = available - size;
            if span <= 0 {
                return self.minimum;
            }
            self.minimum + (offset as i64 * range as i64 / span as i64) as i32
        }
    }

    fn main_coordinate(&self, event: &EventMouse) -> i32 {
        match self.orientation {
            Orientation::Horizontal => event.position.x,
            Orientation::Vertical => event.position.y,
        }
    }

    fn span_rect(&self, from: i32, len: i32) -> Recti {
        match self.orientation {
            Orientation::Horizontal => rect(from, 0, len, self.thickness()),
            Orientation::Vertical => rect(0, from, self.thickness(), len),
        }
    }

    fn zone_at(&self, p: i32) -> Option<Zone> {
        let b = self.button_size();
        let length = self.length();
        if p < 0 || p >= length {
            return None;
        }
        if p < b {
            return Some(Zone::Decrement);
        }
        if p >= length - b {
            return Some(Zone::Increment);
        }
        let (size, offset) = self.thumb_geometry();
        if p >= b + offset && p < b + offset + size { Some(Zone::Thumb) } else { Some(Zone::Track) }
    }

    fn sync_zone_hover(&mut self, zone: Option<Zone>) {
        if zone == self.hovered_zone {
            return;
        }
        match self.hovered_zone {
            Some(Zone::Decrement) => self.dec_machine.on_mouse_leave(),
            Some(Zone::Increment) => self.inc_machine.on_mouse_leave(),
            _ => {}
        }
        match zone {
            Some(Zone::Decrement) => self.dec_machine.on_mouse_enter(),
            Some(Zone::Increment) => self.inc_machine.on_mouse_enter(),
            _ => {}
        }
        self.hovered_zone = zone;
        self.core.mark_dirty();
    }

    fn apply_repeat_step(&mut self) {
        if self.repeat_delta < 0 {
            self.step_down();
        } else {
            self.step_up();
        }
    }

    fn arm_repeat(&mut self, delta: i32) {
        self.disarm_repeat();
        self.repeat_timer = self.core.start_timer(Button::AUTOREPEAT_START, None);
        if self.repeat_timer.is_some() {
            self.repeat_state = RepeatState::WaitForFirstRepeat;
            self.repeat_delta = delta;
        }
    }

    fn disarm_repeat(&mut self) {
        if let Some(id) = self.repeat_timer.take() {
            self.core.cancel_timer(id);
        }
        self.repeat_state = RepeatState::Normal;
    }

    fn drag_to(&mut self, offset: i32) { self.set_value(self.value_at_offset(offset)); }
}

impl Widget for ScrollBar {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, _font: &dyn FontProvider) {
        theme.draw_scrollbar_background(&mut self.core.content);
        let b = self.button_size();
        let length = self.length();
        let (dec_arrow, inc_arrow) = match self.orientation {
            Orientation::Horizontal => (ArrowDirection::Left, ArrowDirection::Right),
            Orientation::Vertical => (ArrowDirection::Up, ArrowDirection::Down),
        };
        let dec_rect = self.span_rect(0, b);
        let inc_rect = self.span_rect(length - b, b);
        let (can_down, can_up) = (self.can_step_down(), self.can_step_up());
        theme.draw_scrollbar_button(&mut self.core.content, dec_rect, dec_arrow, self.dec_machine.state(), can_down);
        theme.draw_scrollbar_button(&mut self.core.content, inc_rect, inc_arrow, self.inc_machine.state(), can_up);
        let (size, offset) = self.thumb_geometry();
        if size > 0 {
            let thumb = self.span_rect(b + offset, size);
            theme.draw_scrollbar_thumb(&mut self.core.content, thumb);
        }
    }

    fn on_hover(&mut self, event: &EventMouse) {
        let p = self.main_coordinate(event);
        if let Some(grab) = self.dragging {
            self.drag_to(p - self.button_size() - grab);
            return;
        }
        let zone = self.zone_at(p);
        self.sync_zone_hover(zone);
    }

    fn on_mouse_leave(&mut self) { self.sync_zone_hover(None); }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        match event.kind {
            MouseEventKind::Scroll => {
                self.set_value(self.value - event.scroll * self.step);
                Propagation::Handled
            }
            MouseEventKind::Press => {
                let p = self.main_coordinate(event);
                let zone = self.zone_at(p);
                self.sync_zone_hover(zone);
                match zone {
                    Some(Zone::Decrement) => {
                        self.dec_machine.on_mouse_click(event);
                        if self.can_step_down() {
                            self.step_down();
                            self.arm_repeat(-1);
                        }
                        self.core.mark_dirty();
                        Propagation::Handled
                    }
                    Some(Zone::Increment) => {
                        self.inc_machine.on_mouse_click(event);
                        if self.can_step_up() {
                            self.step_up();
                            self.arm_repeat(1);
                        }
                        self.core.mark_dirty();
                        Propagation::Handled
                    }
                    Some(Zone::Thumb) => {
                        let (_, offset) = self.thumb_geometry();
                        self.dragging = Some(p - self.button_size() - offset);
                        Propagation::Handled
                    }
                    Some(Zone::Track) => {
                        // jump so the thumb centers on the press point
                        let (size, _) = self.thumb_geometry();
                        self.drag_to(p - self.button_size() - size / 2);
                        Propagation::Handled
                    }
                    None => Propagation::Propagate,
                }
            }
            MouseEventKind::Release => {
                let was_interacting = self.dragging.is_some()
                    || self.dec_machine.state() == ButtonState::ClickedInside
                    || self.dec_machine.state() == ButtonState::ClickedOutside
                    || self.inc_machine.state() == ButtonState::ClickedInside
                    || self.inc_machine.state() == ButtonState::ClickedOutside;
                self.dragging = None;
                self.disarm_repeat();
                let zone = if event.is_local { self.zone_at(self.main_coordinate(event)) } else { None };
                let mut dec_event = *event;
                dec_event.is_local = zone == Some(Zone::Decrement);
                self.dec_machine.on_mouse_click(&dec_event);
                let mut inc_event = *event;
                inc_event.is_local = zone == Some(Zone::Increment);
                self.inc_machine.on_mouse_click(&inc_event);
                self.core.mark_dirty();
                if was_interacting { Propagation::Handled } else { Propagation::Propagate }
            }
            MouseEventKind::Move => Propagation::Propagate,
        }
    }

    fn on_timer(&mut self, timer: TimerId) {
        if self.repeat_timer != Some(timer) {
            return;
        }
        let machine = if self.repeat_delta < 0 { &self.dec_machine } else { &self.inc_machine };
        if machine.state() != ButtonState::ClickedInside {
            self.disarm_repeat();
            return;
        }
        match self.repeat_state {
            RepeatState::WaitForFirstRepeat => {
                self.apply_repeat_step();
                self.repeat_timer = self.core.start_timer(Button::AUTOREPEAT_INTERVAL, Some(Button::AUTOREPEAT_INTERVAL));
                self.repeat_state = RepeatState::Repeating;
            }
            RepeatState::Repeating => self.apply_repeat_step(),
            RepeatState::Normal => {}
        }
    }

    fn on_remove(&mut self) { self.disarm_repeat(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MouseButton;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn vertical(length: i32, minimum: i32, maximum: i32, step: i32) -> ScrollBar {
        let mut sb = ScrollBar::new(Orientation::Vertical);
        sb.core_mut().content_mut().resize(dim(16, length));
        sb.set_range(minimum, maximum);
        sb.set_step(step);
        sb
    }

    fn press_at(y: i32) -> EventMouse {
        let mut e = EventMouse::press(MouseButton::LEFT, 8, y);
        e.is_local = true;
        e
    }

    fn release_at(y: i32) -> EventMouse {
        let mut e = EventMouse::release(MouseButton::LEFT, 8, y);
        e.is_local = true;
        e
    }

    #[test]
    fn set_value_clamps_into_range() {
        let mut sb = vertical(132, 10, 50, 5);
        sb.set_value(7);
        assert_eq!(sb.value(), 10);
        sb.set_value(100);
        assert_eq!(sb.value(), 50);
        sb.set_value(30);
        assert_eq!(sb.value(), 30);
    }

    #[test]
    fn did_change_fires_once_per_effective_change() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut sb = vertical(132, 0, 10, 1);
        let sink = calls.clone();
        sb.set_did_change(move |v| sink.borrow_mut().push(v));
        sb.set_value(5);
        sb.set_value(5);
        sb.set_value(50); // clamps to 10
        sb.set_value(12); // clamps to 10 again: no change, no call
        assert_eq!(*calls.borrow(), vec![5, 10]);
    }

    #[test]
    fn stepping_clamps_and_disables_the_boundary_button() {
        let mut sb = vertical(132, 0, 10, 4);
        assert!(!sb.can_step_down());
        sb.step_up();
        sb.step_up();
        sb.step_up(); // 12 clamps to 10
        assert_eq!(sb.value(), 10);
        assert!(!sb.can_step_up());
        assert!(sb.can_step_down());
        sb.step_down();
        assert_eq!(sb.value(), 6);
    }

    #[test]
    fn thumb_direct_mapping_when_range_fits_the_track() {
        // track length 132 - 2*16 = 100, range 50 fits
        let mut sb = vertical(132, 0, 50, 1);
        let (size, offset) = sb.thumb_geometry();
        assert_eq!(size, 50);
        assert_eq!(offset, 0);
        sb.set_value(50);
        let (size, offset) = sb.thumb_geometry();
        assert_eq!(size, 50);
        assert_eq!(offset, 50);
        assert_eq!(offset + size, 100, "thumb ends at the track end");
    }

    #[test]
    fn thumb_proportional_mapping_when_range_exceeds_the_track() {
        let mut sb = vertical(132, 0, 1000, 20);
        let (size, offset) = sb.thumb_geometry();
        // available * visible / range = 100 * 50 / 1000 = 5, floored at 8
        assert_eq!(size, ScrollBar::MIN_THUMB);
        assert_eq!(offset, 0);
        sb.set_value(1000);
        let (size, offset) = sb.thumb_geometry();
        assert_eq!(offset, 100 - size, "thumb reaches the far end at maximum");
        sb.set_value(500);
        let (_, offset) = sb.thumb_geometry();
        assert_eq!(offset, 500i64 as i32 * (100 - size) / 1000);
    }

    #[test]
    fn wheel_scroll_moves_by_step() {
        let mut sb = vertical(132, 0, 100, 10);
        let mut e = EventMouse::scrolled(8, 50, -2);
        e.is_local = true;
        assert_eq!(sb.on_mouse_click(&e), Propagation::Handled);
        assert_eq!(sb.value(), 20);
    }

    #[test]
    fn button_press_steps_once() {
        let mut sb = vertical(132, 0, 100, 10);
        sb.set_value(50);
        // top button decrements
        assert_eq!(sb.on_mouse_click(&press_at(5)), Propagation::Handled);
        assert_eq!(sb.value(), 40);
        sb.on_mouse_click(&release_at(5));
        // bottom button increments
        sb.on_mouse_click(&press_at(130));
        assert_eq!(sb.value(), 50);
    }

    #[test]
    fn thumb_drag_tracks_the_pointer() {
        let mut sb = vertical(132, 0, 50, 1);
        // thumb is 50 long at offset 0; grab its middle at track pos 25
        sb.on_mouse_click(&press_at(16 + 25));
        let mut hover = EventMouse::moved(8, 16 + 45, true);
        hover.is_local = true;
        sb.on_hover(&hover);
        assert_eq!(sb.value(), 20);
        sb.on_mouse_click(&release_at(16 + 45));
        // after release the drag is over
        let mut hover = EventMouse::moved(8, 16 + 80, true);
        hover.is_local = true;
        sb.on_hover(&hover);
        assert_eq!(sb.value(), 20);
    }

    #[test]
    fn track_press_centers_the_thumb() {
        let mut sb = vertical(132, 0, 1000, 20);
        let (size, _) = sb.thumb_geometry();
        sb.on_mouse_click(&press_at(16 + 60));
        let expected = sb.value_at_offset(60 - size / 2);
        assert_eq!(sb.value(), expected);
    }
}
