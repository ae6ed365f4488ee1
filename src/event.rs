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
use crate::{Position, Size, vec2};

use bitflags::bitflags;

/// Outcome of a keyboard or mouse-click handler. `Handled` stops the event
/// from bubbling further; widgets overriding a handler call the base
/// implementation (or return `Propagate`) when they intend to pass the event
/// on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The event was consumed; dispatch stops here.
    Handled,
    /// The event was not consumed and may bubble further.
    Propagate,
}

impl Propagation {
    /// Returns `true` when the event was consumed.
    pub fn is_handled(self) -> bool { self == Self::Handled }
}

/// Kind of pointer interaction carried by an [`EventMouse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// The pointer moved.
    Move,
    /// The wheel turned; `EventMouse::scroll` holds the notch delta.
    Scroll,
}

bitflags! {
    /// Mouse button bits as reported by the platform backend.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle button bit is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right button bit is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left button bit is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no button bit is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

/// Pointer event delivered by the platform backend and re-dispatched to
/// widgets in widget-local coordinates.
#[derive(Copy, Clone, Debug)]
pub struct EventMouse {
    /// What happened.
    pub kind: MouseEventKind,
    /// Whether a button is held after this event.
    pub pressed: bool,
    /// The button that changed (Press/Release) or is held (Move).
    pub button: MouseButton,
    /// Pointer position. Window-relative at the backend boundary; translated
    /// to widget-local coordinates before a widget sees it.
    pub position: Position,
    /// Wheel notches for `Scroll` events, positive away from the user.
    pub scroll: i32,
    /// `true` when `position` is widget-local and inside the receiving
    /// widget's bounds; `false` for the broadcast delivery of releases that
    /// happened outside.
    pub is_local: bool,
}

impl EventMouse {
    /// Creates a window-relative press event.
    pub fn press(button: MouseButton, x: i32, y: i32) -> Self {
        Self { kind: MouseEventKind::Press, pressed: true, button, position: vec2(x, y), scroll: 0, is_local: false }
    }

    /// Creates a window-relative release event.
    pub fn release(button: MouseButton, x: i32, y: i32) -> Self {
        Self { kind: MouseEventKind::Release, pressed: false, button, position: vec2(x, y), scroll: 0, is_local: false }
    }

    /// Creates a window-relative move event.
    pub fn moved(x: i32, y: i32, pressed: bool) -> Self {
        Self {
            kind: MouseEventKind::Move,
            pressed,
            button: if pressed { MouseButton::LEFT } else { MouseButton::NONE },
            position: vec2(x, y),
            scroll: 0,
            is_local: false,
        }
    }

    /// Creates a window-relative wheel event.
    pub fn scrolled(x: i32, y: i32, notches: i32) -> Self {
        Self { kind: MouseEventKind::Scroll, pressed: false, button: MouseButton::NONE, position: vec2(x, y), scroll: notches, is_local: false }
    }

    /// Returns a copy translated into the local space of a widget at
    /// `origin`, with `is_local` set from containment.
    pub fn to_local(&self, origin: Position, inside: bool) -> Self {
        let mut ev = *self;
        ev.position = vec2(self.position.x - origin.x, self.position.y - origin.y);
        ev.is_local = inside;
        ev
    }
}

/// Logical key identities delivered to widgets. Printable input arrives as
/// `Char`; the platform backend is responsible for translating its native
/// keysyms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character (including space).
    Char(char),
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Tab, consumed by the window for focus cycling.
    Tab,
    /// Return/Enter.
    Return,
    /// Escape.
    Escape,
}

bitflags! {
    /// Modifier key state accompanying a keyboard event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct KeyModifiers : u32 {
        /// Alt held.
        const ALT = 4;
        /// Control held.
        const CTRL = 2;
        /// Shift held.
        const SHIFT = 1;
        /// No modifiers.
        const NONE = 0;
    }
}

impl KeyModifiers {
    /// Returns `true` if no modifier is held.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

/// Keyboard event delivered to the focused widget.
#[derive(Copy, Clone, Debug)]
pub struct EventKeyboard {
    /// Logical key identity.
    pub key: Key,
    /// `true` for key-down, `false` for key-up.
    pub keydown: bool,
    /// Modifier state at the time of the event.
    pub modifiers: KeyModifiers,
}

impl EventKeyboard {
    /// Creates a key-down event without modifiers.
    pub fn down(key: Key) -> Self { Self { key, keydown: true, modifiers: KeyModifiers::NONE } }

    /// Creates a key-up event without modifiers.
    pub fn up(key: Key) -> Self { Self { key, keydown: false, modifiers: KeyModifiers::NONE } }
}

/// Window geometry change delivered by the platform backend.
#[derive(Copy, Clone, Debug)]
pub struct EventResize {
    /// New client-area size.
    pub size: Size,
    /// New window position on the native desktop.
    pub position: Position,
}
