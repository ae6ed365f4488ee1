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
use crate::{
    Bitmap, Color, EventKeyboard, EventMouse, FontProvider, LayoutItem, Position, Propagation, Recti, Size, Theme, TimerId, darker, dim, lighter, rect, vec2,
};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Border style drawn around a widget's surface edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameStyle {
    /// No border.
    None,
    /// A flat single-color outline.
    Flat,
    /// Light top/left and dark bottom/right edges.
    Raised,
    /// Dark top/left and light bottom/right edges.
    Sunken,
}

/// Border style plus thickness in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// How the border is shaded.
    pub style: FrameStyle,
    /// How many nested outline rectangles are drawn.
    pub thickness: i32,
}

impl Frame {
    /// No border at all.
    pub fn none() -> Self { Self { style: FrameStyle::None, thickness: 0 } }

    /// A raised bevel border of the given thickness.
    pub fn raised(thickness: i32) -> Self { Self { style: FrameStyle::Raised, thickness } }

    /// A sunken bevel border of the given thickness.
    pub fn sunken(thickness: i32) -> Self { Self { style: FrameStyle::Sunken, thickness } }

    /// A flat border of the given thickness.
    pub fn flat(thickness: i32) -> Self { Self { style: FrameStyle::Flat, thickness } }
}

pub(crate) enum TimerRequest {
    Start { id: TimerId, delay_ms: u64, interval_ms: Option<u64> },
    Cancel { id: TimerId },
}

/// Services the owning window exposes to its widgets: invalidation and timer
/// arming. Widgets hold a [`Weak`] reference, so a detached widget degrades
/// to no-ops instead of keeping the window alive.
pub struct WindowLink {
    invalidated: Cell<bool>,
    next_timer: Cell<u64>,
    timer_requests: RefCell<Vec<TimerRequest>>,
}

impl WindowLink {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self { invalidated: Cell::new(true), next_timer: Cell::new(1), timer_requests: RefCell::new(Vec::new()) })
    }

    /// Marks the window dirty; the next loop iteration recomposites.
    pub fn invalidate(&self) { self.invalidated.set(true); }

    pub(crate) fn take_invalidated(&self) -> bool { self.invalidated.replace(false) }

    pub(crate) fn is_invalidated(&self) -> bool { self.invalidated.get() }

    /// Queues a timer start. The window forwards the request to its timer
    /// host the next time it pumps; firings come back through `on_timer` on
    /// the dispatch thread.
    pub fn start_timer(&self, delay_ms: u64, interval_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_timer.get());
        self.next_timer.set(self.next_timer.get() + 1);
        self.timer_requests.borrow_mut().push(TimerRequest::Start { id, delay_ms, interval_ms });
        id
    }

    /// Queues a timer cancellation.
    pub fn cancel_timer(&self, id: TimerId) { self.timer_requests.borrow_mut().push(TimerRequest::Cancel { id }); }

    pub(crate) fn drain_timer_requests(&self) -> Vec<TimerRequest> { self.timer_requests.borrow_mut().drain(..).collect() }
}

/// Shared state every widget carries: its render surface, position, border,
/// child widgets, layout, and the bookkeeping flags the window reads during
/// dispatch. Concrete widgets embed one and hand it out through
/// [`Widget::core`]/[`Widget::core_mut`].
pub struct WidgetCore {
    pub(crate) content: Bitmap,
    pub(crate) position: Position,
    pub(crate) frame: Frame,
    pub(crate) layout: Option<Box<dyn LayoutItem>>,
    pub(crate) children: Vec<WidgetHandle>,
    pub(crate) can_focus: bool,
    pub(crate) has_focus: bool,
    pub(crate) mouse_over: bool,
    pub(crate) visible: bool,
    pub(crate) draw_background: bool,
    pub(crate) needs_redraw: bool,
    pub(crate) weight: f32,
    pub(crate) hint: Size,
    pub(crate) focus_index: usize,
    pub(crate) window: Weak<WindowLink>,
}

impl WidgetCore {
    /// Creates core state with a surface of the given size and background.
    pub fn new(size: Size, background_color: Color) -> Self {
        Self {
            content: Bitmap::new(size, background_color),
            position: vec2(0, 0),
            frame: Frame::none(),
            layout: None,
            children: Vec::new(),
            can_focus: false,
            has_focus: false,
            mouse_over: false,
            visible: true,
            draw_background: true,
            needs_redraw: true,
            weight: 1.0,
            hint: dim(0, 0),
            focus_index: usize::MAX,
            window: Weak::new(),
        }
    }

    /// The widget's render surface.
    pub fn content(&self) -> &Bitmap { &self.content }

    /// Mutable access to the render surface.
    pub fn content_mut(&mut self) -> &mut Bitmap { &mut self.content }

    /// Position relative to the parent (the window for top-level widgets).
    pub fn position(&self) -> Position { self.position }

    /// Moves the widget. The parent composites from the new position on the
    /// next draw.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.mark_dirty();
    }

    /// Current surface size.
    pub fn size(&self) -> Size { self.content.size() }

    /// The widget's box in parent coordinates.
    pub fn rect(&self) -> Recti {
        let s = self.content.size();
        rect(self.position.x, self.position.y, s.width, s.height)
    }

    /// Current border.
    pub fn frame(&self) -> Frame { self.frame }

    /// Changes the border.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.mark_dirty();
    }

    /// Whether the widget is drawn and hit-testable.
    pub fn visible(&self) -> bool { self.visible }

    /// Shows or hides the widget. Hidden widgets are skipped by layouts.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.mark_dirty();
        }
    }

    /// Whether this widget participates in Tab cycling.
    pub fn can_focus(&self) -> bool { self.can_focus }

    /// Opts the widget in or out of focus handling.
    pub fn set_can_focus(&mut self, can_focus: bool) { self.can_focus = can_focus; }

    /// Whether the widget currently holds keyboard focus.
    pub fn has_focus(&self) -> bool { self.has_focus }

    /// Whether the pointer is currently over the widget.
    pub fn mouse_over(&self) -> bool { self.mouse_over }

    /// Whether the base draw clears the surface first.
    pub fn set_draw_background(&mut self, draw: bool) { self.draw_background = draw; }

    /// The dirty flag. Never inferred from other state.
    pub fn needs_redraw(&self) -> bool { self.needs_redraw }

    /// Sets the dirty flag and invalidates the owning window.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
        if let Some(link) = self.window.upgrade() {
            link.invalidate();
        }
    }

    /// Fixed size request reported by the base `size_hint`. Zero components
    /// mean "flexible".
    pub fn set_size_hint(&mut self, hint: Size) { self.hint = hint; }

    /// Layout weight relative to flexible siblings.
    pub fn set_weight(&mut self, weight: f32) { self.weight = weight; }

    /// Installs the layout arranging this widget's children. Coordinates the
    /// layout assigns are relative to this widget's surface.
    pub fn set_layout(&mut self, layout: Box<dyn LayoutItem>) { self.layout = Some(layout); }

    /// Appends a shared child widget, drawn into and positioned relative to
    /// this widget's surface.
    pub fn add_child(&mut self, child: WidgetHandle) {
        if let Some(link) = self.window.upgrade() {
            child.with_mut(|w| w.core_mut().set_window(&link));
        }
        self.children.push(child);
    }

    /// The child widgets in insertion order.
    pub fn children(&self) -> &[WidgetHandle] { &self.children }

    /// Tab-order index assigned by the window at insertion, monotonically
    /// increasing and never reused.
    pub fn focus_index(&self) -> usize { self.focus_index }

    pub(crate) fn set_window(&mut self, link: &Rc<WindowLink>) {
        self.window = Rc::downgrade(link);
        for child in &self.children {
            child.with_mut(|w| w.core_mut().set_window(link));
        }
    }

    /// Arms a timer through the owning window. Returns `None` when the widget
    /// is not attached to a window, in which case callers skip the timed
    /// behavior.
    pub fn start_timer(&self, delay_ms: u64, interval_ms: Option<u64>) -> Option<TimerId> {
        self.window.upgrade().map(|link| link.start_timer(delay_ms, interval_ms))
    }

    /// Cancels a timer previously armed with [`WidgetCore::start_timer`].
    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(link) = self.window.upgrade() {
            link.cancel_timer(id);
        }
    }
}

/// A positioned, sized, drawable, input-receiving node in the UI tree. The
/// base implementations supply shared behavior (background, frame, child
/// compositing, propagation defaults); concrete widgets override the hooks
/// they care about and call through or return [`Propagation::Propagate`]
/// when they intend to let an event bubble.
pub trait Widget {
    /// Shared widget state.
    fn core(&self) -> &WidgetCore;

    /// Mutable shared widget state.
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Repaints the surface. The base clears the background, draws the
    /// frame, and composites visible children.
    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        let core = self.core_mut();
        if core.draw_background {
            core.content.clear();
        }
        paint_frame(core);
        draw_children(core, theme, font);
    }

    /// A mouse press, release, or wheel turn. Presses arrive only on the
    /// first-hit widget with local coordinates; releases are broadcast to
    /// every widget with `is_local` reflecting containment.
    fn on_mouse_click(&mut self, _event: &EventMouse) -> Propagation { Propagation::Propagate }

    /// The pointer entered the widget's box.
    fn on_mouse_enter(&mut self) {}

    /// The pointer left the widget's box.
    fn on_mouse_leave(&mut self) {}

    /// The pointer moved inside the widget's box.
    fn on_hover(&mut self, _event: &EventMouse) {}

    /// A key event delivered to the focused widget.
    fn on_keyboard(&mut self, _event: &EventKeyboard) -> Propagation { Propagation::Propagate }

    /// Focus was gained or lost.
    fn on_focus_changed(&mut self, _focused: bool) {}

    /// The surface was resized by a layout or the window.
    fn on_resize(&mut self) {}

    /// The owning window is closing.
    fn on_remove(&mut self) {}

    /// A timer fired on the dispatch thread. Widgets compare `timer` against
    /// the ids they armed and re-check their own state before acting, since a
    /// firing may have raced a cancellation.
    fn on_timer(&mut self, _timer: TimerId) {}

    /// The size the widget wants; zero components mean "flexible".
    fn size_hint(&self) -> Size { self.core().hint }
}

/// Clears nothing, draws the widget's border into its own surface.
pub(crate) fn paint_frame(core: &mut WidgetCore) {
    if core.frame.thickness <= 0 || core.frame.style == FrameStyle::None {
        return;
    }
    let bg = core.content.background_color();
    let (top_left, bottom_right) = match core.frame.style {
        FrameStyle::Raised => (lighter(bg, 25.0), darker(bg, 25.0)),
        FrameStyle::Sunken => (darker(bg, 25.0), lighter(bg, 25.0)),
        _ => (darker(bg, 40.0), darker(bg, 40.0)),
    };
    let s = core.content.size();
    for i in 0..core.frame.thickness {
        core.content.draw_rectangle(rect(i, i, s.width - i * 2, s.height - i * 2), top_left, bottom_right);
    }
}

/// Redraws dirty visible children and composites every visible child into
/// `core`'s surface. Compositing always runs because a sibling's redraw can
/// overlap a clean child.
pub(crate) fn draw_children(core: &mut WidgetCore, theme: &dyn Theme, font: &dyn FontProvider) {
    let WidgetCore { content, children, .. } = core;
    for child in children.iter() {
        child.with_mut(|w| {
            if !w.core().visible {
                return;
            }
            if w.core().needs_redraw {
                w.draw(theme, font);
                w.core_mut().needs_redraw = false;
            }
            content.draw(w.core().position, &w.core().content);
        });
    }
}

/// Shared handle to a widget. The window's top-level list and a parent's
/// layout node may both hold one; the widget lives as long as either holder
/// does, while back-references stay weak.
#[derive(Clone)]
pub struct WidgetHandle(Rc<RefCell<dyn Widget>>);

impl WidgetHandle {
    /// Wraps a widget in a fresh shared handle.
    pub fn new<W: Widget + 'static>(widget: W) -> Self { Self(Rc::new(RefCell::new(widget))) }

    /// Wraps an already shared widget, preserving identity with other clones
    /// of the same `Rc`. Adapters use this to keep typed access to widgets
    /// they hand out as handles.
    pub fn from_shared<W: Widget + 'static>(widget: Rc<RefCell<W>>) -> Self { Self(widget) }

    /// Executes `f` with a shared borrow of the widget.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Widget) -> R) -> R { f(&*self.0.borrow()) }

    /// Executes `f` with a mutable borrow of the widget.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Widget) -> R) -> R { f(&mut *self.0.borrow_mut()) }

    /// Returns `true` when both handles refer to the same widget.
    pub fn ptr_eq(&self, other: &WidgetHandle) -> bool { Rc::ptr_eq(&self.0, &other.0) }

    /// The widget's box in parent coordinates.
    pub fn rect(&self) -> Recti { self.with(|w| w.core().rect()) }
}

impl LayoutItem for WidgetHandle {
    fn relayout(&mut self, position: Position, size: Size) {
        self.with_mut(|w| {
            let core = w.core_mut();
            core.position = position;
            let size = dim(size.width.max(0), size.height.max(0));
            let old = core.content.size();
            if old.width != size.width || old.height != size.height {
                core.content.resize(size);
                core.needs_redraw = true;
            }
            if let Some(layout) = core.layout.as_mut() {
                layout.relayout(vec2(0, 0), size);
            }
            w.on_resize();
        });
    }

    fn size_hint(&self) -> Size { self.with(|w| w.size_hint()) }

    fn ignore_layout(&self) -> bool { self.with(|w| !w.core().visible) }

    fn weight(&self) -> f32 { self.with(|w| w.core().weight) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BevelTheme, NullFont, Panel, rgb};

    #[test]
    fn relayout_resizes_surface_and_marks_dirty() {
        let mut handle = WidgetHandle::new(Panel::new(dim(10, 10), rgb(0, 0, 0)));
        handle.with_mut(|w| w.core_mut().needs_redraw = false);
        handle.relayout(vec2(5, 7), dim(30, 20));
        handle.with(|w| {
            assert_eq!((w.core().position().x, w.core().position().y), (5, 7));
            assert_eq!(w.core().size().width, 30);
            assert!(w.core().needs_redraw());
        });
    }

    #[test]
    fn relayout_same_size_keeps_clean_surface() {
        let mut handle = WidgetHandle::new(Panel::new(dim(30, 20), rgb(0, 0, 0)));
        handle.with_mut(|w| w.core_mut().needs_redraw = false);
        handle.relayout(vec2(0, 0), dim(30, 20));
        handle.with(|w| assert!(!w.core().needs_redraw()));
    }

    #[test]
    fn hidden_widgets_are_ignored_by_layouts() {
        let handle = WidgetHandle::new(Panel::new(dim(10, 10), rgb(0, 0, 0)));
        assert!(!handle.ignore_layout());
        handle.with_mut(|w| w.core_mut().set_visible(false));
        assert!(handle.ignore_layout());
    }

    #[test]
    fn base_draw_composites_children() {
        let theme = BevelTheme::new();
        let font = NullFont::new();
        let mut parent = Panel::new(dim(20, 20), rgb(0, 0, 0));
        let mut child = Panel::new(dim(5, 5), rgb(255, 0, 0));
        child.core_mut().set_position(vec2(10, 10));
        parent.core_mut().add_child(WidgetHandle::new(child));
        parent.draw(&theme, &font);
        assert_eq!(parent.core().content().get_pixel(12, 12), rgb(255, 0, 0));
        assert_eq!(parent.core().content().get_pixel(2, 2), rgb(0, 0, 0));
    }

    #[test]
    fn window_link_reaches_nested_children() {
        let link = WindowLink::new();
        let mut parent = Panel::new(dim(20, 20), rgb(0, 0, 0));
        let child = WidgetHandle::new(Panel::new(dim(5, 5), rgb(0, 0, 0)));
        parent.core_mut().add_child(child.clone());
        parent.core_mut().set_window(&link);
        assert!(child.with(|w| w.core().start_timer(10, None)).is_some());
        // attaching after the link is set wires the new child too
        let late = WidgetHandle::new(Panel::new(dim(5, 5), rgb(0, 0, 0)));
        parent.core_mut().add_child(late.clone());
        assert!(late.with(|w| w.core().start_timer(10, None)).is_some());
    }

    #[test]
    fn window_link_timer_requests_queue_up() {
        let link = WindowLink::new();
        let a = link.start_timer(100, None);
        let b = link.start_timer(50, Some(25));
        assert_ne!(a, b);
        link.cancel_timer(a);
        let reqs = link.drain_timer_requests();
        assert_eq!(reqs.len(), 3);
        assert!(link.drain_timer_requests().is_empty());
    }
}
