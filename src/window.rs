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
    Bitmap, EventKeyboard, EventMouse, EventResize, FontProvider, Key, LayoutItem, MIN_WINDOW_SIZE, MouseEventKind, Propagation, Size, Theme, TimerHost,
    TimerId, TimerRequest, WidgetHandle, WindowLink, dim, expand_rect, point_in_rect, vec2,
};

use std::rc::Rc;

/// The top-level dispatcher: owns the back buffer, the root widget, the flat
/// top-level widget list, and the focus/hover bookkeeping. A platform backend
/// feeds it raw events and blits [`PlatformWindow::content`] onto the native
/// surface after [`PlatformWindow::draw`].
///
/// The root `main_widget` is the layout anchor and backdrop; it is not
/// hit-tested. Interactive widgets are registered flat through
/// [`PlatformWindow::add_widget`] and positioned in window coordinates,
/// typically by the root widget's layout referencing the same handles.
pub struct PlatformWindow {
    title: String,
    content: Bitmap,
    widgets: Vec<WidgetHandle>,
    main_widget: Option<WidgetHandle>,
    focus: Option<WidgetHandle>,
    last_overed: Option<WidgetHandle>,
    theme: Box<dyn Theme>,
    font: Rc<dyn FontProvider>,
    link: Rc<WindowLink>,
    timers: Option<Box<dyn TimerHost>>,
    next_focus_index: usize,
}

impl PlatformWindow {
    /// Creates a window with an owned back buffer of the given size.
    pub fn new(title: &str, size: Size, theme: Box<dyn Theme>, font: Rc<dyn FontProvider>) -> Self {
        Self {
            title: title.into(),
            content: Bitmap::new(size, 0),
            widgets: Vec::new(),
            main_widget: None,
            focus: None,
            last_overed: None,
            theme,
            font,
            link: WindowLink::new(),
            timers: None,
            next_focus_index: 0,
        }
    }

    /// The window title a backend shows on the native frame.
    pub fn title(&self) -> &str { &self.title }

    /// The composited back buffer (packed RGBA, row-major, stride = width).
    pub fn content(&self) -> &Bitmap { &self.content }

    /// Current client-area size.
    pub fn size(&self) -> Size { self.content.size() }

    /// The active theme.
    pub fn theme(&self) -> &dyn Theme { &*self.theme }

    /// The active font provider.
    pub fn font(&self) -> Rc<dyn FontProvider> { self.font.clone() }

    /// The services handle widgets use for invalidation and timers.
    pub fn link(&self) -> Rc<WindowLink> { self.link.clone() }

    /// Installs the timer host firing into the backend's queue.
    pub fn set_timer_host(&mut self, host: Box<dyn TimerHost>) { self.timers = Some(host); }

    /// Registers a top-level widget. The widget is assigned the next focus
    /// index (monotonic, never reused, so insertion order defines tab order
    /// even after removals) and wired to this window's services.
    pub fn add_widget(&mut self, widget: WidgetHandle) {
        widget.with_mut(|w| {
            let core = w.core_mut();
            core.focus_index = self.next_focus_index;
            core.set_window(&self.link);
        });
        self.next_focus_index += 1;
        self.widgets.push(widget);
        self.link.invalidate();
    }

    /// Installs the root widget: the backdrop whose layout arranges the
    /// top-level widgets. It is relayouted to the full client area on every
    /// resize and composited first; it never receives pointer events.
    pub fn set_main_widget(&mut self, widget: WidgetHandle) {
        widget.with_mut(|w| w.core_mut().set_window(&self.link));
        let mut handle = widget.clone();
        let size = self.content.size();
        handle.relayout(vec2(0, 0), size);
        self.main_widget = Some(widget);
        self.link.invalidate();
    }

    /// The currently focused widget, if any.
    pub fn focused(&self) -> Option<WidgetHandle> { self.focus.clone() }

    /// Moves keyboard focus to `widget`. The previous holder is notified
    /// first; widgets with `can_focus` unset are left alone.
    pub fn focus_widget(&mut self, widget: &WidgetHandle) {
        if !widget.with(|w| w.core().can_focus() && w.core().visible()) {
            return;
        }
        if let Some(old) = &self.focus {
            if old.ptr_eq(widget) {
                return;
            }
        }
        self.drop_focus();
        widget.with_mut(|w| {
            w.core_mut().has_focus = true;
            w.core_mut().mark_dirty();
            w.on_focus_changed(true);
        });
        self.focus = Some(widget.clone());
        self.link.invalidate();
    }

    fn drop_focus(&mut self) {
        if let Some(old) = self.focus.take() {
            old.with_mut(|w| {
                w.core_mut().has_focus = false;
                w.core_mut().mark_dirty();
                w.on_focus_changed(false);
            });
        }
    }

    /// Finds the focusable widget with the smallest focus index strictly
    /// greater than the current one, wrapping to the global minimum.
    fn cycle_focus(&mut self) {
        let current = self.focus.as_ref().map(|h| h.with(|w| w.core().focus_index()));
        let mut next: Option<(usize, WidgetHandle)> = None;
        let mut first: Option<(usize, WidgetHandle)> = None;
        for handle in &self.widgets {
            let (index, focusable) = handle.with(|w| (w.core().focus_index(), w.core().can_focus() && w.core().visible()));
            if !focusable {
                continue;
            }
            if first.as_ref().is_none_or(|(i, _)| index < *i) {
                first = Some((index, handle.clone()));
            }
            if let Some(current) = current {
                if index > current && next.as_ref().is_none_or(|(i, _)| index < *i) {
                    next = Some((index, handle.clone()));
                }
            }
        }
        if let Some((_, handle)) = next.or(first) {
            self.focus_widget(&handle);
        }
    }

    fn hit_test(&self, x: i32, y: i32) -> Option<WidgetHandle> {
        self.widgets
            .iter()
            .find(|h| h.with(|w| w.core().visible() && point_in_rect(vec2(x, y), w.core().rect())))
            .cloned()
    }

    /// Routes a raw pointer event. Press, move, and scroll go to the first
    /// widget whose box contains the point, translated to local coordinates,
    /// after enter/leave bookkeeping against the previously hovered widget.
    /// Release is broadcast to every widget with `is_local` reflecting
    /// containment, so a widget mid-interaction sees the release even when
    /// the pointer left its bounds.
    pub fn on_mouse(&mut self, event: &EventMouse) {
        match event.kind {
            MouseEventKind::Release => {
                for handle in self.widgets.clone() {
                    let (position, inside) =
                        handle.with(|w| (w.core().position(), w.core().visible() && point_in_rect(event.position, w.core().rect())));
                    let local = if inside { event.to_local(position, true) } else { *event };
                    handle.with_mut(|w| {
                        w.on_mouse_click(&local);
                    });
                }
            }
            MouseEventKind::Press | MouseEventKind::Move | MouseEventKind::Scroll => {
                let hit = self.hit_test(event.position.x, event.position.y);
                if let Some(prev) = &self.last_overed {
                    let still = hit.as_ref().is_some_and(|h| h.ptr_eq(prev));
                    if !still {
                        let prev = prev.clone();
                        prev.with_mut(|w| {
                            w.core_mut().mouse_over = false;
                            w.on_mouse_leave();
                        });
                        self.last_overed = None;
                    }
                }
                let handle = match hit {
                    Some(handle) => handle,
                    None => return,
                };
                let position = handle.with(|w| w.core().position());
                let local = event.to_local(position, true);
                handle.with_mut(|w| {
                    if !w.core().mouse_over {
                        w.core_mut().mouse_over = true;
                        w.on_mouse_enter();
                    }
                    match event.kind {
                        MouseEventKind::Move => w.on_hover(&local),
                        _ => {
                            w.on_mouse_click(&local);
                        }
                    }
                });
                self.last_overed = Some(handle);
            }
        }
    }

    /// Routes a raw keyboard event. Tab on key-down cycles focus; everything
    /// else goes to the focused widget.
    pub fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if event.keydown && event.key == Key::Tab {
            self.cycle_focus();
            return Propagation::Handled;
        }
        match &self.focus {
            Some(handle) => handle.with_mut(|w| w.on_keyboard(event)),
            None => Propagation::Propagate,
        }
    }

    /// Resizes the back buffer and relayouts the root widget.
    pub fn on_resize(&mut self, event: &EventResize) {
        let size = dim(event.size.width.max(MIN_WINDOW_SIZE.width), event.size.height.max(MIN_WINDOW_SIZE.height));
        self.content.resize(size);
        if let Some(main) = self.main_widget.clone() {
            let mut handle = main;
            handle.relayout(vec2(0, 0), size);
        }
        self.link.invalidate();
    }

    /// Notifies every widget the window is going away, then clears the tree.
    pub fn on_close(&mut self) {
        if let Some(main) = &self.main_widget {
            main.with_mut(|w| w.on_remove());
        }
        for handle in &self.widgets {
            handle.with_mut(|w| w.on_remove());
        }
        self.main_widget = None;
        self.focus = None;
        self.last_overed = None;
        self.widgets.clear();
    }

    /// Whether anything changed since the last [`PlatformWindow::draw`].
    pub fn needs_redraw(&self) -> bool { self.link.is_invalidated() }

    /// Redraws dirty widgets and recomposites every visible widget into the
    /// back buffer. Compositing always covers the full list because a
    /// sibling's redraw can overlap a clean widget.
    pub fn draw(&mut self) {
        self.link.take_invalidated();
        self.theme.draw_window_background(&mut self.content);
        let widgets: Vec<WidgetHandle> = self.main_widget.iter().chain(self.widgets.iter()).cloned().collect();
        for handle in &widgets {
            handle.with_mut(|w| {
                if !w.core().visible() {
                    return;
                }
                if w.core().needs_redraw() {
                    w.draw(&*self.theme, &*self.font);
                    w.core_mut().needs_redraw = false;
                }
                self.content.draw(w.core().position(), w.core().content());
            });
        }
        if self.theme.needs_frame_for_focus() {
            if let Some(focused) = &self.focus {
                let r = focused.rect();
                self.theme.draw_focus_frame(&mut self.content, expand_rect(r, 2));
            }
        }
    }

    /// Forwards queued widget timer requests to the installed host. Failures
    /// degrade the timed behavior rather than propagating: the widget simply
    /// never sees the firing.
    pub fn pump_timers(&mut self) {
        let requests = self.link.drain_timer_requests();
        if requests.is_empty() {
            return;
        }
        let host = match self.timers.as_mut() {
            Some(host) => host,
            None => {
                tracing::warn!("timer request dropped: no timer host installed");
                return;
            }
        };
        for request in requests {
            match request {
                TimerRequest::Start { id, delay_ms, interval_ms } => {
                    if let Err(e) = host.start(id, delay_ms, interval_ms) {
                        tracing::warn!("timer {id:?} could not be armed: {e}");
                    }
                }
                TimerRequest::Cancel { id } => host.cancel(id),
            }
        }
    }

    /// Dispatches a marshaled timer firing on the event-loop thread. The
    /// firing is broadcast; widgets match the id against the timers they
    /// armed and re-check their own state before acting.
    pub fn process_timer(&mut self, id: TimerId) {
        let widgets: Vec<WidgetHandle> = self.main_widget.iter().chain(self.widgets.iter()).cloned().collect();
        for handle in widgets {
            handle.with_mut(|w| w.on_timer(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BevelTheme, NullFont, Panel, WidgetCore, rgb};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        core: WidgetCore,
        log: Rc<RefCell<Vec<String>>>,
        name: &'static str,
    }

    impl Probe {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            let mut core = WidgetCore::new(dim(20, 20), rgb(0, 0, 0));
            core.set_can_focus(true);
            Self { core, log: log.clone(), name }
        }

        fn record(&self, what: String) { self.log.borrow_mut().push(format!("{}:{}", self.name, what)); }
    }

    impl crate::Widget for Probe {
        fn core(&self) -> &WidgetCore { &self.core }
        fn core_mut(&mut self) -> &mut WidgetCore { &mut self.core }

        fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
            self.record(format!("click({:?},local={},{},{})", event.kind, event.is_local, event.position.x, event.position.y));
            Propagation::Handled
        }

        fn on_mouse_enter(&mut self) { self.record("enter".into()); }
        fn on_mouse_leave(&mut self) { self.record("leave".into()); }
        fn on_hover(&mut self, _event: &EventMouse) { self.record("hover".into()); }
        fn on_focus_changed(&mut self, focused: bool) { self.record(format!("focus={focused}")); }
        fn on_remove(&mut self) { self.record("remove".into()); }
    }

    fn window() -> PlatformWindow { PlatformWindow::new("test", dim(100, 100), Box::new(BevelTheme::new()), Rc::new(NullFont::new())) }

    fn place(window: &mut PlatformWindow, probe: Probe, x: i32, y: i32) -> WidgetHandle {
        let handle = WidgetHandle::new(probe);
        handle.with_mut(|w| w.core_mut().set_position(vec2(x, y)));
        window.add_widget(handle.clone());
        handle
    }

    #[test]
    fn press_goes_to_first_hit_only_with_local_coordinates() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        place(&mut win, Probe::new("a", &log), 0, 0);
        place(&mut win, Probe::new("b", &log), 50, 0);
        win.on_mouse(&EventMouse::press(crate::MouseButton::LEFT, 55, 5));
        let log = log.borrow();
        assert_eq!(*log, vec!["b:enter".to_string(), "b:click(Press,local=true,5,5)".to_string()]);
    }

    #[test]
    fn release_is_broadcast_to_every_widget() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        place(&mut win, Probe::new("a", &log), 0, 0);
        place(&mut win, Probe::new("b", &log), 50, 0);
        win.on_mouse(&EventMouse::release(crate::MouseButton::LEFT, 5, 5));
        let log = log.borrow();
        assert_eq!(
            *log,
            vec!["a:click(Release,local=true,5,5)".to_string(), "b:click(Release,local=false,5,5)".to_string()]
        );
    }

    #[test]
    fn hover_tracking_delivers_enter_and_leave() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        place(&mut win, Probe::new("a", &log), 0, 0);
        place(&mut win, Probe::new("b", &log), 50, 0);
        win.on_mouse(&EventMouse::moved(5, 5, false));
        win.on_mouse(&EventMouse::moved(55, 5, false));
        win.on_mouse(&EventMouse::moved(5, 50, false));
        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                "a:enter".to_string(),
                "a:hover".to_string(),
                "a:leave".to_string(),
                "b:enter".to_string(),
                "b:hover".to_string(),
                "b:leave".to_string(),
            ]
        );
    }

    #[test]
    fn tab_cycles_in_insertion_order_and_wraps() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        let a = place(&mut win, Probe::new("a", &log), 0, 0);
        let b = place(&mut win, Probe::new("b", &log), 30, 0);
        let c = place(&mut win, Probe::new("c", &log), 60, 0);
        let tab = EventKeyboard::down(Key::Tab);
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&a));
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&b));
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&c));
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&a), "tab wraps to the first focusable widget");
    }

    #[test]
    fn tab_skips_unfocusable_and_hidden_widgets() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        let a = place(&mut win, Probe::new("a", &log), 0, 0);
        let b = place(&mut win, Probe::new("b", &log), 30, 0);
        let c = place(&mut win, Probe::new("c", &log), 60, 0);
        b.with_mut(|w| w.core_mut().set_visible(false));
        let tab = EventKeyboard::down(Key::Tab);
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&a));
        win.on_keyboard(&tab);
        assert!(win.focused().unwrap().ptr_eq(&c));
    }

    #[test]
    fn keyboard_goes_to_the_focused_widget() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        let a = place(&mut win, Probe::new("a", &log), 0, 0);
        win.focus_widget(&a);
        assert_eq!(win.on_keyboard(&EventKeyboard::down(Key::Return)), Propagation::Propagate);
        assert!(log.borrow().iter().any(|l| l == "a:focus=true"));
    }

    #[test]
    fn close_notifies_every_widget() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut win = window();
        place(&mut win, Probe::new("a", &log), 0, 0);
        place(&mut win, Probe::new("b", &log), 50, 0);
        win.on_close();
        let log = log.borrow();
        assert!(log.contains(&"a:remove".to_string()));
        assert!(log.contains(&"b:remove".to_string()));
    }

    #[test]
    fn draw_composites_clean_widgets_too() {
        let mut win = window();
        let panel = WidgetHandle::new(Panel::new(dim(10, 10), rgb(1, 2, 3)));
        panel.with_mut(|w| w.core_mut().set_position(vec2(20, 20)));
        win.add_widget(panel.clone());
        win.draw();
        assert_eq!(win.content().get_pixel(25, 25), rgb(1, 2, 3));
        // clean widget, dirty window: the surface still lands in the buffer
        panel.with_mut(|w| w.core_mut().needs_redraw = false);
        win.link().invalidate();
        win.draw();
        assert_eq!(win.content().get_pixel(25, 25), rgb(1, 2, 3));
        assert!(!win.needs_redraw());
    }

    #[test]
    fn resize_relayouts_the_main_widget() {
        let mut win = window();
        let main = WidgetHandle::new(Panel::new(dim(10, 10), rgb(0, 0, 0)));
        win.set_main_widget(main.clone());
        win.on_resize(&EventResize { size: dim(200, 150), position: vec2(0, 0) });
        assert_eq!(win.size().width, 200);
        main.with(|w| {
            assert_eq!(w.core().size().width, 200);
            assert_eq!(w.core().size().height, 150);
        });
    }
}
