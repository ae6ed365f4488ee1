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
    EventKeyboard, EventMouse, FontProvider, Key, LayoutItem, MouseEventKind, PaddingStyle, Propagation, Theme, TimerId, Widget, WidgetCore, WidgetHandle,
    dim, rect, vec2,
};

/// A row of headers switching between per-tab child widgets. One child is
/// visible at a time, sized to the area below the header strip; pointer
/// events below the strip are forwarded to it.
pub struct Tabs {
    core: WidgetCore,
    tabs: Vec<(String, WidgetHandle)>,
    active: usize,
    header_height: i32,
    header_widths: Vec<i32>,
    on_change: Option<Box<dyn FnMut(usize)>>,
}

impl Tabs {
    /// Height of the header strip in pixels.
    pub const HEADER_HEIGHT: i32 = 24;

    /// Creates an empty tab container.
    pub fn new() -> Self {
        let mut core = WidgetCore::new(dim(200, 150), 0);
        core.set_can_focus(true);
        Self { core, tabs: Vec::new(), active: 0, header_height: Self::HEADER_HEIGHT, header_widths: Vec::new(), on_change: None }
    }

    /// Appends a tab. The first tab added becomes active.
    pub fn add_tab(&mut self, title: &str, page: WidgetHandle) {
        self.tabs.push((title.into(), page));
        self.header_widths.clear();
        self.layout_active_page();
        self.core.mark_dirty();
    }

    /// Number of tabs.
    pub fn len(&self) -> usize { self.tabs.len() }

    /// Returns `true` when no tab has been added.
    pub fn is_empty(&self) -> bool { self.tabs.is_empty() }

    /// Index of the visible tab.
    pub fn active(&self) -> usize { self.active }

    /// Switches the visible tab.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.tabs.len() || index == self.active {
            return;
        }
        self.active = index;
        self.layout_active_page();
        if let Some(callback) = self.on_change.as_mut() {
            callback(index);
        }
        self.core.mark_dirty();
    }

    /// Installs the tab-switch callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(usize) + 'static) { self.on_change = Some(Box::new(callback)); }

    fn page_rect(&self) -> crate::Recti {
        let s = self.core.content.size();
        rect(0, self.header_height, s.width, (s.height - self.header_height).max(0))
    }

    fn layout_active_page(&mut self) {
        let page = self.page_rect();
        if let Some((_, handle)) = self.tabs.get(self.active) {
            let mut handle = handle.clone();
            handle.relayout(vec2(page.x, page.y), dim(page.width, page.height));
        }
    }

    fn header_index_at(&self, x: i32) -> Option<usize> {
        let mut cursor = 0;
        for (i, w) in self.header_widths.iter().enumerate() {
            if x >= cursor && x < cursor + w {
                return Some(i);
            }
            cursor += w;
        }
        None
    }

    fn forward_to_page(&mut self, event: &EventMouse, inside: bool) -> Propagation {
        let page = self.page_rect();
        if let Some((_, handle)) = self.tabs.get(self.active) {
            let mut forwarded = event.to_local(vec2(page.x, page.y), inside);
            forwarded.is_local = inside;
            return handle.with_mut(|w| w.on_mouse_click(&forwarded));
        }
        Propagation::Propagate
    }
}

impl Default for Tabs {
    fn default() -> Self { Self::new() }
}

impl Widget for Tabs {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        self.core.content.clear();
        let pad = theme.get_padding(PaddingStyle::TabHeader);
        self.header_widths.clear();
        let mut cursor = 0;
        for (i, (title, _)) in self.tabs.iter().enumerate() {
            let width = font.text_size(title).width.max(20) + pad.start + pad.end;
            theme.draw_tab_header(&mut self.core.content, rect(cursor, 0, width, self.header_height), title, i == self.active, font);
            self.header_widths.push(width);
            cursor += width;
        }
        let page = self.page_rect();
        if let Some((_, handle)) = self.tabs.get(self.active) {
            handle.with_mut(|w| {
                if w.core().needs_redraw() {
                    w.draw(theme, font);
                    w.core_mut().needs_redraw = false;
                }
                self.core.content.draw(vec2(page.x, page.y), w.core().content());
            });
        }
    }

    fn on_resize(&mut self) { self.layout_active_page(); }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        match event.kind {
            MouseEventKind::Press if event.position.y < self.header_height => {
                if let Some(index) = self.header_index_at(event.position.x) {
                    self.set_active(index);
                    return Propagation::Handled;
                }
                Propagation::Propagate
            }
            MouseEventKind::Press | MouseEventKind::Scroll => self.forward_to_page(event, true),
            MouseEventKind::Release => {
                let page = self.page_rect();
                let inside = event.is_local && crate::point_in_rect(event.position, page);
                self.forward_to_page(event, inside)
            }
            MouseEventKind::Move => Propagation::Propagate,
        }
    }

    fn on_hover(&mut self, event: &EventMouse) {
        if event.position.y < self.header_height {
            return;
        }
        let page = self.page_rect();
        if let Some((_, handle)) = self.tabs.get(self.active) {
            let forwarded = event.to_local(vec2(page.x, page.y), true);
            handle.with_mut(|w| w.on_hover(&forwarded));
        }
    }

    fn on_mouse_leave(&mut self) {
        if let Some((_, handle)) = self.tabs.get(self.active) {
            handle.with_mut(|w| w.on_mouse_leave());
        }
    }

    fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if !event.keydown || self.tabs.is_empty() {
            return Propagation::Propagate;
        }
        match event.key {
            Key::Left => {
                self.set_active(self.active.saturating_sub(1));
                Propagation::Handled
            }
            Key::Right => {
                self.set_active((self.active + 1).min(self.tabs.len() - 1));
                Propagation::Handled
            }
            _ => Propagation::Propagate,
        }
    }

    fn on_timer(&mut self, timer: TimerId) {
        for (_, handle) in &self.tabs {
            handle.with_mut(|w| w.on_timer(timer));
        }
    }

    fn on_remove(&mut self) {
        for (_, handle) in &self.tabs {
            handle.with_mut(|w| w.on_remove());
        }
    }

    fn on_focus_changed(&mut self, _focused: bool) { self.core.mark_dirty(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BevelTheme, MouseButton, NullFont, Panel, rgb};

    fn tabs() -> Tabs {
        let mut tabs = Tabs::new();
        tabs.add_tab("one", WidgetHandle::new(Panel::new(dim(10, 10), rgb(1, 0, 0))));
        tabs.add_tab("two", WidgetHandle::new(Panel::new(dim(10, 10), rgb(0, 1, 0))));
        tabs
    }

    #[test]
    fn first_tab_is_active_and_sized_to_the_page() {
        let tabs = tabs();
        assert_eq!(tabs.active(), 0);
        let (_, page) = &tabs.tabs[0];
        page.with(|w| {
            assert_eq!(w.core().position().y, Tabs::HEADER_HEIGHT);
            assert_eq!(w.core().size().height, 150 - Tabs::HEADER_HEIGHT);
        });
    }

    #[test]
    fn header_click_switches_the_active_tab() {
        let theme = BevelTheme::new();
        let font = NullFont::new();
        let mut tabs = tabs();
        tabs.draw(&theme, &font); // computes header extents
        let second_x = tabs.header_widths[0] + 2;
        let mut press = EventMouse::press(MouseButton::LEFT, second_x, 10);
        press.is_local = true;
        assert_eq!(tabs.on_mouse_click(&press), Propagation::Handled);
        assert_eq!(tabs.active(), 1);
    }

    #[test]
    fn arrow_keys_switch_and_clamp() {
        let mut tabs = tabs();
        tabs.on_keyboard(&EventKeyboard::down(Key::Right));
        assert_eq!(tabs.active(), 1);
        tabs.on_keyboard(&EventKeyboard::down(Key::Right));
        assert_eq!(tabs.active(), 1);
        tabs.on_keyboard(&EventKeyboard::down(Key::Left));
        assert_eq!(tabs.active(), 0);
        tabs.on_keyboard(&EventKeyboard::down(Key::Left));
        assert_eq!(tabs.active(), 0);
    }

    #[test]
    fn switch_callback_fires_on_change_only() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut tabs = tabs();
        let sink = seen.clone();
        tabs.set_on_change(move |i| sink.borrow_mut().push(i));
        tabs.set_active(1);
        tabs.set_active(1);
        tabs.set_active(0);
        assert_eq!(*seen.borrow(), vec![1, 0]);
    }
}
