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
    BevelTheme, EventKeyboard, EventMouse, FontProvider, Key, Label, LayoutItem, MouseEventKind, Orientation, Propagation, ScrollBar, Theme, TimerId, Widget,
    WidgetCore, WidgetHandle, dim, point_in_rect, rect, vec2,
};

use std::cell::RefCell;
use std::rc::Rc;

/// Display status a row widget is bound with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    /// Regular row.
    Normal,
    /// The row holding the current item.
    Selected,
}

/// Why a selection callback fired. Callers treat `Mouse` and `Keyboard` as
/// confirming a choice (a combobox closes its popup) and `KeyboardMove` as
/// mere navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionReason {
    /// A row was clicked.
    Mouse,
    /// Return confirmed the current row.
    Keyboard,
    /// Arrow/Home/End/Page navigation moved the current row.
    KeyboardMove,
}

/// The data provider a [`ListView`] queries, decoupling the view from the
/// backing collection. The adapter owns the logical item set; the view owns
/// only a small pool of recycled row widgets.
pub trait ItemAdapter {
    /// Number of logical items.
    fn get_count(&self) -> usize;

    /// Creates a row widget; called once per pool slot, not per item.
    fn get_widget(&self, index: usize) -> WidgetHandle;

    /// Rebinds a pooled row widget to the logical item `index`.
    fn set_content(&self, widget: &WidgetHandle, index: usize, status: ItemStatus);
}

/// A string-list adapter binding rows to [`Label`]s. Keeps typed handles to
/// the labels it hands out so `set_content` can restyle them by identity.
pub struct TextAdapter {
    items: Vec<String>,
    labels: RefCell<Vec<(WidgetHandle, Rc<RefCell<Label>>)>>,
}

impl TextAdapter {
    /// Creates an adapter over the given strings.
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self { items: items.into_iter().map(Into::into).collect(), labels: RefCell::new(Vec::new()) }
    }

    /// The backing strings.
    pub fn items(&self) -> &[String] { &self.items }
}

impl ItemAdapter for TextAdapter {
    fn get_count(&self) -> usize { self.items.len() }

    fn get_widget(&self, _index: usize) -> WidgetHandle {
        let label = Rc::new(RefCell::new(Label::new("")));
        let handle = WidgetHandle::from_shared(label.clone());
        self.labels.borrow_mut().push((handle.clone(), label));
        handle
    }

    fn set_content(&self, widget: &WidgetHandle, index: usize, status: ItemStatus) {
        let text = match self.items.get(index) {
            Some(text) => text,
            None => return,
        };
        for (handle, label) in self.labels.borrow().iter() {
            if handle.ptr_eq(widget) {
                let mut label = label.borrow_mut();
                label.set_text(text);
                match status {
                    ItemStatus::Selected => {
                        label.set_background_color(BevelTheme::SELECTION);
                        label.set_text_color(Some(BevelTheme::SELECTION_TEXT));
                    }
                    ItemStatus::Normal => {
                        label.set_background_color(BevelTheme::SURFACE);
                        label.set_text_color(Some(BevelTheme::TEXT));
                    }
                }
                return;
            }
        }
    }
}

/// A virtualized scrolling list. Rows are recycled from a pool sized to the
/// visible viewport plus one, never one per logical item; on every draw each
/// pooled widget is repositioned and rebound to the logical item scrolled
/// under its slot.
pub struct ListView {
    core: WidgetCore,
    adapter: Option<Rc<dyn ItemAdapter>>,
    scrollbar: ScrollBar,
    pool: Vec<WidgetHandle>,
    item_height: i32,
    current_item: Option<usize>,
    on_item_selected: Option<Box<dyn FnMut(usize, SelectionReason)>>,
    last_selection: Option<(usize, SelectionReason)>,
}

impl ListView {
    /// Default row height in pixels.
    pub const ITEM_HEIGHT: i32 = 20;

    /// Creates an empty list view.
    pub fn new() -> Self {
        let mut core = WidgetCore::new(dim(160, 100), BevelTheme::SURFACE);
        core.set_can_focus(true);
        Self {
            core,
            adapter: None,
            scrollbar: ScrollBar::new(Orientation::Vertical),
            pool: Vec::new(),
            item_height: Self::ITEM_HEIGHT,
            current_item: None,
            on_item_selected: None,
            last_selection: None,
        }
    }

    /// Installs the data provider, resetting the pool and the current item.
    pub fn set_adapter(&mut self, adapter: Rc<dyn ItemAdapter>) {
        self.adapter = Some(adapter);
        self.pool.clear();
        self.current_item = None;
        self.scrollbar.set_value(0);
        self.core.mark_dirty();
    }

    /// Row height; also the scrollbar step.
    pub fn item_height(&self) -> i32 { self.item_height }

    /// Changes the row height. Values below 1 are raised to 1.
    pub fn set_item_height(&mut self, height: i32) {
        self.item_height = height.max(1);
        self.pool.clear();
        self.core.mark_dirty();
    }

    /// The current item index, if any.
    pub fn current_item(&self) -> Option<usize> { self.current_item }

    /// Installs the selection callback.
    pub fn set_on_item_selected(&mut self, callback: impl FnMut(usize, SelectionReason) + 'static) {
        self.on_item_selected = Some(Box::new(callback));
    }

    /// Takes the most recent selection, if one happened since the last call.
    /// Embedding widgets poll this after forwarding events.
    pub fn take_selection(&mut self) -> Option<(usize, SelectionReason)> { self.last_selection.take() }

    /// The embedded scrollbar, for inspection.
    pub fn scrollbar(&self) -> &ScrollBar { &self.scrollbar }

    /// First logical index visible in the viewport.
    pub fn first_visible(&self) -> usize { (self.scrollbar.value() / self.item_height).max(0) as usize }

    /// Number of fully visible rows.
    pub fn visible_count(&self) -> usize { (self.core.content.size().height / self.item_height).max(0) as usize }

    fn count(&self) -> usize { self.adapter.as_ref().map_or(0, |a| a.get_count()) }

    fn scrollbar_rect(&self) -> crate::Recti {
        let s = self.core.content.size();
        let w = ScrollBar::DEFAULT_THICKNESS;
        rect(s.width - w, 0, w, s.height)
    }

    fn ensure_geometry(&mut self) {
        let s = self.core.content.size();
        let sb = self.scrollbar_rect();
        self.scrollbar.core_mut().window = self.core.window.clone();
        self.scrollbar.core_mut().set_position(vec2(sb.x, sb.y));
        self.scrollbar.core_mut().content_mut().resize(dim(sb.width, sb.height));
        let count = self.count() as i32;
        self.scrollbar.set_step(self.item_height);
        self.scrollbar.set_range(0, (count * self.item_height - s.height).max(0));
        let adapter = match self.adapter.clone() {
            Some(adapter) => adapter,
            None => return,
        };
        let needed = ((s.height + self.item_height - 1) / self.item_height + 1).max(0) as usize;
        while self.pool.len() < needed {
            self.pool.push(adapter.get_widget(self.first_visible() + self.pool.len()));
        }
        self.pool.truncate(needed);
    }

    fn fire(&mut self, index: usize, reason: SelectionReason) {
        self.last_selection = Some((index, reason));
        if let Some(callback) = self.on_item_selected.as_mut() {
            callback(index, reason);
        }
    }

    /// Scrolls just enough that `index` is inside the viewport; a no-op when
    /// it already is.
    pub fn ensure_item_in_viewport(&mut self, index: usize) {
        let visible = self.visible_count().max(1);
        let first = self.first_visible();
        if index < first {
            self.scrollbar.set_value(index as i32 * self.item_height);
        } else if index >= first + visible {
            self.scrollbar.set_value((index as i32 + 1 - visible as i32) * self.item_height);
        }
    }

    fn move_current(&mut self, index: usize, reason: SelectionReason) {
        let count = self.count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        if self.current_item == Some(index) {
            return;
        }
        self.current_item = Some(index);
        self.ensure_item_in_viewport(index);
        self.fire(index, reason);
        self.core.mark_dirty();
    }

    fn forward_to_scrollbar<R>(&mut self, f: impl FnOnce(&mut ScrollBar) -> R) -> R {
        let result = f(&mut self.scrollbar);
        if self.scrollbar.core().needs_redraw() {
            self.core.mark_dirty();
        }
        result
    }
}

impl Default for ListView {
    fn default() -> Self { Self::new() }
}

impl Widget for ListView {
    widget_core!();

    fn draw(&mut self, theme: &dyn Theme, font: &dyn FontProvider) {
        self.ensure_geometry();
        self.core.content.clear();
        let adapter = self.adapter.clone();
        let count = self.count();
        let value = self.scrollbar.value();
        let first = self.first_visible();
        let sb = self.scrollbar_rect();
        let row_width = sb.x;
        if let Some(adapter) = adapter {
            for (slot, handle) in self.pool.iter().enumerate() {
                let logical = first + slot;
                let visible = logical < count;
                handle.with_mut(|w| w.core_mut().visible = visible);
                if !visible {
                    // pooled rows past the end of the data stay hidden
                    continue;
                }
                let y = logical as i32 * self.item_height - value;
                let status = if self.current_item == Some(logical) { ItemStatus::Selected } else { ItemStatus::Normal };
                theme.draw_listview_item(&mut self.core.content, rect(0, y, row_width, self.item_height), status);
                adapter.set_content(handle, logical, status);
                let mut row = handle.clone();
                row.relayout(vec2(0, y), dim(row_width, self.item_height));
                handle.with_mut(|w| {
                    w.draw(theme, font);
                    w.core_mut().needs_redraw = false;
                    self.core.content.draw(w.core().position(), w.core().content());
                });
            }
        }
        self.scrollbar.draw(theme, font);
        self.scrollbar.core_mut().needs_redraw = false;
        self.core.content.draw(vec2(sb.x, sb.y), self.scrollbar.core().content());
    }

    fn on_resize(&mut self) { self.ensure_geometry(); }

    fn on_mouse_click(&mut self, event: &EventMouse) -> Propagation {
        match event.kind {
            MouseEventKind::Release => {
                let sb = self.scrollbar_rect();
                let inside = event.is_local && point_in_rect(event.position, sb);
                let mut forwarded = event.to_local(vec2(sb.x, sb.y), inside);
                forwarded.is_local = inside;
                self.forward_to_scrollbar(|s| s.on_mouse_click(&forwarded))
            }
            MouseEventKind::Scroll => {
                let step = self.item_height;
                self.forward_to_scrollbar(|s| s.set_value(s.value() - event.scroll * step));
                Propagation::Handled
            }
            MouseEventKind::Press => {
                let sb = self.scrollbar_rect();
                if point_in_rect(event.position, sb) {
                    let forwarded = event.to_local(vec2(sb.x, sb.y), true);
                    return self.forward_to_scrollbar(|s| s.on_mouse_click(&forwarded));
                }
                let logical = (self.scrollbar.value() + event.position.y) / self.item_height;
                if logical >= 0 && (logical as usize) < self.count() {
                    let logical = logical as usize;
                    self.current_item = Some(logical);
                    self.fire(logical, SelectionReason::Mouse);
                    self.core.mark_dirty();
                }
                Propagation::Handled
            }
            MouseEventKind::Move => Propagation::Propagate,
        }
    }

    fn on_hover(&mut self, event: &EventMouse) {
        let sb = self.scrollbar_rect();
        if point_in_rect(event.position, sb) || self.scrollbar.core().mouse_over() {
            let forwarded = event.to_local(vec2(sb.x, sb.y), point_in_rect(event.position, sb));
            self.scrollbar.core_mut().mouse_over = point_in_rect(event.position, sb);
            self.forward_to_scrollbar(|s| s.on_hover(&forwarded));
        }
    }

    fn on_mouse_leave(&mut self) {
        self.scrollbar.core_mut().mouse_over = false;
        self.scrollbar.on_mouse_leave();
    }

    fn on_keyboard(&mut self, event: &EventKeyboard) -> Propagation {
        if !event.keydown {
            return Propagation::Propagate;
        }
        let count = self.count();
        if count == 0 {
            return Propagation::Propagate;
        }
        let current = self.current_item;
        // Page jumps move by a fifth of the data set
        let page = (count / 5).max(1);
        match event.key {
            Key::Up => self.move_current(current.map_or(0, |c| c.saturating_sub(1)), SelectionReason::KeyboardMove),
            Key::Down => self.move_current(current.map_or(0, |c| c + 1), SelectionReason::KeyboardMove),
            Key::Home => self.move_current(0, SelectionReason::KeyboardMove),
            Key::End => self.move_current(count - 1, SelectionReason::KeyboardMove),
            Key::PageUp => self.move_current(current.map_or(0, |c| c.saturating_sub(page)), SelectionReason::KeyboardMove),
            Key::PageDown => self.move_current(current.map_or(0, |c| c + page), SelectionReason::KeyboardMove),
            Key::Return => {
                if let Some(current) = current {
                    self.fire(current, SelectionReason::Keyboard);
                }
            }
            _ => return Propagation::Propagate,
        }
        Propagation::Handled
    }

    fn on_timer(&mut self, timer: TimerId) { self.forward_to_scrollbar(|s| s.on_timer(timer)); }

    fn on_focus_changed(&mut self, _focused: bool) { self.core.mark_dirty(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MouseButton;
    use std::cell::RefCell;

    fn listview(items: usize, height: i32) -> ListView {
        let mut lv = ListView::new();
        lv.core_mut().content_mut().resize(dim(160, height));
        lv.set_adapter(Rc::new(TextAdapter::new((0..items).map(|i| format!("item {i}")))));
        lv.on_resize();
        lv
    }

    #[test]
    fn pool_is_sized_to_the_viewport_not_the_data() {
        let lv = listview(1000, 100);
        // ceil(100 / 20) + 1
        assert_eq!(lv.pool.len(), 6);
        let lv = listview(1000, 90);
        assert_eq!(lv.pool.len(), 6);
        let lv = listview(2, 100);
        assert_eq!(lv.pool.len(), 6, "pool size does not track the item count");
    }

    #[test]
    fn scrollbar_range_covers_the_overflow() {
        let lv = listview(50, 100);
        assert_eq!(lv.scrollbar().maximum(), 50 * 20 - 100);
        let lv = listview(3, 100);
        assert_eq!(lv.scrollbar().maximum(), 0, "short lists do not scroll");
    }

    #[test]
    fn keyboard_navigation_keeps_the_current_item_in_the_viewport() {
        let mut lv = listview(100, 100);
        let down = EventKeyboard::down(Key::Down);
        for _ in 0..20 {
            lv.on_keyboard(&down);
        }
        let current = lv.current_item().unwrap();
        assert_eq!(current, 19);
        let first = lv.first_visible();
        assert!(current >= first && current < first + lv.visible_count(), "current {current} outside [{first}, {})", first + lv.visible_count());

        lv.on_keyboard(&EventKeyboard::down(Key::End));
        let current = lv.current_item().unwrap();
        assert_eq!(current, 99);
        let first = lv.first_visible();
        assert!(current >= first && current < first + lv.visible_count());

        lv.on_keyboard(&EventKeyboard::down(Key::Home));
        assert_eq!(lv.current_item(), Some(0));
        assert_eq!(lv.first_visible(), 0);
    }

    #[test]
    fn page_navigation_moves_by_a_fifth() {
        let mut lv = listview(100, 100);
        lv.on_keyboard(&EventKeyboard::down(Key::Down));
        lv.on_keyboard(&EventKeyboard::down(Key::PageDown));
        assert_eq!(lv.current_item(), Some(20));
        lv.on_keyboard(&EventKeyboard::down(Key::PageUp));
        assert_eq!(lv.current_item(), Some(0));
    }

    #[test]
    fn selection_reasons_distinguish_navigate_from_confirm() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut lv = listview(10, 100);
        let sink = seen.clone();
        lv.set_on_item_selected(move |i, r| sink.borrow_mut().push((i, r)));
        lv.on_keyboard(&EventKeyboard::down(Key::Down));
        lv.on_keyboard(&EventKeyboard::down(Key::Return));
        let mut press = EventMouse::press(MouseButton::LEFT, 10, 45);
        press.is_local = true;
        lv.on_mouse_click(&press);
        assert_eq!(
            *seen.borrow(),
            vec![(0, SelectionReason::KeyboardMove), (0, SelectionReason::Keyboard), (2, SelectionReason::Mouse)]
        );
    }

    #[test]
    fn take_selection_drains_the_latest_pick() {
        let mut lv = listview(10, 100);
        assert!(lv.take_selection().is_none());
        lv.on_keyboard(&EventKeyboard::down(Key::Down));
        assert_eq!(lv.take_selection(), Some((0, SelectionReason::KeyboardMove)));
        assert!(lv.take_selection().is_none());
    }

    #[test]
    fn wheel_scrolling_moves_the_viewport() {
        let mut lv = listview(100, 100);
        let mut scroll = EventMouse::scrolled(10, 50, -3);
        scroll.is_local = true;
        assert_eq!(lv.on_mouse_click(&scroll), Propagation::Handled);
        assert_eq!(lv.scrollbar().value(), 60);
        assert_eq!(lv.first_visible(), 3);
    }

    #[test]
    fn draw_hides_pooled_rows_past_the_data() {
        let theme = BevelTheme::new();
        let font = crate::NullFont::new();
        let mut lv = listview(3, 100);
        lv.draw(&theme, &font);
        let visible = lv.pool.iter().filter(|h| h.with(|w| w.core().visible())).count();
        assert_eq!(visible, 3);
    }

    #[test]
    fn draw_binds_rows_to_the_scrolled_window() {
        let theme = BevelTheme::new();
        let font = crate::NullFont::new();
        let mut lv = listview(100, 100);
        lv.scrollbar.set_value(200); // first visible = 10
        lv.draw(&theme, &font);
        assert_eq!(lv.first_visible(), 10);
        // the first pooled row now sits at y = 0 bound to item 10
        let y = lv.pool[0].with(|w| w.core().position().y);
        assert_eq!(y, 0);
    }
}
