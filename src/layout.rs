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
use crate::{Position, Size, dim, vec2};

/// A node participating in automatic size and position distribution,
/// independent of whether it is also a widget. Layout containers and
/// [`crate::WidgetHandle`] both implement it.
pub trait LayoutItem {
    /// Assigns the item its region. Containers recurse into their children.
    fn relayout(&mut self, position: Position, size: Size);

    /// The size the item wants. A non-positive component means "flexible on
    /// this axis": the enclosing layout distributes the remaining space among
    /// flexible items by weight.
    fn size_hint(&self) -> Size { dim(0, 0) }

    /// Items reporting `true` are skipped entirely by both layout passes and
    /// receive no `relayout` call. Hidden widgets and popup overlays use this.
    fn ignore_layout(&self) -> bool { false }

    /// Share of the remaining space this item claims relative to its flexible
    /// siblings.
    fn weight(&self) -> f32 { 1.0 }
}

/// Per-side spacing in pixels. Layout containers use one instance for the
/// outer margin and one for the per-child padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Spacing {
    /// Space above.
    pub top: i32,
    /// Space below.
    pub bottom: i32,
    /// Space before (left in a left-to-right layout).
    pub start: i32,
    /// Space after.
    pub end: i32,
}

impl Spacing {
    /// The same spacing on all four sides.
    pub fn uniform(n: i32) -> Self { Self { top: n, bottom: n, start: n, end: n } }

    /// No spacing.
    pub fn none() -> Self { Self::default() }
}

#[derive(Copy, Clone, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(&self, s: Size) -> i32 {
        match self {
            Axis::Horizontal => s.width,
            Axis::Vertical => s.height,
        }
    }

    fn cross(&self, s: Size) -> i32 {
        match self {
            Axis::Horizontal => s.height,
            Axis::Vertical => s.width,
        }
    }

    fn pack(&self, main: i32, cross: i32) -> Size {
        match self {
            Axis::Horizontal => dim(main, cross),
            Axis::Vertical => dim(cross, main),
        }
    }

    fn margin_main(&self, m: Spacing) -> (i32, i32) {
        match self {
            Axis::Horizontal => (m.start, m.end),
            Axis::Vertical => (m.top, m.bottom),
        }
    }

    fn margin_cross(&self, m: Spacing) -> (i32, i32) {
        match self {
            Axis::Horizontal => (m.top, m.bottom),
            Axis::Vertical => (m.start, m.end),
        }
    }
}

struct LayoutSpans {
    items: Vec<Box<dyn LayoutItem>>,
    margin: Spacing,
    padding: Spacing,
    weight: f32,
}

impl LayoutSpans {
    fn new() -> Self { Self { items: Vec::new(), margin: Spacing::none(), padding: Spacing::none(), weight: 1.0 } }

    /// Two passes over the children, mirrored across the main axis. Pass 1
    /// sums the main-axis space of fixed children (positive hint) and the
    /// weight of flexible ones; pass 2 hands fixed children their hint
    /// verbatim and splits the remaining space among flexible children
    /// proportionally to weight, advancing a cursor by padding + size +
    /// padding. The last pixel may go missing to integer rounding.
    fn relayout(&mut self, axis: Axis, position: Position, size: Size) {
        let (m_lead, m_trail) = axis.margin_main(self.margin);
        let (c_lead, c_trail) = axis.margin_cross(self.margin);
        let (p_lead, p_trail) = axis.margin_main(self.padding);

        let avail_main = axis.main(size) - m_lead - m_trail;
        let avail_cross = (axis.cross(size) - c_lead - c_trail).max(0);

        let mut fixed = 0i32;
        let mut total_weight = 0f32;
        let mut padding_sum = 0i32;
        for item in self.items.iter().filter(|i| !i.ignore_layout()) {
            let hint = axis.main(item.size_hint());
            if hint > 0 {
                fixed += hint;
            } else {
                total_weight += item.weight();
            }
            padding_sum += p_lead + p_trail;
        }
        let remaining = (avail_main - fixed - padding_sum).max(0);

        let (mut cursor, cross_origin) = match axis {
            Axis::Horizontal => (position.x + m_lead, position.y + c_lead),
            Axis::Vertical => (position.y + m_lead, position.x + c_lead),
        };
        for item in self.items.iter_mut() {
            if item.ignore_layout() {
                continue;
            }
            let hint = item.size_hint();
            let main = if axis.main(hint) > 0 {
                axis.main(hint)
            } else if total_weight > 0.0 {
                (remaining as f32 * item.weight() / total_weight) as i32
            } else {
                0
            };
            let cross = if axis.cross(hint) > 0 { axis.cross(hint) } else { avail_cross };
            cursor += p_lead;
            let origin = match axis {
                Axis::Horizontal => vec2(cursor, cross_origin),
                Axis::Vertical => vec2(cross_origin, cursor),
            };
            item.relayout(origin, axis.pack(main.max(0), cross.max(0)));
            cursor += main.max(0) + p_trail;
        }
    }

    /// Sum of the child hints on the main axis, max on the cross axis; 0 on
    /// any axis where at least one child is flexible there, which signals "I
    /// am flexible on this axis" to an enclosing layout.
    fn size_hint(&self, axis: Axis) -> Size {
        let (m_lead, m_trail) = axis.margin_main(self.margin);
        let (c_lead, c_trail) = axis.margin_cross(self.margin);
        let (p_lead, p_trail) = axis.margin_main(self.padding);

        let mut main = 0i32;
        let mut cross = 0i32;
        let mut main_flexible = false;
        let mut cross_flexible = false;
        let mut any = false;
        for item in self.items.iter().filter(|i| !i.ignore_layout()) {
            any = true;
            let hint = item.size_hint();
            if axis.main(hint) > 0 {
                main += axis.main(hint) + p_lead + p_trail;
            } else {
                main_flexible = true;
            }
            if axis.cross(hint) > 0 {
                cross = cross.max(axis.cross(hint));
            } else {
                cross_flexible = true;
            }
        }
        if !any {
            return dim(0, 0);
        }
        let main = if main_flexible { 0 } else { main + m_lead + m_trail };
        let cross = if cross_flexible { 0 } else { cross + c_lead + c_trail };
        axis.pack(main, cross)
    }
}

/// Arranges its children left to right, distributing the width.
pub struct HorizontalLayout {
    spans: LayoutSpans,
}

/// Arranges its children top to bottom, distributing the height.
pub struct VerticalLayout {
    spans: LayoutSpans,
}

macro_rules! implement_layout {
    ($ty:ty, $axis:expr) => {
        impl $ty {
            /// Creates an empty layout with no margin or padding.
            pub fn new() -> Self { Self { spans: LayoutSpans::new() } }

            /// Appends a child item. Children keep insertion order.
            pub fn add_item(&mut self, item: Box<dyn LayoutItem>) { self.spans.items.push(item); }

            /// Appends a shared widget handle as a child item.
            pub fn add_widget(&mut self, widget: &crate::WidgetHandle) { self.spans.items.push(Box::new(widget.clone())); }

            /// Sets the outer margin reserved inside the container's region.
            pub fn set_margin(&mut self, margin: Spacing) { self.spans.margin = margin; }

            /// Sets the per-child padding applied before and after every child
            /// on the main axis.
            pub fn set_padding(&mut self, padding: Spacing) { self.spans.padding = padding; }

            /// Sets this layout's weight when nested inside another layout.
            pub fn set_weight(&mut self, weight: f32) { self.spans.weight = weight; }

            /// Number of child items, ignored ones included.
            pub fn len(&self) -> usize { self.spans.items.len() }

            /// Returns `true` when the layout holds no items.
            pub fn is_empty(&self) -> bool { self.spans.items.is_empty() }
        }

        impl Default for $ty {
            fn default() -> Self { Self::new() }
        }

        impl LayoutItem for $ty {
            fn relayout(&mut self, position: Position, size: Size) { self.spans.relayout($axis, position, size); }
            fn size_hint(&self) -> Size { self.spans.size_hint($axis) }
            fn weight(&self) -> f32 { self.spans.weight }
        }
    };
}

implement_layout!(HorizontalLayout, Axis::Horizontal);
implement_layout!(VerticalLayout, Axis::Vertical);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        hint: Size,
        weight: f32,
        ignored: bool,
        last: Rc<RefCell<Option<(Position, Size)>>>,
    }

    impl Probe {
        fn new(hint: Size, weight: f32) -> (Self, Rc<RefCell<Option<(Position, Size)>>>) {
            let last = Rc::new(RefCell::new(None));
            (Self { hint, weight, ignored: false, last: last.clone() }, last)
        }
    }

    impl LayoutItem for Probe {
        fn relayout(&mut self, position: Position, size: Size) { *self.last.borrow_mut() = Some((position, size)); }
        fn size_hint(&self) -> Size { self.hint }
        fn ignore_layout(&self) -> bool { self.ignored }
        fn weight(&self) -> f32 { self.weight }
    }

    #[test]
    fn fixed_children_get_their_hint_verbatim() {
        let mut layout = HorizontalLayout::new();
        let (a, la) = Probe::new(dim(30, 0), 1.0);
        let (b, lb) = Probe::new(dim(50, 20), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        layout.relayout(vec2(0, 0), dim(200, 40));

        let (pa, sa) = la.borrow().unwrap();
        let (pb, sb) = lb.borrow().unwrap();
        assert_eq!(sa.width, 30);
        assert_eq!(sa.height, 40);
        assert_eq!(sb.width, 50);
        // positive cross-axis hint is enforced
        assert_eq!(sb.height, 20);
        assert_eq!((pa.x, pa.y), (0, 0));
        assert_eq!((pb.x, pb.y), (30, 0));
    }

    #[test]
    fn flexible_children_split_by_weight() {
        let mut layout = VerticalLayout::new();
        let (a, la) = Probe::new(dim(0, 0), 1.0);
        let (b, lb) = Probe::new(dim(0, 0), 3.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        layout.relayout(vec2(0, 0), dim(80, 100));

        let (_, sa) = la.borrow().unwrap();
        let (pb, sb) = lb.borrow().unwrap();
        assert_eq!(sa.height, 25);
        assert_eq!(sb.height, 75);
        assert_eq!(pb.y, 25);
        assert_eq!(sa.width, 80);
    }

    #[test]
    fn conservation_with_margins_and_padding() {
        let mut layout = HorizontalLayout::new();
        layout.set_margin(Spacing::uniform(5));
        layout.set_padding(Spacing { start: 2, end: 2, top: 0, bottom: 0 });
        let (a, la) = Probe::new(dim(40, 0), 1.0);
        let (b, lb) = Probe::new(dim(0, 0), 1.0);
        let (c, lc) = Probe::new(dim(0, 0), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        layout.add_item(Box::new(c));
        layout.relayout(vec2(0, 0), dim(200, 60));

        let (_, sa) = la.borrow().unwrap();
        let (_, sb) = lb.borrow().unwrap();
        let (pc, sc) = lc.borrow().unwrap();
        let paddings = 3 * 4;
        let margins = 10;
        let total = sa.width + sb.width + sc.width + paddings + margins;
        assert!((200 - total).abs() <= 1, "assigned {total} of 200");
        // cross axis loses the margins
        assert_eq!(sa.height, 50);
        // last child ends at most one pixel short of the margin edge
        assert!(pc.x + sc.width <= 195);
    }

    #[test]
    fn ignored_children_are_skipped() {
        let mut layout = HorizontalLayout::new();
        let (mut a, la) = Probe::new(dim(40, 0), 1.0);
        a.ignored = true;
        let (b, lb) = Probe::new(dim(0, 0), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        layout.relayout(vec2(0, 0), dim(100, 20));

        assert!(la.borrow().is_none());
        let (pb, sb) = lb.borrow().unwrap();
        assert_eq!(pb.x, 0);
        assert_eq!(sb.width, 100);
    }

    #[test]
    fn negative_remaining_space_clamps_to_zero() {
        let mut layout = HorizontalLayout::new();
        let (a, _) = Probe::new(dim(300, 0), 1.0);
        let (b, lb) = Probe::new(dim(0, 0), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        layout.relayout(vec2(0, 0), dim(100, 20));

        let (_, sb) = lb.borrow().unwrap();
        assert_eq!(sb.width, 0);
    }

    #[test]
    fn container_hint_sums_main_and_maxes_cross() {
        let mut layout = HorizontalLayout::new();
        let (a, _) = Probe::new(dim(30, 10), 1.0);
        let (b, _) = Probe::new(dim(50, 25), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        let hint = layout.size_hint();
        assert_eq!(hint.width, 80);
        assert_eq!(hint.height, 25);
    }

    #[test]
    fn container_hint_reports_zero_when_any_child_is_flexible() {
        let mut layout = HorizontalLayout::new();
        let (a, _) = Probe::new(dim(30, 10), 1.0);
        let (b, _) = Probe::new(dim(0, 25), 1.0);
        layout.add_item(Box::new(a));
        layout.add_item(Box::new(b));
        assert_eq!(layout.size_hint().width, 0);
        assert_eq!(layout.size_hint().height, 25);
    }

    #[test]
    fn nested_layouts_relayout_recursively() {
        let mut inner = HorizontalLayout::new();
        let (a, la) = Probe::new(dim(0, 0), 1.0);
        inner.add_item(Box::new(a));
        let mut outer = VerticalLayout::new();
        outer.add_item(Box::new(inner));
        outer.relayout(vec2(10, 10), dim(100, 50));

        let (pa, sa) = la.borrow().unwrap();
        assert_eq!((pa.x, pa.y), (10, 10));
        assert_eq!((sa.width, sa.height), (100, 50));
    }
}
