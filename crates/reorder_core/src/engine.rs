//! Drag engine
//!
//! Coordinates a drag across three moving frames of reference: the viewport's
//! scroll position (which auto-scroll changes mid-drag), the virtualization
//! window (rows appear and disappear as the list scrolls) and the cumulative
//! pointer delta.
//!
//! The dragged row's visual translation is always derived from the offset it
//! had when the drag started plus the pointer delta, minus wherever its
//! *current* slot is laid out right now:
//!
//! ```text
//! translation = initial_offset + dragged_delta - layout_offset(dragging_index)
//! ```
//!
//! so the row tracks the pointer continuously across moves and scrolls.
//! Geometry is read fresh from the [`Viewport`] on every event.

use reorder_animation::Animatable;

use crate::config::ReorderConfig;
use crate::order::OrderSequence;
use crate::pump::{ScrollRequest, ScrollSender};
use crate::state::{DragEvent, DragState};
use crate::viewport::{LayoutInfo, Viewport, VisibleItemInfo};

/// Bookkeeping of the active drag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    /// Current order-sequence index of the dragged row
    pub dragging_index: Option<usize>,
    /// Cumulative signed pointer displacement since the drag started
    pub dragged_delta: f32,
    /// Layout offset of the dragged row when the drag started
    pub initial_offset: f32,
}

/// The row released by the last drag, easing back into its slot
#[derive(Debug, Clone, Copy)]
pub struct SettleSession {
    pub previous_index: usize,
    offset: Animatable,
}

impl SettleSession {
    pub fn offset(&self) -> f32 {
        self.offset.value()
    }
}

/// What a pointer update resulted in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No drag is active
    Ignored,
    /// The row followed the pointer, nothing else happened
    Tracking,
    /// The dragged row was relocated in the order sequence
    Moved { from: usize, to: usize },
    /// The row is past a viewport edge; an auto-scroll was requested
    AutoScroll(f32),
}

/// Render-time decoration of a row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowTransform {
    /// Translation along the scroll axis, on top of the row's layout offset
    pub translation_y: f32,
    /// Rows being dragged or settling draw above their neighbours
    pub z_index: i32,
    pub dragging: bool,
}

/// Drag-to-reorder coordinator for one list instance
pub struct DragEngine<V: Viewport> {
    viewport: V,
    scroll: ScrollSender,
    config: ReorderConfig,
    state: DragState,
    session: DragSession,
    settle: Option<SettleSession>,
}

impl<V: Viewport> DragEngine<V> {
    pub fn new(viewport: V, scroll: ScrollSender, config: ReorderConfig) -> Self {
        Self {
            viewport,
            scroll,
            config,
            state: DragState::Idle,
            session: DragSession::default(),
            settle: None,
        }
    }

    /// Long-press at `y`. Starts a drag if a reorderable row is under the pointer.
    pub fn on_drag_start(&mut self, y: f32) -> bool {
        let Some(next) = self.state.on_event(DragEvent::Start) else {
            return false;
        };

        let layout = self.viewport.layout_info();
        let Some(item) = hit_test(&layout, y) else {
            tracing::trace!(y, "drag start missed every reorderable row");
            return false;
        };

        tracing::debug!(index = item.index, key = %item.key, y, "drag started");
        self.session = DragSession {
            dragging_index: Some(item.index),
            dragged_delta: 0.0,
            initial_offset: item.offset,
        };
        self.state = next;
        true
    }

    /// Pointer moved by `delta` along the scroll axis.
    pub fn on_drag(&mut self, delta: f32, order: &mut OrderSequence) -> DragOutcome {
        if !self.state.is_dragging() {
            return DragOutcome::Ignored;
        }
        let Some(dragging_index) = self.session.dragging_index else {
            return DragOutcome::Ignored;
        };
        self.session.dragged_delta += delta;

        let layout = self.viewport.layout_info();
        let Some(dragging_item) = layout.item(dragging_index) else {
            tracing::trace!(dragging_index, "dragged row is outside the rendered window");
            return DragOutcome::Tracking;
        };

        let start = self.session.initial_offset + self.session.dragged_delta;
        let end = start + dragging_item.size;
        let middle = start + (end - start) / 2.0;
        tracing::trace!(start, end, delta = self.session.dragged_delta, "drag update");

        if let Some(target) = find_swap_target(&layout, dragging_index, middle) {
            let to = target.index;
            if dragging_index == layout.first_visible_index || to == layout.first_visible_index {
                // Moving the first visible row shifts what the scroll position is
                // anchored to; pin the viewport to where it is now.
                self.request_scroll(ScrollRequest::ToItem {
                    index: layout.first_visible_index,
                    offset: layout.first_visible_scroll_offset,
                });
            }

            if let Err(err) = order.move_item(dragging_index, to) {
                tracing::warn!(%err, "order sequence rejected move");
                return DragOutcome::Tracking;
            }
            self.session.dragging_index = Some(to);
            tracing::debug!(from = dragging_index, to, "dragged row moved");
            return DragOutcome::Moved {
                from: dragging_index,
                to,
            };
        }

        let overscroll = compute_overscroll(self.session.dragged_delta, start, end, &layout);
        if overscroll != 0.0 {
            self.request_scroll(ScrollRequest::By(overscroll));
            return DragOutcome::AutoScroll(overscroll);
        }
        DragOutcome::Tracking
    }

    /// Pointer released.
    pub fn on_drag_end(&mut self) {
        self.finish(DragEvent::End);
    }

    /// Gesture cancelled. Identical to a release.
    pub fn on_drag_cancel(&mut self) {
        self.finish(DragEvent::Cancel);
    }

    /// Advance the settle animation by `dt` seconds. Returns `true` while it runs.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(settle) = self.settle.as_mut() else {
            return false;
        };
        if settle.offset.tick(dt) {
            return true;
        }
        tracing::debug!(index = settle.previous_index, "settle finished");
        self.settle = None;
        false
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn dragging_index(&self) -> Option<usize> {
        self.session.dragging_index
    }

    pub fn dragged_delta(&self) -> f32 {
        self.session.dragged_delta
    }

    /// Translation of the dragged row relative to its current slot.
    ///
    /// Zero when nothing is dragged or the row is outside the rendered window.
    pub fn dragging_offset(&self) -> f32 {
        let Some(index) = self.session.dragging_index else {
            return 0.0;
        };
        self.viewport
            .layout_info()
            .item(index)
            .map(|item| self.visual_offset(item))
            .unwrap_or(0.0)
    }

    pub fn settle(&self) -> Option<&SettleSession> {
        self.settle.as_ref()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    pub fn settling_index(&self) -> Option<usize> {
        self.settle.as_ref().map(|settle| settle.previous_index)
    }

    pub fn settling_offset(&self) -> f32 {
        self.settle.as_ref().map(SettleSession::offset).unwrap_or(0.0)
    }

    /// How the row at `index` should be drawn this frame
    pub fn row_transform(&self, index: usize) -> RowTransform {
        if self.session.dragging_index == Some(index) {
            RowTransform {
                translation_y: self.dragging_offset(),
                z_index: 1,
                dragging: true,
            }
        } else if self.settling_index() == Some(index) {
            RowTransform {
                translation_y: self.settling_offset(),
                z_index: 1,
                dragging: false,
            }
        } else {
            RowTransform::default()
        }
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    fn finish(&mut self, event: DragEvent) {
        let Some(next) = self.state.on_event(event) else {
            return;
        };

        if let Some(index) = self.session.dragging_index {
            let released_at = self.dragging_offset();
            let mut offset = Animatable::new(released_at, self.config.settle_spring)
                .threshold(self.config.settle_threshold);
            offset.animate_to(0.0);
            tracing::debug!(index, released_at, ?event, "drag finished, settling");
            self.settle = Some(SettleSession {
                previous_index: index,
                offset,
            });
        }

        self.session = DragSession::default();
        self.state = next;
    }

    fn visual_offset(&self, item: &VisibleItemInfo) -> f32 {
        self.session.initial_offset + self.session.dragged_delta - item.offset
    }

    fn request_scroll(&self, request: ScrollRequest) {
        if let Err(err) = self.scroll.submit(request) {
            tracing::debug!(%err, ?request, "scroll request not delivered");
        }
    }
}

/// First rendered reorderable row whose span contains `y`
pub fn hit_test(layout: &LayoutInfo, y: f32) -> Option<&VisibleItemInfo> {
    layout
        .visible_items
        .iter()
        .find(|item| item.contains(y) && item.key.is_reorderable())
}

/// First rendered row, other than the dragged one, whose span contains `middle`.
///
/// Fixed rows are never swap targets.
pub fn find_swap_target(
    layout: &LayoutInfo,
    dragging_index: usize,
    middle: f32,
) -> Option<&VisibleItemInfo> {
    layout.visible_items.iter().find(|item| {
        item.index != dragging_index && item.key.is_reorderable() && item.contains(middle)
    })
}

/// Signed distance the dragged span `[start, end)` sticks out of the viewport
/// in the direction of travel; zero when it does not.
pub fn compute_overscroll(dragged_delta: f32, start: f32, end: f32, layout: &LayoutInfo) -> f32 {
    if dragged_delta > 0.0 {
        (end - layout.viewport_end).max(0.0)
    } else if dragged_delta < 0.0 {
        (start - layout.viewport_start).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::config::OverflowPolicy;
    use crate::key::ItemKey;
    use crate::pump::AutoScrollPump;
    use crate::viewport::ScrollFuture;

    const ROW: f32 = 40.0;

    /// Non-virtualized stand-in: every row is rendered, rows are `ROW` tall,
    /// and the layout is recomputed from the order it is handed.
    struct StaticViewport {
        layout: Mutex<LayoutInfo>,
    }

    impl StaticViewport {
        fn new(order: &OrderSequence, viewport_end: f32) -> Self {
            let viewport = Self {
                layout: Mutex::new(LayoutInfo {
                    viewport_end,
                    ..Default::default()
                }),
            };
            viewport.relayout(order);
            viewport
        }

        fn relayout(&self, order: &OrderSequence) {
            let mut layout = self.layout.lock().unwrap();
            layout.visible_items = order
                .iter()
                .enumerate()
                .map(|(index, key)| VisibleItemInfo::new(index, key.clone(), index as f32 * ROW, ROW))
                .collect();
        }
    }

    impl Viewport for StaticViewport {
        fn layout_info(&self) -> LayoutInfo {
            self.layout.lock().unwrap().clone()
        }

        fn scroll_by(&self, _delta: f32) -> ScrollFuture {
            Box::pin(async {})
        }

        fn scroll_to_item(&self, _index: usize, _offset: f32) -> ScrollFuture {
            Box::pin(async {})
        }
    }

    fn order(keys: &[ItemKey]) -> OrderSequence {
        OrderSequence::new(keys.to_vec())
    }

    fn engine(
        order: &OrderSequence,
        viewport_end: f32,
    ) -> (DragEngine<StaticViewport>, AutoScrollPump, ScrollSender) {
        let (pump, sender) = AutoScrollPump::new(64, OverflowPolicy::Coalesce);
        let engine = DragEngine::new(
            StaticViewport::new(order, viewport_end),
            sender.clone(),
            ReorderConfig::default(),
        );
        (engine, pump, sender)
    }

    fn rows(n: usize) -> Vec<ItemKey> {
        (0..n).map(|i| ItemKey::reorder(i.to_string())).collect()
    }

    #[test]
    fn test_start_on_fixed_row_stays_idle() {
        let order = order(&[ItemKey::fixed("a"), ItemKey::reorder("b")]);
        let (mut engine, _pump, _sender) = engine(&order, 400.0);

        for y in [0.0, 10.0, 39.9] {
            assert!(!engine.on_drag_start(y));
            assert_eq!(engine.state(), DragState::Idle);
        }
        assert!(engine.on_drag_start(40.0));
        assert_eq!(engine.dragging_index(), Some(1));
    }

    #[test]
    fn test_start_on_empty_space_is_noop() {
        let order = order(&rows(2));
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(!engine.on_drag_start(200.0));
        assert_eq!(engine.session(), DragSession::default());
    }

    #[test]
    fn test_update_and_end_when_idle_change_nothing() {
        let mut order = order(&rows(3));
        let (mut engine, _pump, sender) = engine(&order, 400.0);

        assert_eq!(engine.on_drag(25.0, &mut order), DragOutcome::Ignored);
        engine.on_drag_end();
        engine.on_drag_cancel();

        assert_eq!(engine.session(), DragSession::default());
        assert!(!engine.is_settling());
        assert_eq!(sender.stats().submitted, 0);
    }

    #[test]
    fn test_offset_tracks_pointer_without_drift() {
        let mut order = order(&rows(5));
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(45.0));

        let mut expected = 0.0;
        for delta in [3.0, -1.5, 7.25, 0.5, -4.0] {
            let before = engine.dragging_offset();
            assert_eq!(engine.on_drag(delta, &mut order), DragOutcome::Tracking);
            expected += delta;
            assert_eq!(engine.dragging_offset() - before, delta);
            assert_eq!(engine.dragging_offset(), expected);
        }
    }

    #[test]
    fn test_crossing_midpoint_moves_row() {
        let mut order = order(&rows(4));
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(50.0));

        // Middle of row 1 sits at 60; row 2 starts at 80
        assert_eq!(engine.on_drag(19.0, &mut order), DragOutcome::Tracking);
        assert_eq!(
            engine.on_drag(1.0, &mut order),
            DragOutcome::Moved { from: 1, to: 2 }
        );
        assert_eq!(engine.dragging_index(), Some(2));
        assert_eq!(order.position("1"), Some(2));

        engine.viewport().relayout(&order);
        // 40 + 20 - 80: the row stays under the pointer in its new slot
        assert_eq!(engine.dragging_offset(), -20.0);
    }

    #[test]
    fn test_fixed_rows_are_not_swap_targets() {
        let mut order = order(&[
            ItemKey::reorder("a"),
            ItemKey::fixed("b"),
            ItemKey::reorder("c"),
        ]);
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(5.0));

        assert_eq!(engine.on_drag(30.0, &mut order), DragOutcome::Tracking);
        assert_eq!(order.position("a"), Some(0));

        assert_eq!(
            engine.on_drag(30.0, &mut order),
            DragOutcome::Moved { from: 0, to: 2 }
        );
        assert_eq!(order.position("a"), Some(2));
        assert_eq!(order.position("b"), Some(0));
    }

    #[test]
    fn test_moving_first_visible_row_requests_reanchor() {
        let mut order = order(&rows(3));
        let (mut engine, _pump, sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(10.0));

        assert_eq!(
            engine.on_drag(25.0, &mut order),
            DragOutcome::Moved { from: 0, to: 1 }
        );
        assert_eq!(sender.stats().submitted, 1);
        assert_eq!(sender.pending(), 1);
    }

    #[test]
    fn test_overscroll_past_bottom_edge() {
        let mut order = order(&rows(3));
        let (mut engine, _pump, sender) = engine(&order, 100.0);
        assert!(engine.on_drag_start(85.0));

        // Row 2 spans 80..120: already 20 past the edge, pushed 5 further
        assert_eq!(
            engine.on_drag(5.0, &mut order),
            DragOutcome::AutoScroll(25.0)
        );
        assert_eq!(
            engine.on_drag(1.0, &mut order),
            DragOutcome::AutoScroll(26.0)
        );
        assert_eq!(sender.stats().submitted, 2);
    }

    #[test]
    fn test_overscroll_past_top_edge() {
        let layout = LayoutInfo {
            viewport_start: 0.0,
            viewport_end: 200.0,
            ..Default::default()
        };
        assert_eq!(compute_overscroll(-12.0, -12.0, 28.0, &layout), -12.0);
        assert_eq!(compute_overscroll(-12.0, 4.0, 44.0, &layout), 0.0);
        assert_eq!(compute_overscroll(0.0, -12.0, 300.0, &layout), 0.0);
        // Moving down never scrolls up
        assert_eq!(compute_overscroll(3.0, -12.0, 28.0, &layout), 0.0);
    }

    #[test]
    fn test_end_spawns_settle_and_resets() {
        let mut order = order(&rows(4));
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(45.0));
        engine.on_drag(12.0, &mut order);

        engine.on_drag_end();
        assert_eq!(engine.state(), DragState::Idle);
        assert_eq!(engine.session(), DragSession::default());
        assert_eq!(engine.settling_index(), Some(1));
        assert_eq!(engine.settling_offset(), 12.0);

        let transform = engine.row_transform(1);
        assert_eq!(transform.translation_y, 12.0);
        assert_eq!(transform.z_index, 1);
        assert!(!transform.dragging);

        let mut last = engine.settling_offset();
        while engine.tick(1.0 / 60.0) {
            let now = engine.settling_offset();
            assert!(now.abs() < last.abs());
            last = now;
        }
        assert!(!engine.is_settling());
        assert_eq!(engine.row_transform(1), RowTransform::default());
    }

    #[test]
    fn test_new_drag_does_not_cancel_settle() {
        let mut order = order(&rows(4));
        let (mut engine, _pump, _sender) = engine(&order, 400.0);
        assert!(engine.on_drag_start(5.0));
        engine.on_drag(-10.0, &mut order);
        engine.on_drag_end();

        assert!(engine.on_drag_start(125.0));
        assert_eq!(engine.settling_index(), Some(0));
        assert!(engine.row_transform(3).dragging);
        assert_eq!(engine.row_transform(0).translation_y, -10.0);
        assert!(engine.tick(1.0 / 60.0));
    }

    #[test]
    fn test_cancel_matches_end() {
        let run = |cancel: bool| {
            let mut order = order(&rows(5));
            let (mut engine, _pump, _sender) = engine(&order, 400.0);
            assert!(engine.on_drag_start(45.0));
            for _ in 0..6 {
                engine.on_drag(9.0, &mut order);
                engine.viewport().relayout(&order);
            }
            if cancel {
                engine.on_drag_cancel();
            } else {
                engine.on_drag_end();
            }
            (
                order,
                engine.state(),
                engine.session(),
                engine.settling_index(),
                engine.settling_offset(),
            )
        };

        assert_eq!(run(true), run(false));
    }

    #[test]
    fn test_hit_test_boundary_belongs_to_lower_row() {
        let order = order(&rows(3));
        let viewport = StaticViewport::new(&order, 400.0);
        let layout = viewport.layout_info();
        assert_eq!(hit_test(&layout, 40.0).map(|item| item.index), Some(1));
        assert_eq!(hit_test(&layout, 39.99).map(|item| item.index), Some(0));
        assert!(hit_test(&layout, 120.0).is_none());
    }
}
