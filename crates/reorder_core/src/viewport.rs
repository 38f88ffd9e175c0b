//! Viewport geometry
//!
//! The engine never lays rows out itself. A [`Viewport`] reports, for the
//! current render pass, which rows are materialized and where, and performs
//! scrolls that complete asynchronously.
//!
//! All offsets are pixels along the scroll axis, relative to the viewport's
//! layout origin (the same frame `viewport_start` / `viewport_end` use).

use std::future::Future;
use std::pin::Pin;

use crate::key::ItemKey;

/// Completion of a scroll operation
pub type ScrollFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Geometry of one currently rendered row. Only valid for the render pass it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleItemInfo {
    pub index: usize,
    pub key: ItemKey,
    pub offset: f32,
    pub size: f32,
}

impl VisibleItemInfo {
    pub fn new(index: usize, key: ItemKey, offset: f32, size: f32) -> Self {
        Self {
            index,
            key,
            offset,
            size,
        }
    }

    pub fn offset_end(&self) -> f32 {
        self.offset + self.size
    }

    /// Half-open containment: `[offset, offset_end)`
    pub fn contains(&self, y: f32) -> bool {
        y >= self.offset && y < self.offset_end()
    }
}

/// Snapshot of the viewport for one render pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutInfo {
    /// Rendered rows, in display order
    pub visible_items: Vec<VisibleItemInfo>,
    pub first_visible_index: usize,
    /// How far the first visible row is scrolled past the viewport start
    pub first_visible_scroll_offset: f32,
    pub viewport_start: f32,
    pub viewport_end: f32,
}

impl LayoutInfo {
    /// Geometry of the row at `index`, if it is rendered
    pub fn item(&self, index: usize) -> Option<&VisibleItemInfo> {
        self.visible_items.iter().find(|item| item.index == index)
    }

    pub fn first_visible(&self) -> Option<&VisibleItemInfo> {
        self.visible_items.first()
    }

    pub fn viewport_size(&self) -> f32 {
        self.viewport_end - self.viewport_start
    }
}

/// The scrollable, virtualizing container hosting the list
///
/// `layout_info` must reflect the latest render pass every time it is
/// called; the engine re-reads it on every pointer event because scrolls
/// may complete between two events.
pub trait Viewport: Send + Sync + 'static {
    fn layout_info(&self) -> LayoutInfo;

    /// Scroll by a signed pixel amount
    fn scroll_by(&self, delta: f32) -> ScrollFuture;

    /// Scroll so that row `index` starts `offset` pixels before the viewport start
    fn scroll_to_item(&self, index: usize, offset: f32) -> ScrollFuture;
}

impl<V: Viewport> Viewport for std::sync::Arc<V> {
    fn layout_info(&self) -> LayoutInfo {
        (**self).layout_info()
    }

    fn scroll_by(&self, delta: f32) -> ScrollFuture {
        (**self).scroll_by(delta)
    }

    fn scroll_to_item(&self, index: usize, offset: f32) -> ScrollFuture {
        (**self).scroll_to_item(index, offset)
    }
}
