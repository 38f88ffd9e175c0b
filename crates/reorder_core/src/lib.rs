//! Reorder Core
//!
//! Drag-to-reorder for virtualized, vertically scrolling lists: long-press a
//! row, drag it, watch it trade places with neighbours as it crosses their
//! midpoints, auto-scroll when it is pushed past an edge, and ease the
//! released row back into its slot.
//!
//! The crate renders nothing. A host UI supplies a [`Viewport`] (geometry of
//! the rendered window plus asynchronous scrolling) and forwards gesture
//! events; the engine decides where rows should be drawn and when the order
//! changes.
//!
//! # Modules
//!
//! - [`registry`] - declaring rows as reorderable or fixed
//! - [`order`] - the display order and its single move operation
//! - [`engine`] - drag lifecycle, hit testing, swap and auto-scroll decisions
//! - [`pump`] - serializing auto-scroll requests onto the viewport
//! - [`list`] - composition of the above, per-row transforms
//! - [`driver`] - optional interval-based frame source for settle animations

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod key;
pub mod list;
pub mod order;
pub mod pump;
pub mod registry;
pub mod state;
pub mod viewport;

pub use config::{OverflowPolicy, ReorderConfig};
pub use driver::{SettleDriver, SharedReorderList};
pub use engine::{
    compute_overscroll, find_swap_target, hit_test, DragEngine, DragOutcome, DragSession,
    RowTransform, SettleSession,
};
pub use error::{ReorderError, Result};
pub use key::{ItemKey, ItemKind};
pub use list::{OrderReset, ReorderList, Row};
pub use order::OrderSequence;
pub use pump::{AutoScrollPump, PumpStats, ScrollRequest, ScrollSender};
pub use registry::{ItemRegistry, ListScope};
pub use state::{DragEvent, DragState};
pub use viewport::{LayoutInfo, ScrollFuture, Viewport, VisibleItemInfo};

/// Common imports for hosting a reorderable list
pub mod prelude {
    pub use crate::{
        AutoScrollPump, DragOutcome, ItemKey, ItemRegistry, LayoutInfo, OrderReset,
        ReorderConfig, ReorderError, ReorderList, RowTransform, ScrollFuture, SettleDriver,
        Viewport, VisibleItemInfo,
    };
    pub use reorder_animation::SpringConfig;
}
