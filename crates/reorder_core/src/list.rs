//! Reorderable list composition
//!
//! [`ReorderList`] ties an [`ItemRegistry`], the [`OrderSequence`] and a
//! [`DragEngine`] together. It is what a host UI holds per list instance:
//! gesture callbacks go in, [`Row`]s with their transforms come out, and the
//! host renders each row with its renderer, translated by
//! `transform.translation_y` and stacked by `transform.z_index`.
//!
//! # Example
//!
//! ```ignore
//! let (pump, scroll) = AutoScrollPump::from_config(&config);
//! pump.spawn(viewport.clone());
//! let mut list = ReorderList::new(registry, viewport, scroll, config);
//!
//! list.on_drag_start(pointer.y);
//! list.on_drag(delta.y);
//! for row in list.rows() {
//!     draw(row.renderer, row.transform);
//! }
//! list.on_drag_end();
//! ```

use crate::config::ReorderConfig;
use crate::engine::{DragEngine, DragOutcome, RowTransform};
use crate::key::ItemKey;
use crate::order::OrderSequence;
use crate::pump::ScrollSender;
use crate::registry::ItemRegistry;
use crate::viewport::Viewport;

/// What to do with the current order when a new registry is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderReset {
    /// Keep the current arrangement of rows that are still declared; rows
    /// no longer declared are dropped and new rows are appended in
    /// declaration order
    #[default]
    Keep,
    /// Start over from the new registry's declaration order
    Reset,
}

/// One row to render
#[derive(Debug)]
pub struct Row<'a, R> {
    pub index: usize,
    pub key: &'a ItemKey,
    pub renderer: &'a R,
    pub transform: RowTransform,
}

/// A virtualized list whose reorderable rows can be dragged into a new order
pub struct ReorderList<V: Viewport, R> {
    registry: ItemRegistry<R>,
    order: OrderSequence,
    engine: DragEngine<V>,
}

impl<V: Viewport, R> ReorderList<V, R> {
    pub fn new(
        registry: ItemRegistry<R>,
        viewport: V,
        scroll: ScrollSender,
        config: ReorderConfig,
    ) -> Self {
        let order = registry.initial_order();
        Self {
            registry,
            order,
            engine: DragEngine::new(viewport, scroll, config),
        }
    }

    /// Rows in display order with their render-time transforms
    pub fn rows(&self) -> impl Iterator<Item = Row<'_, R>> + '_ {
        self.order.iter().enumerate().filter_map(move |(index, key)| {
            let renderer = self.registry.get(key)?;
            let transform = if key.is_reorderable() {
                self.engine.row_transform(index)
            } else {
                RowTransform::default()
            };
            Some(Row {
                index,
                key,
                renderer,
                transform,
            })
        })
    }

    pub fn on_drag_start(&mut self, y: f32) -> bool {
        self.engine.on_drag_start(y)
    }

    pub fn on_drag(&mut self, delta: f32) -> DragOutcome {
        self.engine.on_drag(delta, &mut self.order)
    }

    pub fn on_drag_end(&mut self) {
        self.engine.on_drag_end();
    }

    pub fn on_drag_cancel(&mut self) {
        self.engine.on_drag_cancel();
    }

    /// Advance animations by `dt` seconds. Returns `true` while a row is settling.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.engine.tick(dt)
    }

    /// Install a freshly assembled registry.
    ///
    /// An active drag is cancelled when its row no longer sits at the dragged
    /// index afterwards.
    pub fn replace_registry(&mut self, registry: ItemRegistry<R>, reset: OrderReset) {
        let dragged = self
            .engine
            .dragging_index()
            .map(|index| (index, self.order.get(index).cloned()));

        match reset {
            OrderReset::Keep => {
                let declared: Vec<ItemKey> = registry.keys().cloned().collect();
                self.order.reconcile(&declared);
            }
            OrderReset::Reset => self.order = registry.initial_order(),
        }

        if let Some((index, key)) = dragged {
            if key.is_none() || self.order.get(index) != key.as_ref() {
                tracing::debug!(index, "dragged row displaced by new declaration");
                self.engine.on_drag_cancel();
            }
        }
        tracing::debug!(items = registry.len(), ?reset, "registry replaced");
        self.registry = registry;
    }

    pub fn order(&self) -> &OrderSequence {
        &self.order
    }

    pub fn registry(&self) -> &ItemRegistry<R> {
        &self.registry
    }

    pub fn engine(&self) -> &DragEngine<V> {
        &self.engine
    }

    pub fn viewport(&self) -> &V {
        self.engine.viewport()
    }
}
