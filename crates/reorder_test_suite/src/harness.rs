//! Test harness for drag-to-reorder scenarios
//!
//! Provides:
//! - [`SimulatedViewport`]: a virtualized viewport with uniform row heights,
//!   real windowing and scrolls that land asynchronously
//! - [`ListHarness`]: a [`ReorderList`] wired to that viewport and a running
//!   auto-scroll pump, with a render pass after every gesture event

use std::sync::{Arc, Mutex, Once};

use anyhow::{Context, Result};
use reorder_core::prelude::*;
use reorder_core::{OrderSequence, PumpStats, ScrollRequest, ScrollSender};
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a tracing subscriber once per process (honours `RUST_LOG`)
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

#[derive(Debug)]
struct SimState {
    /// Keys as of the last render pass
    rendered: Vec<ItemKey>,
    row_height: f32,
    viewport_height: f32,
    scroll_offset: f32,
    applied: Vec<ScrollRequest>,
}

impl SimState {
    fn max_scroll(&self) -> f32 {
        (self.rendered.len() as f32 * self.row_height - self.viewport_height).max(0.0)
    }

    fn set_scroll(&mut self, offset: f32) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }
}

/// Virtualized viewport over uniformly sized rows
///
/// Only rows intersecting `[scroll, scroll + viewport_height)` are reported.
/// Scrolls are applied after the returned future yields once, the way a real
/// container applies them on its next frame.
#[derive(Clone)]
pub struct SimulatedViewport {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedViewport {
    pub fn new(order: &OrderSequence, row_height: f32, viewport_height: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                rendered: order.keys().to_vec(),
                row_height,
                viewport_height,
                scroll_offset: 0.0,
                applied: Vec::new(),
            })),
        }
    }

    /// Render pass: pick up the latest order
    pub fn render(&self, order: &OrderSequence) {
        if let Ok(mut state) = self.state.lock() {
            state.rendered = order.keys().to_vec();
            let offset = state.scroll_offset;
            state.set_scroll(offset);
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.state.lock().map(|s| s.scroll_offset).unwrap_or(0.0)
    }

    /// Jump without going through the pump (test setup)
    pub fn set_scroll_offset(&self, offset: f32) {
        if let Ok(mut state) = self.state.lock() {
            state.set_scroll(offset);
        }
    }

    /// Every scroll request that has taken effect, in order
    pub fn applied(&self) -> Vec<ScrollRequest> {
        self.state
            .lock()
            .map(|s| s.applied.clone())
            .unwrap_or_default()
    }

    pub fn row_height(&self) -> f32 {
        self.state.lock().map(|s| s.row_height).unwrap_or(0.0)
    }

    pub fn viewport_height(&self) -> f32 {
        self.state.lock().map(|s| s.viewport_height).unwrap_or(0.0)
    }

    fn schedule(&self, request: ScrollRequest) -> ScrollFuture {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            tokio::task::yield_now().await;
            if let Ok(mut state) = state.lock() {
                match request {
                    ScrollRequest::By(delta) => {
                        let offset = state.scroll_offset + delta;
                        state.set_scroll(offset);
                    }
                    ScrollRequest::ToItem { index, offset } => {
                        let target = index as f32 * state.row_height + offset;
                        state.set_scroll(target);
                    }
                }
                state.applied.push(request);
            }
        })
    }
}

impl Viewport for SimulatedViewport {
    fn layout_info(&self) -> LayoutInfo {
        let Ok(state) = self.state.lock() else {
            return LayoutInfo::default();
        };
        let row = state.row_height;
        let scroll = state.scroll_offset;
        let count = state.rendered.len();
        if count == 0 || row <= 0.0 {
            return LayoutInfo {
                viewport_end: state.viewport_height,
                ..Default::default()
            };
        }

        let first = ((scroll / row).floor() as usize).min(count - 1);
        let last = (((scroll + state.viewport_height) / row).ceil() as usize).min(count);
        let visible_items = (first..last)
            .map(|index| {
                VisibleItemInfo::new(
                    index,
                    state.rendered[index].clone(),
                    index as f32 * row - scroll,
                    row,
                )
            })
            .collect();

        LayoutInfo {
            visible_items,
            first_visible_index: first,
            first_visible_scroll_offset: scroll - first as f32 * row,
            viewport_start: 0.0,
            viewport_end: state.viewport_height,
        }
    }

    fn scroll_by(&self, delta: f32) -> ScrollFuture {
        self.schedule(ScrollRequest::By(delta))
    }

    fn scroll_to_item(&self, index: usize, offset: f32) -> ScrollFuture {
        self.schedule(ScrollRequest::ToItem { index, offset })
    }
}

/// A reorderable list hosted on a [`SimulatedViewport`] with a live pump
pub struct ListHarness {
    pub list: ReorderList<SimulatedViewport, String>,
    pub viewport: SimulatedViewport,
    sender: ScrollSender,
    pump: Option<JoinHandle<()>>,
}

impl ListHarness {
    /// Host `registry` in a viewport `viewport_height` tall. Must run inside a tokio runtime.
    pub fn new(
        registry: ItemRegistry<String>,
        row_height: f32,
        viewport_height: f32,
        config: ReorderConfig,
    ) -> Self {
        let viewport = SimulatedViewport::new(&registry.initial_order(), row_height, viewport_height);
        let (pump, sender) = AutoScrollPump::from_config(&config);
        let pump = pump.spawn(viewport.clone());
        let list = ReorderList::new(registry, viewport.clone(), sender.clone(), config);
        Self {
            list,
            viewport,
            sender,
            pump: Some(pump),
        }
    }

    /// Rows "1"..="count"; even rows are fixed, odd rows are reorderable
    pub fn alternating(
        count: usize,
        row_height: f32,
        viewport_height: f32,
        config: ReorderConfig,
    ) -> Result<Self> {
        let registry = ItemRegistry::assemble(|scope| {
            for i in 1..=count {
                if i % 2 == 0 {
                    scope.fixed_item(i.to_string(), format!("fixed {i}"))?;
                } else {
                    scope.reorder_item(i.to_string(), format!("reorderable {i}"))?;
                }
            }
            Ok(())
        })
        .context("declaring alternating list")?;
        Ok(Self::new(registry, row_height, viewport_height, config))
    }

    /// Rows "1"..="count", all reorderable
    pub fn reorderable(
        count: usize,
        row_height: f32,
        viewport_height: f32,
        config: ReorderConfig,
    ) -> Result<Self> {
        let registry = ItemRegistry::assemble(|scope| {
            for i in 1..=count {
                scope.reorder_item(i.to_string(), format!("reorderable {i}"))?;
            }
            Ok(())
        })
        .context("declaring reorderable list")?;
        Ok(Self::new(registry, row_height, viewport_height, config))
    }

    /// Pointer-space y of the middle of the row declared as `id`
    pub fn center_of(&self, id: &str) -> Result<f32> {
        let layout = self.viewport.layout_info();
        let item = layout
            .visible_items
            .iter()
            .find(|item| item.key.id() == id)
            .with_context(|| format!("row {id:?} is not rendered"))?;
        Ok(item.offset + item.size / 2.0)
    }

    pub fn start(&mut self, y: f32) -> bool {
        let started = self.list.on_drag_start(y);
        self.render();
        started
    }

    pub fn drag(&mut self, delta: f32) -> DragOutcome {
        let outcome = self.list.on_drag(delta);
        self.render();
        outcome
    }

    pub fn end(&mut self) {
        self.list.on_drag_end();
        self.render();
    }

    pub fn cancel(&mut self) {
        self.list.on_drag_cancel();
        self.render();
    }

    pub fn render(&self) {
        self.viewport.render(self.list.order());
    }

    /// Ids in display order
    pub fn ids(&self) -> Vec<String> {
        self.list
            .order()
            .iter()
            .map(|key| key.id().to_owned())
            .collect()
    }

    pub fn stats(&self) -> PumpStats {
        self.sender.stats()
    }

    /// Wait until the pump has applied everything queued so far, then render.
    pub async fn flush_scrolls(&self) -> Result<()> {
        for _ in 0..10_000 {
            let stats = self.sender.stats();
            let expected = stats.submitted - stats.coalesced - stats.dropped;
            if stats.applied >= expected && self.sender.pending() == 0 {
                self.render();
                return Ok(());
            }
            tokio::task::yield_now().await;
        }
        anyhow::bail!("auto-scroll pump did not drain: {:?}", self.sender.stats())
    }

    /// Tick the settle animation at 60fps until it finishes; returns the offsets seen.
    pub fn settle(&mut self) -> Result<Vec<f32>> {
        let mut offsets = vec![self.list.engine().settling_offset()];
        for _ in 0..600 {
            if !self.list.tick(1.0 / 60.0) {
                return Ok(offsets);
            }
            offsets.push(self.list.engine().settling_offset());
        }
        anyhow::bail!("settle animation did not finish within 10s")
    }

    /// Drop every sender and wait for the pump task to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        let pump = self.pump.take();
        drop(self.list);
        drop(self.sender);
        if let Some(pump) = pump {
            pump.await.context("auto-scroll pump panicked")?;
        }
        Ok(())
    }
}
