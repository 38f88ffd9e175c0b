//! Auto-scroll pump
//!
//! Pointer updates are synchronous and must return immediately, while viewport
//! scrolls complete asynchronously. The pump sits between the two: the drag
//! engine submits [`ScrollRequest`]s through a non-blocking [`ScrollSender`],
//! and a single consumer task applies them to the [`Viewport`] one at a time,
//! awaiting each scroll before taking the next.
//!
//! Requests are applied strictly in submission order. The queue is bounded;
//! see [`OverflowPolicy`] for what happens when it fills up. Re-anchor
//! requests ([`ScrollRequest::ToItem`]) are never merged or dropped.
//!
//! The consumer stops once every sender has been dropped and the queue is
//! drained.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::{OverflowPolicy, ReorderConfig};
use crate::error::{ReorderError, Result};
use crate::viewport::Viewport;

/// A scroll to perform on the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Auto-scroll by a signed overscroll amount
    By(f32),
    /// Re-anchor the viewport on a row at a given scroll offset
    ToItem { index: usize, offset: f32 },
}

/// Counters describing pump traffic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub submitted: u64,
    pub applied: u64,
    pub coalesced: u64,
    pub dropped: u64,
}

#[derive(Default)]
struct Counters {
    submitted: AtomicU64,
    applied: AtomicU64,
    coalesced: AtomicU64,
    dropped: AtomicU64,
}

struct QueueInner {
    requests: VecDeque<ScrollRequest>,
    senders: usize,
    closed: bool,
}

struct Shared {
    inner: Mutex<QueueInner>,
    notify: Notify,
    capacity: usize,
    policy: OverflowPolicy,
    counters: Counters,
}

impl Shared {
    fn stats(&self) -> PumpStats {
        PumpStats {
            submitted: self.counters.submitted.load(Ordering::Relaxed),
            applied: self.counters.applied.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Non-blocking submission handle for the auto-scroll pump
pub struct ScrollSender {
    shared: Arc<Shared>,
}

impl ScrollSender {
    /// Queue a scroll request. Never waits for the consumer.
    pub fn submit(&self, request: ScrollRequest) -> Result<()> {
        let Ok(mut inner) = self.shared.inner.lock() else {
            return Err(ReorderError::PumpClosed);
        };
        if inner.closed {
            return Err(ReorderError::PumpClosed);
        }
        self.shared.counters.submitted.fetch_add(1, Ordering::Relaxed);

        if inner.requests.len() >= self.shared.capacity {
            if let ScrollRequest::By(delta) = request {
                match self.shared.policy {
                    OverflowPolicy::Coalesce => {
                        if let Some(ScrollRequest::By(last)) = inner.requests.back_mut() {
                            *last += delta;
                            self.shared.counters.coalesced.fetch_add(1, Ordering::Relaxed);
                            tracing::trace!(delta, merged = *last, "coalesced scroll request");
                            return Ok(());
                        }
                    }
                    OverflowPolicy::DropOldest => {
                        let oldest = inner
                            .requests
                            .iter()
                            .position(|queued| matches!(queued, ScrollRequest::By(_)));
                        if let Some(position) = oldest {
                            if let Some(dropped) = inner.requests.remove(position) {
                                self.shared.counters.dropped.fetch_add(1, Ordering::Relaxed);
                                tracing::warn!(?dropped, "auto-scroll queue full, dropped oldest");
                            }
                        }
                    }
                }
            }
        }

        inner.requests.push_back(request);
        drop(inner);
        self.shared.notify.notify_one();
        Ok(())
    }

    /// Number of requests waiting for the consumer
    pub fn pending(&self) -> usize {
        self.shared
            .inner
            .lock()
            .map(|inner| inner.requests.len())
            .unwrap_or(0)
    }

    pub fn stats(&self) -> PumpStats {
        self.shared.stats()
    }

    pub fn is_closed(&self) -> bool {
        self.shared
            .inner
            .lock()
            .map(|inner| inner.closed)
            .unwrap_or(true)
    }
}

impl Clone for ScrollSender {
    fn clone(&self) -> Self {
        if let Ok(mut inner) = self.shared.inner.lock() {
            inner.senders += 1;
        }
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for ScrollSender {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.inner.lock() {
            inner.senders = inner.senders.saturating_sub(1);
            if inner.senders > 0 {
                return;
            }
        }
        // Wake the consumer so it can observe that nobody can submit anymore
        self.shared.notify.notify_one();
    }
}

impl std::fmt::Debug for ScrollSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSender")
            .field("pending", &self.pending())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Consumer side of the auto-scroll queue
pub struct AutoScrollPump {
    shared: Arc<Shared>,
}

impl AutoScrollPump {
    /// Create a pump and its first sender.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> (Self, ScrollSender) {
        let shared = Arc::new(Shared {
            inner: Mutex::new(QueueInner {
                requests: VecDeque::with_capacity(capacity.max(1)),
                senders: 1,
                closed: false,
            }),
            notify: Notify::new(),
            capacity: capacity.max(1),
            policy,
            counters: Counters::default(),
        });
        let sender = ScrollSender {
            shared: Arc::clone(&shared),
        };
        (Self { shared }, sender)
    }

    pub fn from_config(config: &ReorderConfig) -> (Self, ScrollSender) {
        Self::new(config.scroll_queue_capacity, config.overflow)
    }

    /// Apply queued requests to `viewport` until every sender is gone.
    pub async fn run<V: Viewport>(self, viewport: V) {
        tracing::debug!(capacity = self.shared.capacity, "auto-scroll pump started");
        while let Some(request) = self.next().await {
            tracing::trace!(?request, "applying scroll request");
            match request {
                ScrollRequest::By(delta) => viewport.scroll_by(delta).await,
                ScrollRequest::ToItem { index, offset } => {
                    viewport.scroll_to_item(index, offset).await
                }
            }
            self.shared.counters.applied.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(stats = ?self.shared.stats(), "auto-scroll pump stopped");
    }

    /// Run the pump as a tokio task.
    pub fn spawn<V: Viewport>(self, viewport: V) -> JoinHandle<()> {
        tokio::spawn(self.run(viewport))
    }

    pub fn stats(&self) -> PumpStats {
        self.shared.stats()
    }

    async fn next(&self) -> Option<ScrollRequest> {
        loop {
            {
                let mut inner = self.shared.inner.lock().ok()?;
                if let Some(request) = inner.requests.pop_front() {
                    return Some(request);
                }
                if inner.senders == 0 {
                    return None;
                }
            }
            self.shared.notify.notified().await;
        }
    }
}

impl Drop for AutoScrollPump {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.inner.lock() {
            inner.closed = true;
            inner.requests.clear();
        }
    }
}
