//! Reorder Test Suite
//!
//! Headless scenario testing for the drag-to-reorder engine. Lists are hosted
//! on a simulated virtualized viewport with uniform rows, a live auto-scroll
//! pump and a render pass after every gesture event, so drags can be scripted
//! and checked end to end without a UI toolkit.
//!
//! # Test Categories
//!
//! - **Swaps**: rows trading places as the dragged row crosses midpoints
//! - **Auto-scroll**: edge overscroll, request ordering, queue overflow
//! - **Settle**: the released row easing back into its slot

pub mod harness;

pub use harness::{init_tracing, ListHarness, SimulatedViewport};
