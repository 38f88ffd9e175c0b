//! Reorder demo
//!
//! Scripts a drag through an alternating list of fixed and reorderable rows
//! and prints what the engine decided at each step.
//!
//! Usage:
//!   reorder-demo            # 20 rows, drag "5" down four rows
//!   reorder-demo --rows 40  # longer list, auto-scroll kicks in

use anyhow::{Context, Result};
use reorder_core::{DragOutcome, ReorderConfig};
use reorder_test_suite::ListHarness;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ROW: f32 = 32.0;
const VIEWPORT: f32 = 8.0 * ROW;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let rows = args
        .iter()
        .position(|a| a == "--rows")
        .and_then(|i| args.get(i + 1))
        .map(|value| value.parse::<usize>())
        .transpose()
        .context("--rows expects a number")?
        .unwrap_or(20);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(rows))
}

async fn run(rows: usize) -> Result<()> {
    let mut harness = ListHarness::alternating(rows, ROW, VIEWPORT, ReorderConfig::default())?;
    let y = harness.center_of("5")?;
    if !harness.start(y) {
        anyhow::bail!("row \"5\" did not pick up");
    }

    for step in 1..=24 {
        match harness.drag(8.0) {
            DragOutcome::Moved { from, to } => println!("step {step:>2}: moved {from} -> {to}"),
            DragOutcome::AutoScroll(amount) => {
                println!("step {step:>2}: auto-scroll {amount}");
                harness.flush_scrolls().await?;
            }
            DragOutcome::Tracking | DragOutcome::Ignored => {}
        }
    }
    harness.end();

    let frames = harness.settle()?.len();
    println!("settled in {frames} frames");
    println!("order: {}", harness.ids().join(" "));
    println!("scroll: {:?}", harness.stats());

    harness.shutdown().await
}
