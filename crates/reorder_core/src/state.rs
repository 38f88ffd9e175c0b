//! Drag lifecycle state machine
//!
//! ```text
//!          Start (hit a reorderable row)
//!   Idle ─────────────────────────────▶ Dragging
//!    ▲                                     │
//!    └──────────── End | Cancel ───────────┘
//! ```
//!
//! Release and cancellation are the same transition. Events that have no
//! transition from the current state are ignored, which is what makes a late
//! `End` racing an earlier `Cancel` harmless.

/// Lifecycle state of the drag engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// A reorderable row follows the pointer
    Dragging,
}

/// Gesture events fed to the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEvent {
    Start,
    End,
    Cancel,
}

impl DragState {
    /// Handle an event and return the new state, or None if no transition
    pub fn on_event(&self, event: DragEvent) -> Option<Self> {
        match (self, event) {
            (DragState::Idle, DragEvent::Start) => Some(DragState::Dragging),
            (DragState::Dragging, DragEvent::End) => Some(DragState::Idle),
            (DragState::Dragging, DragEvent::Cancel) => Some(DragState::Idle),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging)
    }
}
