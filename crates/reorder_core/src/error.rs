//! Error types for reorder_core

use thiserror::Error;

/// Errors raised while declaring a list or driving its order sequence
///
/// Drag lifecycle calls never return errors: a drag start that hits nothing,
/// or an update/end without an active drag, is silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// A list item was declared with an empty or blank key
    #[error("key must not be empty and must be a string: {0:?}")]
    InvalidKey(String),

    /// The same key was declared twice in one listing
    #[error("key {0:?} was already declared")]
    DuplicateKey(String),

    /// A declaration entry point other than `reorder_item` / `fixed_item` was used
    #[error("unsupported declaration: {0}")]
    Unsupported(&'static str),

    /// An order sequence index was outside the sequence
    #[error("index {index} out of bounds for order sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The auto-scroll pump consuming scroll requests has stopped
    #[error("auto-scroll pump is closed")]
    PumpClosed,
}

/// Result type for reorder_core operations
pub type Result<T> = std::result::Result<T, ReorderError>;
