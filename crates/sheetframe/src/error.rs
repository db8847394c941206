//! Error types for frame operations.
//!
//! This module provides the main error type [`FrameError`]. Every failure is
//! surfaced to the caller immediately; malformed trees are never repaired.

use std::io;

use thiserror::Error;

use sheetframe_markup::MarkupError;

/// The main error type for frame and drawing operations.
///
/// # Diagnostic Variants
///
/// The `Load` variant keeps the source text alongside the markup error so
/// callers can render the failing location.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Required node `{path}` is missing")]
    MissingNode { path: &'static str },

    #[error("Required attribute `{attribute}` is missing on `{element}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid value `{value}` at `{location}`")]
    InvalidValue { location: String, value: String },

    #[error("Identity {0} is outside the range 0..=4294967295")]
    InvalidIdentity(i64),

    #[error("Frame already hosts a payload (relationship id `{existing}`)")]
    PayloadAlreadyAttached { existing: String },

    #[error("Relationship id `{id}` is already in use")]
    RelationshipInUse { id: String },

    #[error("No relationship ids left to allocate")]
    RelationshipIdsExhausted,

    #[error("Unknown {kind} handle {index}")]
    UnknownHandle { kind: &'static str, index: usize },

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    #[error("{err}")]
    Load { err: MarkupError, src: String },
}

impl FrameError {
    /// Create a new `Load` error with the associated source text.
    pub fn new_load_error(err: MarkupError, src: impl Into<String>) -> Self {
        Self::Load {
            err,
            src: src.into(),
        }
    }
}
