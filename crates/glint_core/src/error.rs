//! Overlay error types

use thiserror::Error;

/// Errors surfaced by host-facing overlay operations
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The view was disposed while an operation was in flight
    #[error("view disposed")]
    ViewDisposed,

    /// The host rejected a native caret override
    #[error("native caret control failed: {0}")]
    NativeCaret(String),

    /// The host rejected a paint region registration
    #[error("paint region registration failed: {0}")]
    PaintRegion(String),

    /// Generic host API failure
    #[error("host error: {0}")]
    Host(String),
}

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;
