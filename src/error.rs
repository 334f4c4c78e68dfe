//! Errors raised by storage collaborators
//!
//! The simulation never returns these. They surface from the high score and
//! settings adapters, and the session turns them into warnings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend missing (no window, LocalStorage disabled, private mode)
    #[error("storage backend unavailable: {0}")]
    Unavailable(&'static str),
}
