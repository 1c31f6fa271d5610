use thiserror::Error;

use crate::models::entry::EntryKind;

/// Unified error type for the entire daily-expenses-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation (user-facing) ────────────────────────────────────
    #[error("Please enter a valid integer {0} amount.")]
    InvalidAmount(EntryKind),

    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("No {kind} entry at index {index} (list has {len} entries)")]
    EntryNotFound {
        kind: EntryKind,
        index: usize,
        len: usize,
    },

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Whether the error comes from user input (shown as an alert) rather
    /// than from the storage layer (logged and swallowed).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidAmount(_) | CoreError::InvalidMonth(_) | CoreError::EntryNotFound { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
