//! Error types for the Finality Guard subsystem
//!
//! Three layers:
//! - `KVStoreError`: raised by the key-value backend
//! - `StoreError`: raised by the finality persistence layer
//! - `FinalityError`: raised when constructing a guard from storage
//!
//! Validity checks never return these; a persistence failure while the
//! in-memory state is being advanced is logged and swallowed.

use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Backend has been shut down.
    #[error("KV store closed")]
    Closed,
}

/// Encode/decode failure from a `RecordCodec`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("codec error: {message}")]
pub struct CodecError {
    pub message: String,
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Persistence layer errors.
///
/// `NotFound` is the expected state at genesis and must be handled apart
/// from `Corrupt`, which is never repaired automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Nothing has been written under this key yet (or the value is empty).
    #[error("no record stored under {key}")]
    NotFound { key: String },

    /// Stored bytes failed to decode.
    #[error("corrupt record under {key}: {reason} (raw {raw:?})")]
    Corrupt {
        key: String,
        raw: Vec<u8>,
        reason: String,
    },

    /// Record could not be encoded for writing.
    #[error("failed to encode record for {key}: {reason}")]
    SerializationFailed { key: String, reason: String },

    /// Backend read or write failed.
    #[error("store unavailable for {key}: {source}")]
    StoreUnavailable {
        key: String,
        #[source]
        source: KVStoreError,
    },
}

impl StoreError {
    /// Check if this is the "nothing written yet" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Finality guard errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinalityError {
    /// Stored state could not be loaded at startup
    #[error("failed to resume {kind} state: {source}")]
    Resume {
        kind: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Result type for finality guard operations
pub type FinalityResult<T> = Result<T, FinalityError>;
