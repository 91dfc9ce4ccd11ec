//! Error types for property-path evaluation.
//!
//! Expected empty outcomes (an anchor missing from the node index, an empty
//! scan range, an automaton without start or accepting states) are NOT
//! errors: they complete as ordinary zero-result evaluations. Only genuine
//! infrastructure faults surface here, and they are never retried or
//! masked at this layer.

use thiserror::Error;

use crate::binding::VarId;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for all engine operations.
///
/// Each variant carries enough context for debugging; all failures are
/// designed to surface immediately with clear messages.
#[derive(Error, Debug)]
pub enum EngineError {
    // ========== Storage Errors ==========
    /// Failed to open storage at a specific path.
    #[error("Failed to open storage at {path}: {cause}")]
    StorageOpen { path: String, cause: String },

    /// RocksDB storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Column family not found in RocksDB.
    #[error("Column family not found: {0}")]
    ColumnFamilyNotFound(String),

    /// Data corruption detected while decoding stored bytes.
    #[error("Corrupted data in {location}: {details}")]
    CorruptedData { location: String, details: String },

    // ========== Configuration Errors ==========
    /// Invalid configuration parameter.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========== Automaton Errors ==========
    /// Automaton construction referenced a state outside the table.
    #[error("Invalid automaton: {0}")]
    InvalidAutomaton(String),

    // ========== Operator Protocol Errors ==========
    /// begin() resolved the bound endpoint from a variable with no value.
    #[error("Start variable {0:?} is unbound in the incoming binding")]
    UnboundStartVariable(VarId),

    /// next() was called before begin() initialized the evaluation.
    #[error("Iterator protocol violation: next() called before begin()")]
    IterNotBegun,

    // ========== Serialization Errors ==========
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ========== I/O Errors ==========
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ========== Error Conversions ==========
// Enable ? operator for external error types

impl From<rocksdb::Error> for EngineError {
    fn from(err: rocksdb::Error) -> Self {
        EngineError::Storage(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        // Box<bincode::ErrorKind> - deref for message
        EngineError::Deserialization(err.to_string())
    }
}

// Compile-time verification that EngineError is thread-safe
static_assertions::assert_impl_all!(EngineError: Send, Sync, std::error::Error);
