//! Core id surrogates shared across the engine.
//!
//! All graph identifiers are opaque u64 surrogates. Storage keys encode
//! them big-endian so that lexicographic key order matches numeric order,
//! which the directional range scans rely on.

/// Node identifier (u64 for 8-byte RocksDB key encoding).
pub type NodeId = u64;

/// Edge-type identifier. Leading component of forward index keys.
pub type EdgeTypeId = u64;

/// Edge identifier, allocated by the store's persistent counter.
pub type EdgeId = u64;
