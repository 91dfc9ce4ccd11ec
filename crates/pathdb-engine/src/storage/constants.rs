//! Column family name constants for RocksDB storage.
//!
//! Order matters for RocksDB - must match descriptor generation order.

/// Column family for the node existence index.
/// Key: node_id (8 bytes BE)
/// Value: empty
/// Optimized for: point lookups (membership tests)
pub const CF_NODES: &str = "nodes";

/// Column family for the forward directional adjacency index.
/// Key: edge_type + from + to + edge_id (32 bytes BE)
/// Value: empty
/// Optimized for: range scans within a (type, from) prefix
pub const CF_FWD_EDGES: &str = "fwd_edges";

/// Column family for the backward directional adjacency index.
/// Key: to + edge_type + from + edge_id (32 bytes BE)
/// Value: empty
/// Optimized for: range scans within a (to, type) prefix
pub const CF_BWD_EDGES: &str = "bwd_edges";

/// Column family for edge records.
/// Key: edge_id (8 bytes BE)
/// Value: EdgeRecord (bincode serialized)
/// Optimized for: point lookups by edge id
pub const CF_EDGES: &str = "edges";

/// Column family for metadata (schema version, edge-id counter).
/// Key: key string
/// Value: fixed-width integer bytes
/// Optimized for: small dataset, infrequent access
pub const CF_METADATA: &str = "metadata";

/// All column family names in order.
/// Order matters for RocksDB - must match descriptor generation order.
pub const ALL_COLUMN_FAMILIES: &[&str] =
    &[CF_NODES, CF_FWD_EDGES, CF_BWD_EDGES, CF_EDGES, CF_METADATA];
