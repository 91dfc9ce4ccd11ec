//! RocksDB storage backend for the property-path engine.
//!
//! The engine consumes storage through three contracts only: a membership
//! test on the node index, and ordered range scans over the two
//! directional adjacency indexes. This module also carries the write path
//! used to build graphs and an edge-record table for diagnostics.
//!
//! # Column Families
//!
//! | Column Family | Key | Value | Optimization |
//! |---------------|-----|-------|--------------|
//! | nodes | NodeId (8B BE) | empty | Point lookups (existence) |
//! | fwd_edges | type+from+to+edge (32B BE) | empty | Prefix range scans |
//! | bwd_edges | to+type+from+edge (32B BE) | empty | Prefix range scans |
//! | edges | EdgeId (8B BE) | EdgeRecord (bincode) | Point lookups |
//! | metadata | key string | fixed-width integers | Small CF |
//!
//! Keys are big-endian so lexicographic order equals numeric order; the
//! directional CFs are therefore ordered by neighbor then edge id within
//! each (type, anchor) prefix, which is exactly the order the BFS probes
//! consume.
//!
//! # Module Structure
//!
//! - [`config`]: Storage configuration with validation
//! - [`constants`]: Column family name constants
//! - [`descriptors`]: Column family descriptor generation
//! - [`keys`]: Composite key encoding and reusable range bounds
//! - [`store`]: GraphStore implementation and adjacency scans

pub mod config;
pub mod constants;
pub mod descriptors;
pub mod keys;
pub mod store;

pub use config::StorageConfig;
pub use constants::{
    ALL_COLUMN_FAMILIES, CF_BWD_EDGES, CF_EDGES, CF_FWD_EDGES, CF_METADATA, CF_NODES,
};
pub use descriptors::{get_column_family_descriptors, get_db_options};
pub use keys::{RangeKey, KEY_LEN};
pub use store::{AdjacencyScan, EdgeRecord, GraphStore, SCHEMA_VERSION};
