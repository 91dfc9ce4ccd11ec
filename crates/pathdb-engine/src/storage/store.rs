//! GraphStore implementation and directional adjacency scans.
//!
//! The read surface consumed by the search is deliberately narrow:
//! `contains_node` for the existence gate and `scan` for ordered
//! directional probes. The write surface exists to build graphs and is not
//! used during an evaluation.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rocksdb::{ColumnFamily, DBIteratorWithThreadMode, IteratorMode, ReadOptions, WriteBatch, DB};
use serde::{Deserialize, Serialize};

use super::keys::{self, RangeKey};
use super::{
    get_column_family_descriptors, get_db_options, StorageConfig, CF_BWD_EDGES, CF_EDGES,
    CF_FWD_EDGES, CF_METADATA, CF_NODES,
};
use crate::automaton::Direction;
use crate::error::{EngineError, EngineResult};
use crate::types::{EdgeId, EdgeTypeId, NodeId};

/// Current storage schema version.
pub const SCHEMA_VERSION: u32 = 1;

const META_SCHEMA_VERSION: &[u8] = b"schema_version";
const META_NEXT_EDGE_ID: &[u8] = b"next_edge_id";

/// Stored record for one edge, keyed by its id.
///
/// The directional indexes carry everything the search needs; this record
/// backs point lookups for tools and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub from: NodeId,
    pub edge_type: EdgeTypeId,
    pub to: NodeId,
}

/// Graph storage backed by RocksDB.
///
/// Thread-safe via Arc<DB>. Clone is cheap (Arc clone).
///
/// # Column Families
///
/// - `nodes`: node existence index (membership tests)
/// - `fwd_edges` / `bwd_edges`: directional adjacency indexes
/// - `edges`: edge records by id
/// - `metadata`: schema version and edge-id counter
#[derive(Clone)]
pub struct GraphStore {
    db: Arc<DB>,
    next_edge_id: Arc<AtomicU64>,
}

impl GraphStore {
    /// Open graph storage at the given path.
    ///
    /// Stamps the schema version on a fresh database and refuses databases
    /// written by a newer schema.
    ///
    /// # Errors
    /// * `EngineError::StorageOpen` - failed to open the database
    /// * `EngineError::InvalidConfig` - invalid configuration
    /// * `EngineError::CorruptedData` - unreadable metadata or newer schema
    pub fn open<P: AsRef<Path>>(path: P, config: StorageConfig) -> EngineResult<Self> {
        let db_opts = get_db_options();
        let cf_descriptors = get_column_family_descriptors(&config)?;

        let db = DB::open_cf_descriptors(&db_opts, path.as_ref(), cf_descriptors).map_err(|e| {
            log::error!("Failed to open GraphStore at {:?}: {}", path.as_ref(), e);
            EngineError::StorageOpen {
                path: path.as_ref().to_string_lossy().into_owned(),
                cause: e.to_string(),
            }
        })?;

        let store = Self {
            db: Arc::new(db),
            next_edge_id: Arc::new(AtomicU64::new(1)),
        };
        store.ensure_schema()?;
        store
            .next_edge_id
            .store(store.read_meta_u64(META_NEXT_EDGE_ID)?.unwrap_or(1), Ordering::SeqCst);

        log::info!("GraphStore opened at {:?}", path.as_ref());
        Ok(store)
    }

    /// Open with default configuration.
    pub fn open_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::open(path, StorageConfig::default())
    }

    // ========== Column Family Helpers ==========

    pub(crate) fn cf_nodes(&self) -> EngineResult<&ColumnFamily> {
        self.db
            .cf_handle(CF_NODES)
            .ok_or_else(|| EngineError::ColumnFamilyNotFound(CF_NODES.to_string()))
    }

    pub(crate) fn cf_fwd_edges(&self) -> EngineResult<&ColumnFamily> {
        self.db
            .cf_handle(CF_FWD_EDGES)
            .ok_or_else(|| EngineError::ColumnFamilyNotFound(CF_FWD_EDGES.to_string()))
    }

    pub(crate) fn cf_bwd_edges(&self) -> EngineResult<&ColumnFamily> {
        self.db
            .cf_handle(CF_BWD_EDGES)
            .ok_or_else(|| EngineError::ColumnFamilyNotFound(CF_BWD_EDGES.to_string()))
    }

    pub(crate) fn cf_edges(&self) -> EngineResult<&ColumnFamily> {
        self.db
            .cf_handle(CF_EDGES)
            .ok_or_else(|| EngineError::ColumnFamilyNotFound(CF_EDGES.to_string()))
    }

    pub(crate) fn cf_metadata(&self) -> EngineResult<&ColumnFamily> {
        self.db
            .cf_handle(CF_METADATA)
            .ok_or_else(|| EngineError::ColumnFamilyNotFound(CF_METADATA.to_string()))
    }

    // ========== Node Operations ==========

    /// Register a node in the existence index.
    pub fn add_node(&self, node: NodeId) -> EngineResult<()> {
        let cf = self.cf_nodes()?;
        self.db.put_cf(cf, keys::id_key(node), [])?;
        log::trace!("PUT node node_id={}", node);
        Ok(())
    }

    /// Membership test for the node existence index.
    pub fn contains_node(&self, node: NodeId) -> EngineResult<bool> {
        let cf = self.cf_nodes()?;
        Ok(self.db.get_cf(cf, keys::id_key(node))?.is_some())
    }

    // ========== Edge Operations ==========

    /// Insert an edge `(from, edge_type, to)`.
    ///
    /// Allocates the next edge id, writes both directional index keys, the
    /// edge record, and registers both endpoints in the node index, all in
    /// one atomic batch.
    pub fn add_edge(
        &self,
        from: NodeId,
        edge_type: EdgeTypeId,
        to: NodeId,
    ) -> EngineResult<EdgeId> {
        let edge_id = self.next_edge_id.fetch_add(1, Ordering::SeqCst);
        let record = EdgeRecord {
            id: edge_id,
            from,
            edge_type,
            to,
        };

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf_fwd_edges()?, keys::fwd_key(edge_type, from, to, edge_id), []);
        batch.put_cf(self.cf_bwd_edges()?, keys::bwd_key(to, edge_type, from, edge_id), []);
        batch.put_cf(self.cf_edges()?, keys::id_key(edge_id), bincode::serialize(&record)?);
        batch.put_cf(self.cf_nodes()?, keys::id_key(from), []);
        batch.put_cf(self.cf_nodes()?, keys::id_key(to), []);
        batch.put_cf(
            self.cf_metadata()?,
            META_NEXT_EDGE_ID,
            (edge_id + 1).to_le_bytes(),
        );
        self.db.write(batch)?;

        log::trace!(
            "PUT edge edge_id={} from={} type={} to={}",
            edge_id,
            from,
            edge_type,
            to
        );
        Ok(edge_id)
    }

    /// Look up an edge record by id.
    pub fn get_edge(&self, edge_id: EdgeId) -> EngineResult<Option<EdgeRecord>> {
        let cf = self.cf_edges()?;
        match self.db.get_cf(cf, keys::id_key(edge_id))? {
            Some(bytes) => {
                let record: EdgeRecord =
                    bincode::deserialize(&bytes).map_err(|e| EngineError::CorruptedData {
                        location: format!("edges edge_id={}", edge_id),
                        details: e.to_string(),
                    })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    // ========== Directional Scans ==========

    /// Ordered range scan over one directional adjacency index.
    ///
    /// Yields `(neighbor, edge_id)` pairs between the inclusive bounds, in
    /// neighbor-then-edge order. An empty range is a normal outcome, not a
    /// failure. The caller owns the bound buffers and may reuse them for
    /// the next probe as soon as this call returns.
    pub fn scan(
        &self,
        direction: Direction,
        lower: &RangeKey,
        upper: &RangeKey,
    ) -> EngineResult<AdjacencyScan<'_>> {
        let cf = match direction {
            Direction::Forward => self.cf_fwd_edges()?,
            Direction::Backward => self.cf_bwd_edges()?,
        };
        // RocksDB takes an exclusive bound, the successor of the inclusive
        // upper. The maximal key has no successor; there the scan runs to
        // the end of the CF and the iterator's own bound check cuts it off.
        let mut read_opts = ReadOptions::default();
        if let Some(bound) = keys::exclusive_upper_bound(upper) {
            read_opts.set_iterate_upper_bound(bound.to_vec());
        }
        let inner = self.db.iterator_cf_opt(
            cf,
            read_opts,
            IteratorMode::From(&lower[..], rocksdb::Direction::Forward),
        );
        Ok(AdjacencyScan {
            inner,
            upper: *upper,
            done: false,
        })
    }

    // ========== Statistics ==========

    /// Count of nodes in the existence index.
    pub fn node_count(&self) -> EngineResult<usize> {
        let cf = self.cf_nodes()?;
        Ok(self.db.iterator_cf(cf, IteratorMode::Start).count())
    }

    /// Count of stored edge records.
    pub fn edge_count(&self) -> EngineResult<usize> {
        let cf = self.cf_edges()?;
        Ok(self.db.iterator_cf(cf, IteratorMode::Start).count())
    }

    // ========== Schema Version ==========

    /// Get schema version from the metadata CF (0 if never stamped).
    pub fn schema_version(&self) -> EngineResult<u32> {
        let cf = self.cf_metadata()?;
        match self.db.get_cf(cf, META_SCHEMA_VERSION)? {
            Some(bytes) => {
                if bytes.len() != 4 {
                    return Err(EngineError::CorruptedData {
                        location: "metadata/schema_version".to_string(),
                        details: format!("expected 4 bytes, got {}", bytes.len()),
                    });
                }
                Ok(u32::from_le_bytes(
                    bytes[..4]
                        .try_into()
                        .expect("verified 4 bytes above - this cannot fail"),
                ))
            }
            None => Ok(0),
        }
    }

    /// Stamp a fresh database, reject databases from a newer schema.
    fn ensure_schema(&self) -> EngineResult<()> {
        let stored = self.schema_version()?;
        match stored {
            0 => {
                let cf = self.cf_metadata()?;
                self.db
                    .put_cf(cf, META_SCHEMA_VERSION, SCHEMA_VERSION.to_le_bytes())?;
                log::debug!("stamped schema version {}", SCHEMA_VERSION);
                Ok(())
            }
            v if v == SCHEMA_VERSION => Ok(()),
            v => Err(EngineError::CorruptedData {
                location: "metadata/schema_version".to_string(),
                details: format!("database schema v{} is newer than supported v{}", v, SCHEMA_VERSION),
            }),
        }
    }

    fn read_meta_u64(&self, key: &[u8]) -> EngineResult<Option<u64>> {
        let cf = self.cf_metadata()?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => {
                if bytes.len() != 8 {
                    return Err(EngineError::CorruptedData {
                        location: format!("metadata/{}", String::from_utf8_lossy(key)),
                        details: format!("expected 8 bytes, got {}", bytes.len()),
                    });
                }
                Ok(Some(u64::from_le_bytes(
                    bytes[..8]
                        .try_into()
                        .expect("verified 8 bytes above - this cannot fail"),
                )))
            }
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("node_count", &self.node_count().unwrap_or(0))
            .field("edge_count", &self.edge_count().unwrap_or(0))
            .finish()
    }
}

/// Pull iterator over one directional index probe.
///
/// Yields `(neighbor, edge_id)` pairs in key order until the inclusive
/// upper bound is passed. Holds its own copy of the bound so the caller's
/// range buffers stay free for the next probe.
pub struct AdjacencyScan<'a> {
    inner: DBIteratorWithThreadMode<'a, DB>,
    upper: RangeKey,
    done: bool,
}

impl Iterator for AdjacencyScan<'_> {
    type Item = EngineResult<(NodeId, EdgeId)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next()? {
            Err(e) => {
                self.done = true;
                Some(Err(EngineError::from(e)))
            }
            Ok((key, _value)) => {
                if key.as_ref() > &self.upper[..] {
                    self.done = true;
                    return None;
                }
                match keys::decode_scan_entry(&key) {
                    Some(entry) => Some(Ok(entry)),
                    None => {
                        self.done = true;
                        Some(Err(EngineError::CorruptedData {
                            location: "directional index".to_string(),
                            details: format!("key of {} bytes, expected {}", key.len(), keys::KEY_LEN),
                        }))
                    }
                }
            }
        }
    }
}
