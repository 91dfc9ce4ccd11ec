//! Composite key encoding for the directional adjacency indexes.
//!
//! Both directional column families use 32-byte keys made of four u64
//! components in big-endian order:
//!
//! ```text
//! fwd_edges: [edge_type][from][to  ][edge_id]
//! bwd_edges: [to       ][edge_type][from][edge_id]
//! ```
//!
//! In either layout the first 16 bytes fix the probe (the pair a search
//! holds constant) and bytes 16..32 hold the varying (neighbor, edge_id)
//! tail, so a single decode works for both directions and lexicographic
//! order within a probe is (neighbor, edge_id) order.
//!
//! Range bounds are filled into caller-owned buffers in place; a search
//! reuses one lower/upper pair across all of its probes.

use crate::types::{EdgeId, EdgeTypeId, NodeId};

/// Length in bytes of a directional index key.
pub const KEY_LEN: usize = 32;

/// Reusable range-bound buffer for one directional probe.
pub type RangeKey = [u8; KEY_LEN];

#[inline]
fn write_u64(buf: &mut RangeKey, pos: usize, value: u64) {
    buf[pos..pos + 8].copy_from_slice(&value.to_be_bytes());
}

/// Full forward index key for one edge.
#[must_use]
pub fn fwd_key(edge_type: EdgeTypeId, from: NodeId, to: NodeId, edge: EdgeId) -> RangeKey {
    let mut key = [0u8; KEY_LEN];
    write_u64(&mut key, 0, edge_type);
    write_u64(&mut key, 8, from);
    write_u64(&mut key, 16, to);
    write_u64(&mut key, 24, edge);
    key
}

/// Full backward index key for one edge.
#[must_use]
pub fn bwd_key(to: NodeId, edge_type: EdgeTypeId, from: NodeId, edge: EdgeId) -> RangeKey {
    let mut key = [0u8; KEY_LEN];
    write_u64(&mut key, 0, to);
    write_u64(&mut key, 8, edge_type);
    write_u64(&mut key, 16, from);
    write_u64(&mut key, 24, edge);
    key
}

/// Fill forward-probe bounds for a fixed (edge_type, from) pair.
///
/// The scan covers every (to, edge_id) tail: lower has the tail zeroed,
/// upper has it saturated. Bounds are inclusive.
pub fn fill_forward_bounds(
    lower: &mut RangeKey,
    upper: &mut RangeKey,
    edge_type: EdgeTypeId,
    from: NodeId,
) {
    write_u64(lower, 0, edge_type);
    write_u64(lower, 8, from);
    lower[16..].fill(0x00);

    write_u64(upper, 0, edge_type);
    write_u64(upper, 8, from);
    upper[16..].fill(0xFF);
}

/// Fill backward-probe bounds for a fixed (to, edge_type) pair.
pub fn fill_backward_bounds(
    lower: &mut RangeKey,
    upper: &mut RangeKey,
    to: NodeId,
    edge_type: EdgeTypeId,
) {
    write_u64(lower, 0, to);
    write_u64(lower, 8, edge_type);
    lower[16..].fill(0x00);

    write_u64(upper, 0, to);
    write_u64(upper, 8, edge_type);
    upper[16..].fill(0xFF);
}

/// Smallest key strictly greater than `upper`, for use as an exclusive
/// iteration bound.
///
/// Returns `None` when `upper` is the maximal key; no exclusive bound
/// exists there and the caller must cut the scan off itself.
#[must_use]
pub fn exclusive_upper_bound(upper: &RangeKey) -> Option<RangeKey> {
    let mut bound = *upper;
    for byte in bound.iter_mut().rev() {
        if *byte == 0xFF {
            *byte = 0x00;
        } else {
            *byte += 1;
            return Some(bound);
        }
    }
    None
}

/// Decode the (neighbor, edge_id) tail of a directional index key.
///
/// Valid for both layouts: the neighbor sits at bytes 16..24 and the edge
/// id at 24..32. Returns `None` if the key is not `KEY_LEN` bytes.
#[must_use]
pub fn decode_scan_entry(key: &[u8]) -> Option<(NodeId, EdgeId)> {
    if key.len() != KEY_LEN {
        return None;
    }
    let neighbor = u64::from_be_bytes(key[16..24].try_into().ok()?);
    let edge = u64::from_be_bytes(key[24..32].try_into().ok()?);
    Some((neighbor, edge))
}

/// 8-byte big-endian key for the nodes and edges column families.
#[must_use]
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fwd_key_layout() {
        let key = fwd_key(1, 2, 3, 4);
        assert_eq!(u64::from_be_bytes(key[0..8].try_into().unwrap()), 1);
        assert_eq!(u64::from_be_bytes(key[8..16].try_into().unwrap()), 2);
        assert_eq!(decode_scan_entry(&key), Some((3, 4)));
    }

    #[test]
    fn test_bwd_key_layout() {
        let key = bwd_key(9, 1, 5, 4);
        assert_eq!(u64::from_be_bytes(key[0..8].try_into().unwrap()), 9);
        assert_eq!(u64::from_be_bytes(key[8..16].try_into().unwrap()), 1);
        // Neighbor of a backward probe is the edge's from node
        assert_eq!(decode_scan_entry(&key), Some((5, 4)));
    }

    #[test]
    fn test_bounds_bracket_all_tails() {
        let mut lower = [0u8; KEY_LEN];
        let mut upper = [0u8; KEY_LEN];
        fill_forward_bounds(&mut lower, &mut upper, 1, 2);

        let smallest = fwd_key(1, 2, 0, 0);
        let largest = fwd_key(1, 2, u64::MAX, u64::MAX);
        assert!(lower[..] <= smallest[..]);
        assert!(upper[..] >= largest[..]);

        // Keys of a different (type, from) fall outside the bounds
        let other = fwd_key(1, 3, 0, 0);
        assert!(other[..] > upper[..]);
    }

    #[test]
    fn test_big_endian_preserves_numeric_order() {
        // Lexicographic key order must equal numeric (neighbor, edge) order
        let a = fwd_key(1, 1, 2, 500);
        let b = fwd_key(1, 1, 3, 1);
        assert!(a[..] < b[..]);

        let c = fwd_key(1, 1, 3, 2);
        assert!(b[..] < c[..]);
    }

    #[test]
    fn test_bounds_buffers_are_reusable() {
        let mut lower = [0u8; KEY_LEN];
        let mut upper = [0u8; KEY_LEN];

        fill_forward_bounds(&mut lower, &mut upper, 1, 2);
        let first = lower;
        fill_backward_bounds(&mut lower, &mut upper, 7, 8);
        // Every byte is overwritten by the second fill
        assert_ne!(lower, first);
        assert_eq!(u64::from_be_bytes(lower[0..8].try_into().unwrap()), 7);
        assert_eq!(lower[16..], [0u8; 16][..]);
        assert_eq!(upper[16..], [0xFFu8; 16][..]);
    }

    #[test]
    fn test_exclusive_upper_bound_is_next_prefix() {
        let mut lower = [0u8; KEY_LEN];
        let mut upper = [0u8; KEY_LEN];
        fill_forward_bounds(&mut lower, &mut upper, 1, 2);

        // The saturated tail carries into the prefix: the bound is exactly
        // the lower bound of the next (type, from) pair
        let bound = exclusive_upper_bound(&upper).unwrap();
        let mut next_lower = [0u8; KEY_LEN];
        let mut next_upper = [0u8; KEY_LEN];
        fill_forward_bounds(&mut next_lower, &mut next_upper, 1, 3);
        assert_eq!(bound, next_lower);

        // Every key inside the probe stays below the bound
        let largest = fwd_key(1, 2, u64::MAX, u64::MAX);
        assert!(largest[..] < bound[..]);
    }

    #[test]
    fn test_exclusive_upper_bound_saturates_at_maximal_key() {
        assert_eq!(exclusive_upper_bound(&[0xFFu8; KEY_LEN]), None);

        let mut lower = [0u8; KEY_LEN];
        let mut upper = [0u8; KEY_LEN];
        fill_forward_bounds(&mut lower, &mut upper, u64::MAX, u64::MAX);
        assert_eq!(exclusive_upper_bound(&upper), None);
    }

    #[test]
    fn test_decode_rejects_short_keys() {
        assert_eq!(decode_scan_entry(&[0u8; 8]), None);
        assert_eq!(decode_scan_entry(&[]), None);
    }
}
