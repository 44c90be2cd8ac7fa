//! Chain validity rules
//!
//! Pure functions over a candidate chain. Chains are contiguous and ordered
//! by ascending height, so at most one header matches any given height.

use super::record::FinalityRecord;
use shared_types::{BlockHeader, Hash};

/// Check a candidate chain against the latest finalized record.
///
/// A chain is valid iff:
/// 1. No finalized record exists, OR
/// 2. It contains the finalized height with the finalized hash, OR
/// 3. It does not contain the finalized height and either lies entirely
///    above it, or ends below it while the local head is also below it
///
/// Empty chains are never valid.
pub fn is_valid_chain(
    current_head: u64,
    chain: &[BlockHeader],
    finalized: Option<&FinalityRecord>,
) -> bool {
    let Some(tip) = chain.last() else {
        return false;
    };

    let Some(finalized) = finalized else {
        return true;
    };

    if let Some(header) = chain.iter().rev().find(|h| h.height == finalized.block) {
        return header.hash() == finalized.hash;
    }

    if tip.height < finalized.block {
        // Rewinding below finality is only harmless if we never got there.
        return current_head < finalized.block;
    }

    true
}

/// Check whether a chain may replace blocks around a locked sprint boundary.
///
/// The chain must extend past the boundary, and if it contains the boundary
/// height, the header there must carry the locked hash.
pub fn is_reorg_allowed(chain: &[BlockHeader], locked_number: u64, locked_hash: &Hash) -> bool {
    let Some(tip) = chain.last() else {
        return false;
    };

    if tip.height <= locked_number {
        return false;
    }

    match chain.iter().find(|h| h.height == locked_number) {
        Some(header) => header.hash() == *locked_hash,
        None => true,
    }
}
