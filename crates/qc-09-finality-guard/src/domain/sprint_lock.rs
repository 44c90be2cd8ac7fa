//! Sprint lock entity
//!
//! Tracks the single candidate sprint boundary a milestone voting round may
//! be proposing while finality has not yet advanced past it.
//!
//! State Machine:
//! ```text
//! [UNLOCKED] ──vote confirmed──→ [LOCKED {number, hash, ids}]
//!     ↑                                │
//!     ├──── finality >= number ────────┤
//!     └──── last id withdrawn ─────────┘
//! ```

use super::chain::is_reorg_allowed;
use serde::{Deserialize, Serialize};
use shared_types::{BlockHeader, Hash};
use std::collections::BTreeSet;

/// In-progress agreement on a candidate sprint boundary.
///
/// Field names on the wire follow the stored lock-field layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintLock {
    /// Whether a sprint boundary is currently locked
    #[serde(rename = "val")]
    pub locked: bool,
    /// Candidate boundary height
    #[serde(rename = "block")]
    pub locked_sprint_number: u64,
    /// Hash voted for at the candidate boundary
    #[serde(rename = "hash")]
    pub locked_sprint_hash: Hash,
    /// Milestone proposals contributing to the lock
    #[serde(rename = "idList")]
    pub pending_ids: BTreeSet<String>,
}

impl SprintLock {
    /// Record the outcome of a voting round.
    ///
    /// A round that does not confirm never clears a lock held by another round.
    pub fn commit_vote(&mut self, confirm: bool, proposal_id: &str, end_hash: Hash) {
        self.locked = self.locked || confirm;

        if confirm {
            self.locked_sprint_hash = end_hash;
            self.pending_ids.insert(proposal_id.to_string());
        }
    }

    /// Release the lock if `end_block` has reached the locked boundary.
    ///
    /// Returns false (and changes nothing) for an earlier block.
    pub fn unlock_through(&mut self, end_block: u64) -> bool {
        if end_block < self.locked_sprint_number {
            return false;
        }

        self.locked = false;
        self.pending_ids.clear();
        true
    }

    /// Withdraw one contributing proposal. The lock goes with the last one.
    pub fn remove_id(&mut self, proposal_id: &str) {
        self.pending_ids.remove(proposal_id);

        if self.pending_ids.is_empty() {
            self.locked = false;
        }
    }

    /// Check a candidate chain against the locked boundary (if any).
    pub fn allows(&self, chain: &[BlockHeader]) -> bool {
        !self.locked || is_reorg_allowed(chain, self.locked_sprint_number, &self.locked_sprint_hash)
    }
}
