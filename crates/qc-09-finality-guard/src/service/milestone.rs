//! Milestone sprint-locking protocol
//!
//! A voting round for a candidate sprint boundary runs inside one extended
//! critical section:
//!
//! ```text
//! lock_mutex(end) ──→ SprintVoteLock ──(external vote)──→ unlock_mutex(lock, confirm, id, hash)
//!        │                                                        │
//!        └─ rejected: None, lock released              persist LockField, release
//! ```
//!
//! ## Liveness
//!
//! While a `SprintVoteLock` is alive, every other operation on the guard
//! (validity checks, `process`, another `lock_mutex`) blocks, so no caller
//! observes a half-decided vote. A token that is never consumed or dropped
//! stalls the guard forever, and calling `lock_mutex` again on the thread
//! that holds a token deadlocks it. There is no timeout.
//!
//! Dropping a token without `unlock_mutex` releases the lock but skips the
//! commit and the lock-field write.

use super::guard::{FinalityGuard, GuardState};
use crate::domain::{chain, Milestone, SprintLock};
use lock_api::ArcRwLockWriteGuard;
use parking_lot::RawRwLock;
use shared_types::{BlockHeader, Hash};
use std::sync::Arc;
use tracing::{debug, warn};

/// Guard for milestones, with sprint locking.
pub type MilestoneGuard = FinalityGuard<Milestone>;

/// Exclusive hold on a milestone guard for the duration of a voting round.
///
/// Returned by `lock_mutex`, consumed by `unlock_mutex`.
#[must_use = "a vote lock blocks the guard until it is passed to unlock_mutex"]
pub struct SprintVoteLock {
    state: ArcRwLockWriteGuard<RawRwLock, GuardState>,
    end_block: u64,
}

impl SprintVoteLock {
    /// Candidate sprint end this round is voting on.
    pub fn end_block(&self) -> u64 {
        self.end_block
    }
}

impl std::fmt::Debug for SprintVoteLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SprintVoteLock")
            .field("end_block", &self.end_block)
            .finish_non_exhaustive()
    }
}

impl FinalityGuard<Milestone> {
    /// Start a voting round for a sprint ending at `end_block`.
    ///
    /// Returns `None` (with the lock already released) if the candidate is
    /// stale: finality is already at or past `end_block`, or a higher
    /// boundary is locked. A newer boundary replaces the locked one.
    pub fn lock_mutex(&self, end_block: u64) -> Option<SprintVoteLock> {
        let mut state = self.state.write_arc();

        if let Some(record) = state.record {
            if end_block <= record.block {
                warn!(
                    end_block,
                    milestone = record.block,
                    "[qc-09] Sprint end is not past the latest milestone"
                );
                return None;
            }
        }

        let locked_number = state.sprint.locked_sprint_number;
        if state.sprint.locked && end_block != locked_number {
            if end_block < locked_number {
                warn!(
                    end_block,
                    locked = locked_number,
                    "[qc-09] Sprint end is behind the locked sprint"
                );
                return None;
            }

            warn!(
                end_block,
                locked = locked_number,
                "[qc-09] Replacing locked sprint with a newer one"
            );
            self.unlock_sprint_locked(&mut state, locked_number);
        }

        state.sprint.locked_sprint_number = end_block;

        Some(SprintVoteLock { state, end_block })
    }

    /// Commit the outcome of the round started by `lock_mutex` and release
    /// the guard.
    ///
    /// A confirmed round locks `end_hash` and records `proposal_id`; an
    /// unconfirmed one never clears a lock taken by an earlier round. The
    /// lock field is written either way.
    pub fn unlock_mutex(
        &self,
        lock: SprintVoteLock,
        confirm: bool,
        proposal_id: &str,
        end_hash: Hash,
    ) {
        let SprintVoteLock { mut state, end_block } = lock;
        debug_assert!(
            Arc::ptr_eq(ArcRwLockWriteGuard::rwlock(&state), &self.state),
            "vote lock belongs to another guard"
        );

        state.sprint.commit_vote(confirm, proposal_id, end_hash);
        self.persist_lock_field(&state.sprint);

        debug!(
            end_block,
            confirm,
            proposal_id,
            locked = state.sprint.locked,
            "[qc-09] Sprint vote committed"
        );
    }

    /// Release the locked sprint if `end_block` has reached it.
    pub fn unlock_sprint(&self, end_block: u64) {
        let mut state = self.state.write();
        self.unlock_sprint_locked(&mut state, end_block);
    }

    /// Withdraw one proposal; the lock is released with the last one.
    pub fn remove_milestone_id(&self, proposal_id: &str) {
        let mut state = self.state.write();

        state.sprint.remove_id(proposal_id);
        self.persist_lock_field(&state.sprint);
    }

    /// Proposals currently contributing to the lock.
    pub fn get_milestone_ids(&self) -> Vec<String> {
        self.state.read().sprint.pending_ids.iter().cloned().collect()
    }

    /// Snapshot of the sprint lock.
    pub fn sprint_lock(&self) -> SprintLock {
        self.state.read().sprint.clone()
    }

    /// Check whether `chain` may reorg around a boundary locked at
    /// `(locked_number, locked_hash)`.
    pub fn is_reorg_allowed(
        &self,
        chain: &[BlockHeader],
        locked_number: u64,
        locked_hash: Hash,
    ) -> bool {
        chain::is_reorg_allowed(chain, locked_number, &locked_hash)
    }
}
