//! Finality record and the two record kinds
//!
//! A record is the latest `(block, hash)` the validator set confirmed as
//! final. Milestones and checkpoints share the shape but never the storage
//! key or the in-memory state.

use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Storage key of the sprint lock-field record (one per store).
pub const LOCK_FIELD_KEY: &[u8] = b"LockField";

/// Latest confirmed finalized point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalityRecord {
    /// Block height
    pub block: u64,
    /// Block hash at that height
    pub hash: Hash,
}

impl FinalityRecord {
    pub fn new(block: u64, hash: Hash) -> Self {
        Self { block, hash }
    }
}

/// Compile-time tag selecting the storage key and behavior of a record kind.
pub trait FinalityKind: Send + Sync + 'static {
    /// Name used in logs, metrics labels and errors.
    const NAME: &'static str;
    /// Fixed key of the latest record in the key-value store.
    const STORAGE_KEY: &'static [u8];
    /// Whether guards of this kind run the sprint-locking protocol.
    const SPRINT_LOCKING: bool;
}

/// Milestone: frequent finality with an in-flight voting lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Milestone;

/// Checkpoint: infrequent finality, no sprint locking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint;

impl FinalityKind for Milestone {
    const NAME: &'static str = "milestone";
    const STORAGE_KEY: &'static [u8] = b"LastMilestone";
    const SPRINT_LOCKING: bool = true;
}

impl FinalityKind for Checkpoint {
    const NAME: &'static str = "checkpoint";
    const STORAGE_KEY: &'static [u8] = b"LastCheckpoint";
    const SPRINT_LOCKING: bool = false;
}
