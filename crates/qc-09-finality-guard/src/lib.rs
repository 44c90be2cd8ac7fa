//! # qc-09-finality-guard
//!
//! Finality whitelist protecting the node from reorganizations past
//! externally confirmed blocks.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Milestones**: Frequent finality confirmations with a sprint-locking
//!   vote protocol
//! - **Checkpoints**: Periodic finality confirmations
//! - **Chain Validation**: Rejects candidate chains that contradict finality
//! - **Peer Validation**: Rejects peers that disagree on the finalized block
//! - **Persistence**: Survives restarts through a key-value store
//!
//! ## Architecture
//!
//! ```text
//! Voting driver ──lock_mutex / unlock_mutex──→ MilestoneGuard ──┐
//!                                                               ├── FinalityStore ──→ KeyValueStore
//! Finality source ──process──→ CheckpointGuard ─────────────────┘
//!
//! Chain import ──is_valid_chain──→ FinalityWhitelist
//! Peer sync ─────is_valid_peer───→ FinalityWhitelist ──→ PeerHeaderFetcher
//! ```
//!
//! ## Sprint Locking
//!
//! ```text
//! [UNLOCKED] ──confirm vote──→ [LOCKED {end, hash, ids}] ──process(>= end)──→ [UNLOCKED]
//!                                      │
//!                                      └── unlock_sprint(>= end) ──→ [UNLOCKED]
//! ```
//!
//! While locked, chains that rewrite the locked boundary are rejected.
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_09_finality_guard::{FinalityStore, FinalityWhitelist, GuardConfig};
//! use qc_09_finality_guard::adapters::{InMemoryKVStore, NoopFinalityMetrics};
//!
//! let store = FinalityStore::new(Arc::new(InMemoryKVStore::new()));
//! let whitelist = FinalityWhitelist::open(&GuardConfig::from_env(), store, Arc::new(NoopFinalityMetrics))?;
//!
//! if let Some(lock) = whitelist.milestone().lock_mutex(end_block) {
//!     let confirm = vote_on(end_block).await;
//!     whitelist.milestone().unlock_mutex(lock, confirm, &proposal_id, end_hash);
//! }
//!
//! let ok = whitelist.is_valid_chain(&current_header, &incoming);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use config::GuardConfig;
pub use domain::{Checkpoint, FinalityKind, FinalityRecord, Milestone, SprintLock};
pub use error::{FinalityError, FinalityResult, StoreError};
pub use service::{
    CheckpointGuard, FinalityGuard, FinalityWhitelist, MilestoneGuard, SprintVoteLock,
};
pub use store::FinalityStore;
