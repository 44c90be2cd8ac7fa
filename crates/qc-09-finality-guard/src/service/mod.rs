//! Finality guard services
//!
//! - `guard`: base record handling and validity checks, shared by both kinds
//! - `milestone`: sprint-locking vote protocol
//! - `whitelist`: node-level facade over checkpoint and milestone guards

pub mod guard;
pub mod milestone;
pub mod whitelist;

use crate::domain::Checkpoint;

pub use guard::FinalityGuard;
pub use milestone::{MilestoneGuard, SprintVoteLock};
pub use whitelist::FinalityWhitelist;

/// Guard for checkpoints. No sprint locking.
pub type CheckpointGuard = FinalityGuard<Checkpoint>;
