//! Domain module for the Finality Guard subsystem
//!
//! ## Modules
//! - record: Finality records and the milestone/checkpoint kinds
//! - sprint_lock: Candidate sprint boundary held during milestone voting
//! - chain: Chain validity and reorg rules

pub mod chain;
pub mod record;
pub mod sprint_lock;

pub use chain::{is_reorg_allowed, is_valid_chain};
pub use record::{Checkpoint, FinalityKind, FinalityRecord, Milestone, LOCK_FIELD_KEY};
pub use sprint_lock::SprintLock;
