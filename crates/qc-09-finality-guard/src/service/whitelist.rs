//! Finality whitelist - node-level view over both guards
//!
//! A candidate chain or peer must satisfy the checkpoint guard and the
//! milestone guard. Checkpoint is consulted first.

use super::CheckpointGuard;
use super::guard::FinalityGuard;
use super::milestone::MilestoneGuard;
use crate::config::GuardConfig;
use crate::error::FinalityResult;
use crate::ports::inbound::ChainValidator;
use crate::ports::outbound::{FinalityMetrics, PeerHeaderFetcher};
use crate::store::FinalityStore;
use shared_types::{BlockHeader, Hash};
use std::sync::Arc;

/// Checkpoint and milestone guards over one store.
pub struct FinalityWhitelist {
    checkpoint: CheckpointGuard,
    milestone: MilestoneGuard,
}

impl FinalityWhitelist {
    /// Fresh whitelist with nothing finalized.
    pub fn new(
        config: &GuardConfig,
        store: FinalityStore,
        metrics: Arc<dyn FinalityMetrics>,
    ) -> Self {
        Self {
            checkpoint: FinalityGuard::new(
                config.checkpoint_enabled,
                store.clone(),
                metrics.clone(),
            ),
            milestone: FinalityGuard::new(config.milestone_enabled, store, metrics),
        }
    }

    /// Whitelist resumed from storage.
    pub fn open(
        config: &GuardConfig,
        store: FinalityStore,
        metrics: Arc<dyn FinalityMetrics>,
    ) -> FinalityResult<Self> {
        Ok(Self {
            checkpoint: FinalityGuard::open(
                config.checkpoint_enabled,
                store.clone(),
                metrics.clone(),
            )?,
            milestone: FinalityGuard::open(config.milestone_enabled, store, metrics)?,
        })
    }

    pub fn checkpoint(&self) -> &CheckpointGuard {
        &self.checkpoint
    }

    /// Milestone guard, for the voting driver.
    pub fn milestone(&self) -> &MilestoneGuard {
        &self.milestone
    }

    pub fn process_checkpoint(&self, block: u64, hash: Hash) {
        self.checkpoint.process(block, hash);
    }

    pub fn process_milestone(&self, block: u64, hash: Hash) {
        self.milestone.process(block, hash);
    }

    /// Latest finalized height, preferring the milestone.
    pub fn finalized_block_number(&self) -> Option<u64> {
        self.milestone
            .get()
            .or_else(|| self.checkpoint.get())
            .map(|record| record.block)
    }

    /// Check a candidate chain against both guards.
    pub fn is_valid_chain(&self, current_header: &BlockHeader, chain: &[BlockHeader]) -> bool {
        self.checkpoint.is_valid_chain(current_header, chain)
            && self.milestone.is_valid_chain(current_header, chain)
    }

    /// Check a peer against both guards. The first rejection or error wins.
    pub async fn is_valid_peer<F>(&self, fetcher: &F) -> Result<bool, F::Error>
    where
        F: PeerHeaderFetcher + ?Sized,
    {
        if !self.checkpoint.is_valid_peer(fetcher).await? {
            return Ok(false);
        }

        self.milestone.is_valid_peer(fetcher).await
    }
}

impl ChainValidator for FinalityWhitelist {
    fn is_valid_chain(&self, current_header: &BlockHeader, chain: &[BlockHeader]) -> bool {
        FinalityWhitelist::is_valid_chain(self, current_header, chain)
    }
}
