//! Finality guard - base state and chain validity checks
//!
//! One guard per record kind. The guard owns the latest finalized record
//! (and, for milestones, the sprint lock) behind a single `RwLock`; the
//! persistence layer is a dependency, not a co-owner.

use crate::domain::{chain, FinalityKind, FinalityRecord, SprintLock};
use crate::error::{FinalityError, FinalityResult, StoreError};
use crate::ports::inbound::ChainValidator;
use crate::ports::outbound::{FinalityMetrics, PeerHeaderFetcher};
use crate::store::FinalityStore;
use parking_lot::RwLock;
use shared_types::{BlockHeader, Hash};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// State covered by the guard's lock
#[derive(Debug, Default)]
pub(crate) struct GuardState {
    /// Latest finalized record, `None` until the first confirmation
    pub(crate) record: Option<FinalityRecord>,
    /// Candidate sprint boundary (milestones only; stays default otherwise)
    pub(crate) sprint: SprintLock,
}

/// Finality guard for record kind `K`
///
/// See `MilestoneGuard` / `CheckpointGuard`.
pub struct FinalityGuard<K: FinalityKind> {
    pub(crate) state: Arc<RwLock<GuardState>>,
    store: FinalityStore,
    metrics: Arc<dyn FinalityMetrics>,
    enabled: AtomicBool,
    _kind: PhantomData<K>,
}

impl<K: FinalityKind> FinalityGuard<K> {
    /// Create a guard with no finalized record, ignoring anything stored.
    pub fn new(enabled: bool, store: FinalityStore, metrics: Arc<dyn FinalityMetrics>) -> Self {
        Self::from_state(GuardState::default(), enabled, store, metrics)
    }

    /// Create a guard resuming from the stored record (and lock field).
    ///
    /// Missing records mean "not yet initialized". Corrupt records are
    /// returned as errors and left in place.
    pub fn open(
        enabled: bool,
        store: FinalityStore,
        metrics: Arc<dyn FinalityMetrics>,
    ) -> FinalityResult<Self> {
        let resume_err = |source| FinalityError::Resume {
            kind: K::NAME,
            source,
        };

        let record = match store.read_finality::<K>() {
            Ok(record) => {
                info!(
                    kind = K::NAME,
                    block = record.block,
                    "[qc-09] Resumed latest {} from storage",
                    K::NAME
                );
                Some(record)
            }
            Err(StoreError::NotFound { .. }) => {
                debug!(kind = K::NAME, "[qc-09] No {} stored yet", K::NAME);
                None
            }
            Err(e) => return Err(resume_err(e)),
        };

        let sprint = if K::SPRINT_LOCKING {
            match store.read_lock_field() {
                Ok(lock) => {
                    info!(
                        locked = lock.locked,
                        block = lock.locked_sprint_number,
                        ids = lock.pending_ids.len(),
                        "[qc-09] Resumed sprint lock from storage"
                    );
                    lock
                }
                Err(StoreError::NotFound { .. }) => SprintLock::default(),
                Err(e) => return Err(resume_err(e)),
            }
        } else {
            SprintLock::default()
        };

        let state = GuardState { record, sprint };
        Ok(Self::from_state(state, enabled, store, metrics))
    }

    fn from_state(
        state: GuardState,
        enabled: bool,
        store: FinalityStore,
        metrics: Arc<dyn FinalityMetrics>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            store,
            metrics,
            enabled: AtomicBool::new(enabled),
            _kind: PhantomData,
        }
    }

    /// Whether validity checks are enforced.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Administrative switch. Disabled guards accept every chain and peer.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Latest finalized record held in memory.
    pub fn get(&self) -> Option<FinalityRecord> {
        self.state.read().record
    }

    /// Forget the in-memory record. Storage is left untouched.
    pub fn purge(&self) {
        self.state.write().record = None;
    }

    /// Check a candidate chain against the finalized record and, for
    /// milestones, against the locked sprint boundary.
    pub fn is_valid_chain(&self, current_header: &BlockHeader, chain: &[BlockHeader]) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let state = self.state.read();

        if !chain::is_valid_chain(current_header.height, chain, state.record.as_ref()) {
            return false;
        }

        !K::SPRINT_LOCKING || state.sprint.allows(chain)
    }

    /// Check that a peer agrees with us on the finalized block.
    ///
    /// The lock is not held while the peer is queried. Fetch errors are
    /// returned unchanged; an empty answer counts as a mismatch.
    pub async fn is_valid_peer<F>(&self, fetcher: &F) -> Result<bool, F::Error>
    where
        F: PeerHeaderFetcher + ?Sized,
    {
        if !self.is_enabled() {
            return Ok(true);
        }

        let Some(record) = self.get() else {
            return Ok(true);
        };

        let (headers, hashes) = fetcher
            .fetch_headers_by_number(record.block, 1, 0, false)
            .await?;

        let (Some(header), Some(hash)) = (headers.first(), hashes.first()) else {
            warn!(
                kind = K::NAME,
                block = record.block,
                "[qc-09] Peer returned no header for the latest {}",
                K::NAME
            );
            return Ok(false);
        };

        let valid = header.height == record.block && *hash == record.hash;
        if !valid {
            warn!(
                kind = K::NAME,
                block = record.block,
                remote_block = header.height,
                "[qc-09] Peer disagrees with the latest {}",
                K::NAME
            );
        }

        Ok(valid)
    }

    /// Advance finality to a confirmed `(block, hash)`.
    ///
    /// Idempotent by height: a repeat at the current height is ignored even
    /// with a different hash. Holds the write lock throughout, including the
    /// storage write and the sprint unlock.
    pub fn process(&self, block: u64, hash: Hash) {
        let mut state = self.state.write();
        self.process_locked(&mut state, block, hash);
    }

    pub(crate) fn process_locked(&self, state: &mut GuardState, block: u64, hash: Hash) {
        if state.record.map(|r| r.block) == Some(block) {
            return;
        }

        state.record = Some(FinalityRecord::new(block, hash));

        if let Err(e) = self.store.write_finality::<K>(block, hash) {
            error!(
                kind = K::NAME,
                block,
                err = %e,
                "[qc-09] Error in writing {} state to db",
                K::NAME
            );
        }

        self.metrics.set_latest_finalized(K::NAME, block);
        info!(kind = K::NAME, block, "[qc-09] Whitelisted new {}", K::NAME);

        if K::SPRINT_LOCKING {
            self.unlock_sprint_locked(state, block);
        }
    }

    /// Release the sprint lock once `end_block` reaches the boundary.
    pub(crate) fn unlock_sprint_locked(&self, state: &mut GuardState, end_block: u64) {
        if state.sprint.unlock_through(end_block) {
            self.persist_lock_field(&state.sprint);
        }
    }

    /// Storage failures are logged; memory stays authoritative.
    pub(crate) fn persist_lock_field(&self, lock: &SprintLock) {
        if let Err(e) = self.store.write_lock_field(lock) {
            error!(err = %e, "[qc-09] Error in writing lock data of milestone to db");
        }
    }
}

impl<K: FinalityKind> ChainValidator for FinalityGuard<K> {
    fn is_valid_chain(&self, current_header: &BlockHeader, chain: &[BlockHeader]) -> bool {
        FinalityGuard::is_valid_chain(self, current_header, chain)
    }
}
