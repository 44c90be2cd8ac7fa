//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Everything the guard needs from the host node: a key-value store, a
//! record codec, a peer header source and a metrics sink.

use crate::domain::{FinalityRecord, SprintLock};
use crate::error::{CodecError, KVStoreError};
use async_trait::async_trait;
use shared_types::{BlockHeader, Hash};

/// Abstract interface for key-value database operations.
///
/// One store is shared by the milestone and checkpoint guards, so writes
/// take `&self`; backends synchronize internally. Writes must be
/// crash-consistent per key.
///
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Encoding of the persisted records.
///
/// Default: `JsonRecordCodec`
pub trait RecordCodec: Send + Sync {
    fn encode_finality(&self, record: &FinalityRecord) -> Result<Vec<u8>, CodecError>;

    fn decode_finality(&self, data: &[u8]) -> Result<FinalityRecord, CodecError>;

    fn encode_lock_field(&self, lock: &SprintLock) -> Result<Vec<u8>, CodecError>;

    fn decode_lock_field(&self, data: &[u8]) -> Result<SprintLock, CodecError>;
}

/// Header source of a remote peer, used to check the peer's view of the
/// finalized block before syncing from it.
#[async_trait]
pub trait PeerHeaderFetcher: Send + Sync {
    /// Error reported by the transport. Passed through to callers untouched.
    type Error: Send;

    /// Fetch `amount` headers starting at `number`, skipping `skip` between
    /// each, walking backwards if `reverse`. Returns headers and their hashes.
    async fn fetch_headers_by_number(
        &self,
        number: u64,
        amount: usize,
        skip: usize,
        reverse: bool,
    ) -> Result<(Vec<BlockHeader>, Vec<Hash>), Self::Error>;
}

/// Observability sink. Fire-and-forget.
pub trait FinalityMetrics: Send + Sync {
    /// Report the latest finalized height for a record kind.
    fn set_latest_finalized(&self, kind: &'static str, height: u64);
}
