//! Shared helpers for unit tests.

use crate::domain::{FinalityRecord, SprintLock};
use crate::error::{CodecError, KVStoreError};
use crate::ports::outbound::{KeyValueStore, RecordCodec};
use shared_types::{BlockHeader, Hash};

/// Build a linked chain covering `from..=to`. Different `fork` values give
/// different hashes at every height.
pub fn make_chain(from: u64, to: u64, fork: u8) -> Vec<BlockHeader> {
    let mut parent_hash: Hash = [0u8; 32];
    let mut chain = Vec::new();

    for height in from..=to {
        let header = BlockHeader {
            height,
            parent_hash,
            timestamp: 1_700_000_000 + height,
            proposer: [fork; 32],
            ..BlockHeader::default()
        };
        parent_hash = header.hash();
        chain.push(header);
    }

    chain
}

/// Hash of the header at `height` in `chain`.
pub fn hash_at(chain: &[BlockHeader], height: u64) -> Hash {
    chain
        .iter()
        .find(|h| h.height == height)
        .map(|h| h.hash())
        .unwrap_or_else(|| panic!("height {} not in chain", height))
}

/// Store whose every operation fails.
pub struct FailingKVStore;

impl KeyValueStore for FailingKVStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Err(KVStoreError::Closed)
    }

    fn put(&self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "disk failure".to_string(),
        })
    }
}

/// Codec that refuses to encode anything.
pub struct FailingCodec;

impl RecordCodec for FailingCodec {
    fn encode_finality(&self, _record: &FinalityRecord) -> Result<Vec<u8>, CodecError> {
        Err(CodecError {
            message: "encoder offline".to_string(),
        })
    }

    fn decode_finality(&self, _data: &[u8]) -> Result<FinalityRecord, CodecError> {
        Err(CodecError {
            message: "decoder offline".to_string(),
        })
    }

    fn encode_lock_field(&self, _lock: &SprintLock) -> Result<Vec<u8>, CodecError> {
        Err(CodecError {
            message: "encoder offline".to_string(),
        })
    }

    fn decode_lock_field(&self, _data: &[u8]) -> Result<SprintLock, CodecError> {
        Err(CodecError {
            message: "decoder offline".to_string(),
        })
    }
}
