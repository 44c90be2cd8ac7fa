//! Finality persistence layer
//!
//! Reads and writes the latest finalized record of each kind and the
//! milestone lock field. One read/write path serves both kinds; the kind
//! only selects the storage key.
//!
//! | Key | Value |
//! |-----|-------|
//! | `LastMilestone` | `{block, hash}` |
//! | `LastCheckpoint` | `{block, hash}` |
//! | `LockField` | `{val, block, hash, idList}` |

use crate::adapters::JsonRecordCodec;
use crate::domain::{FinalityKind, FinalityRecord, SprintLock, LOCK_FIELD_KEY};
use crate::error::StoreError;
use crate::ports::outbound::{KeyValueStore, RecordCodec};
use shared_types::Hash;
use std::sync::Arc;
use tracing::error;

/// Typed access to the finality records of a key-value store.
#[derive(Clone)]
pub struct FinalityStore {
    db: Arc<dyn KeyValueStore>,
    codec: Arc<dyn RecordCodec>,
}

impl FinalityStore {
    /// Create a store using the default JSON codec.
    pub fn new(db: Arc<dyn KeyValueStore>) -> Self {
        Self::with_codec(db, Arc::new(JsonRecordCodec))
    }

    pub fn with_codec(db: Arc<dyn KeyValueStore>, codec: Arc<dyn RecordCodec>) -> Self {
        Self { db, codec }
    }

    /// Read the latest finalized record of kind `K`.
    ///
    /// # Errors
    /// * `NotFound` - nothing written yet, or an empty value
    /// * `Corrupt` - stored bytes failed to decode (raw bytes retained)
    /// * `StoreUnavailable` - the backend read failed
    pub fn read_finality<K: FinalityKind>(&self) -> Result<FinalityRecord, StoreError> {
        let data = self.fetch(K::STORAGE_KEY)?;

        match self.codec.decode_finality(&data) {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(
                    kind = K::NAME,
                    err = %e,
                    "[qc-09] Unable to decode the last {} record in database",
                    K::NAME
                );
                Err(StoreError::Corrupt {
                    key: key_name(K::STORAGE_KEY),
                    raw: data,
                    reason: e.message,
                })
            }
        }
    }

    /// Overwrite the latest finalized record of kind `K`.
    pub fn write_finality<K: FinalityKind>(&self, block: u64, hash: Hash) -> Result<(), StoreError> {
        let record = FinalityRecord::new(block, hash);

        let encoded = self.codec.encode_finality(&record).map_err(|e| {
            error!(kind = K::NAME, err = %e, "[qc-09] Failed to encode the {} record", K::NAME);
            StoreError::SerializationFailed {
                key: key_name(K::STORAGE_KEY),
                reason: e.message,
            }
        })?;

        self.store(K::STORAGE_KEY, &encoded)
    }

    /// Read the sprint lock field.
    pub fn read_lock_field(&self) -> Result<SprintLock, StoreError> {
        let data = self.fetch(LOCK_FIELD_KEY)?;

        match self.codec.decode_lock_field(&data) {
            Ok(lock) => Ok(lock),
            Err(e) => {
                error!(err = %e, "[qc-09] Unable to decode the lock field in database");
                Err(StoreError::Corrupt {
                    key: key_name(LOCK_FIELD_KEY),
                    raw: data,
                    reason: e.message,
                })
            }
        }
    }

    /// Overwrite the sprint lock field.
    pub fn write_lock_field(&self, lock: &SprintLock) -> Result<(), StoreError> {
        let encoded = self.codec.encode_lock_field(lock).map_err(|e| {
            error!(err = %e, "[qc-09] Failed to encode the lock field");
            StoreError::SerializationFailed {
                key: key_name(LOCK_FIELD_KEY),
                reason: e.message,
            }
        })?;

        self.store(LOCK_FIELD_KEY, &encoded)
    }

    fn fetch(&self, key: &[u8]) -> Result<Vec<u8>, StoreError> {
        match self.db.get(key) {
            Ok(Some(data)) if !data.is_empty() => Ok(data),
            Ok(_) => Err(StoreError::NotFound { key: key_name(key) }),
            Err(source) => Err(StoreError::StoreUnavailable {
                key: key_name(key),
                source,
            }),
        }
    }

    fn store(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.put(key, value).map_err(|source| {
            error!(key = %key_name(key), err = %source, "[qc-09] Failed to store record");
            StoreError::StoreUnavailable {
                key: key_name(key),
                source,
            }
        })
    }
}

fn key_name(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}
