use crate::domain::{FinalityRecord, SprintLock};
use crate::error::CodecError;
use crate::ports::outbound::RecordCodec;

/// Default record codec using serde_json.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRecordCodec;

impl RecordCodec for JsonRecordCodec {
    fn encode_finality(&self, record: &FinalityRecord) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(record)?)
    }

    fn decode_finality(&self, data: &[u8]) -> Result<FinalityRecord, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }

    fn encode_lock_field(&self, lock: &SprintLock) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(lock)?)
    }

    fn decode_lock_field(&self, data: &[u8]) -> Result<SprintLock, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}
