//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits.

mod codec;
mod kv_store;
mod metrics;

pub use codec::JsonRecordCodec;
pub use kv_store::InMemoryKVStore;
#[cfg(feature = "metrics")]
pub use metrics::PrometheusFinalityMetrics;
pub use metrics::{NoopFinalityMetrics, RecordingFinalityMetrics};
