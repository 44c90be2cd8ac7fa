//! Ports module for Finality Guard subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::ChainValidator;
pub use outbound::{FinalityMetrics, KeyValueStore, PeerHeaderFetcher, RecordCodec};
