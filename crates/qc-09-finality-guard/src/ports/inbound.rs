//! Driving Ports (API - Inbound)
//!
//! Chain import consults a `ChainValidator` before adopting a candidate
//! chain. Implemented by each guard and by `FinalityWhitelist`.

use shared_types::BlockHeader;

/// Gate applied by block import before a candidate chain is adopted.
pub trait ChainValidator: Send + Sync {
    /// Check a candidate chain against local finality.
    ///
    /// # Arguments
    /// * `current_header` - Head of the local chain
    /// * `chain` - Candidate headers in ascending height order
    fn is_valid_chain(&self, current_header: &BlockHeader, chain: &[BlockHeader]) -> bool;
}
