//! # Finality Metrics Adapters
//!
//! Implementations of the `FinalityMetrics` port.
//!
//! ## Usage
//!
//! Enable the Prometheus adapter with the `metrics` feature:
//! ```toml
//! qc-09-finality-guard = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `qc_finality_latest_finalized_height{kind}` - Latest finalized height per record kind

use crate::ports::outbound::FinalityMetrics;
use parking_lot::Mutex;

/// Drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFinalityMetrics;

impl FinalityMetrics for NoopFinalityMetrics {
    fn set_latest_finalized(&self, _kind: &'static str, _height: u64) {}
}

/// Keeps every update in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingFinalityMetrics {
    updates: Mutex<Vec<(&'static str, u64)>>,
}

impl RecordingFinalityMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All updates in arrival order.
    pub fn updates(&self) -> Vec<(&'static str, u64)> {
        self.updates.lock().clone()
    }

    /// Latest height reported for `kind`.
    pub fn latest(&self, kind: &str) -> Option<u64> {
        self.updates
            .lock()
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, height)| *height)
    }
}

impl FinalityMetrics for RecordingFinalityMetrics {
    fn set_latest_finalized(&self, kind: &'static str, height: u64) {
        self.updates.lock().push((kind, height));
    }
}

#[cfg(feature = "metrics")]
pub use self::prometheus_adapter::PrometheusFinalityMetrics;

#[cfg(feature = "metrics")]
mod prometheus_adapter {
    use crate::ports::outbound::FinalityMetrics;
    use prometheus::{IntGaugeVec, Opts, Registry};

    /// Prometheus gauge registered on a caller-supplied registry.
    #[derive(Clone)]
    pub struct PrometheusFinalityMetrics {
        latest_finalized: IntGaugeVec,
    }

    impl PrometheusFinalityMetrics {
        pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
            let latest_finalized = IntGaugeVec::new(
                Opts::new(
                    "qc_finality_latest_finalized_height",
                    "Latest whitelisted finalized block height",
                ),
                &["kind"],
            )?;
            registry.register(Box::new(latest_finalized.clone()))?;

            Ok(Self { latest_finalized })
        }
    }

    impl FinalityMetrics for PrometheusFinalityMetrics {
        fn set_latest_finalized(&self, kind: &'static str, height: u64) {
            self.latest_finalized
                .with_label_values(&[kind])
                .set(i64::try_from(height).unwrap_or(i64::MAX));
        }
    }
}
