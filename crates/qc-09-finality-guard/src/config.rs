//! Guard configuration

use std::env;

/// Administrative switches for the finality whitelist.
///
/// A disabled guard still tracks finality but accepts every chain and peer.
#[derive(Clone, Debug)]
pub struct GuardConfig {
    /// Enforce milestone finality in validity checks
    pub milestone_enabled: bool,
    /// Enforce checkpoint finality in validity checks
    pub checkpoint_enabled: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            milestone_enabled: true,
            checkpoint_enabled: true,
        }
    }
}

impl GuardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_MILESTONE_WHITELIST`: Enforce milestones (default: true)
    /// - `QC_CHECKPOINT_WHITELIST`: Enforce checkpoints (default: true)
    pub fn from_env() -> Self {
        Self {
            milestone_enabled: env_flag("QC_MILESTONE_WHITELIST", true),
            checkpoint_enabled: env_flag("QC_CHECKPOINT_WHITELIST", true),
        }
    }

    pub fn with_milestone_enabled(mut self, enabled: bool) -> Self {
        self.milestone_enabled = enabled;
        self
    }

    pub fn with_checkpoint_enabled(mut self, enabled: bool) -> Self {
        self.checkpoint_enabled = enabled;
        self
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| parse_flag(&v, default))
        .unwrap_or(default)
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "on" => true,
        "false" | "0" | "off" => false,
        _ => default,
    }
}
