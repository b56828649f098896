//! Reconciliation policy
//!
//! How local interest state relates to the outcome of the matching remote
//! write.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationPolicy {
    /// Mutate locally at once; keep the local change even if the remote
    /// write fails. Divergence lasts until the next reload from remote.
    #[default]
    OptimisticNoRollback,
    /// Mutate locally at once; undo the local change if the remote write
    /// fails.
    OptimisticWithRollback,
    /// Mutate locally only after the remote write succeeds.
    Pessimistic,
}

impl ReconciliationPolicy {
    pub fn mutates_before_remote(&self) -> bool {
        !matches!(self, ReconciliationPolicy::Pessimistic)
    }
}

/// Store settings, usually read from the app configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub policy: ReconciliationPolicy,
}
