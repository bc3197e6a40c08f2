//! Recalculation orchestrator trait and outcome reporting.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Result of one account's recompute inside a portfolio-wide run.
///
/// Failures are collected per account instead of crossing the loop boundary
/// as errors, so callers can report which accounts failed without aborting
/// the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationOutcome {
    pub account_id: String,
    pub error: Option<String>,
}

impl RecalculationOutcome {
    pub fn ok(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            error: None,
        }
    }

    pub fn failed(account_id: &str, error: String) -> Self {
        Self {
            account_id: account_id.to_string(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Contract for snapshot recomputation.
#[async_trait]
pub trait RecalculationServiceTrait: Send + Sync {
    /// Rebuilds the snapshot series of one account inside a single atomic
    /// replacement. A missing account is a silent no-op: the account may have
    /// been deleted between listing and processing.
    async fn recalculate_account(&self, user_id: &str, account_id: &str) -> Result<()>;

    /// Rebuilds every active account of the user, sequentially. One account's
    /// failure is recorded in its outcome and does not stop the others.
    /// Idempotent; safe to call repeatedly.
    async fn recalculate_all_accounts(&self, user_id: &str) -> Result<Vec<RecalculationOutcome>>;

    /// Triggers a full recompute when the user has no snapshot rows at all,
    /// making the snapshot cache self-healing on first read. Otherwise a
    /// no-op.
    async fn ensure_populated(&self, user_id: &str) -> Result<()>;
}
