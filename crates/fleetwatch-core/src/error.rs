// ── Core error type ──

use thiserror::Error;

use crate::store::StoreError;

/// Failure surfaced by the presentation facade.
///
/// Normalization never produces an error (defaults substitute
/// silently) and the sync run reports failures in its
/// [`SyncReport`](crate::sync::SyncReport) instead of erroring, so
/// only two kinds remain at this boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The remote source could not serve a collection (missing
    /// credentials, transport failure, or a non-success response).
    #[error("source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn source(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
