use chronicle_types::ChronicleId;

use crate::options::HookError;

/// Errors produced by chronicle operations.
///
/// Both variants are raised after the triggering operation has committed
/// its state change; the chronicle stays valid and fully updated.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The instance-level append hook failed.
    #[error("append hook failed for chronicle {id}: {source}")]
    Hook { id: ChronicleId, source: HookError },

    /// The per-call callback passed to `append_with` failed.
    #[error("append callback failed for chronicle {id}: {source}")]
    LocalHook { id: ChronicleId, source: HookError },
}

impl HistoryError {
    /// Identifier of the chronicle whose hook failed.
    pub fn chronicle_id(&self) -> &ChronicleId {
        match self {
            Self::Hook { id, .. } | Self::LocalHook { id, .. } => id,
        }
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, HistoryError>;
