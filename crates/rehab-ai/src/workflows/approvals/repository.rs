use super::domain::{ProgressUpdateRequest, RequestId};

/// Storage abstraction for progress-update requests so the state machine can
/// be exercised in isolation.
pub trait ProgressRequestStore: Send + Sync {
    fn insert(&self, request: ProgressUpdateRequest)
        -> Result<ProgressUpdateRequest, StoreError>;

    fn fetch(&self, id: &RequestId) -> Result<Option<ProgressUpdateRequest>, StoreError>;

    /// Persist `request` only while the stored status is still
    /// `pending_approval`; fails with [`StoreError::StaleStatus`] otherwise.
    /// The compare-and-set is what keeps two concurrent deciders from both
    /// landing a terminal transition.
    fn update_if_pending(&self, request: ProgressUpdateRequest) -> Result<(), StoreError>;

    fn pending(&self, limit: usize) -> Result<Vec<ProgressUpdateRequest>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request already exists")]
    Conflict,
    #[error("request not found")]
    NotFound,
    #[error("request status changed since it was read")]
    StaleStatus,
    #[error("progress store unavailable: {0}")]
    Unavailable(String),
}
