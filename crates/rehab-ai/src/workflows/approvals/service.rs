use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    ClinicianId, DecisionRecord, ProgressPayload, ProgressStatus, ProgressUpdateRequest,
    RequestId, ReviewVerdict, SelfReview,
};
use super::repository::{ProgressRequestStore, StoreError};
use crate::workflows::triage::{CaregiverId, PatientId};

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RequestId(format!("pu-{id:06}"))
}

#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("patient and staff identifiers must not be empty")]
    InvalidIdentifier,
    #[error("progress update not found")]
    NotFound,
    #[error("only the submitting caregiver may attach a self-review")]
    Forbidden,
    #[error("progress update is {current} and can no longer change")]
    InvalidState { current: ProgressStatus },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Approval workflow state machine for progress-update submissions.
///
/// `submit` opens a request in `pending_approval`; `self_annotate` attaches
/// the submitter's non-authoritative verdict; `decide` is the single binding
/// transition into a terminal state. Terminal states are final.
pub struct ApprovalService<S> {
    store: Arc<S>,
}

impl<S> ApprovalService<S>
where
    S: ProgressRequestStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn submit(
        &self,
        patient_id: PatientId,
        caregiver_id: CaregiverId,
        payload: ProgressPayload,
    ) -> Result<ProgressUpdateRequest, ApprovalError> {
        if patient_id.0.trim().is_empty() || caregiver_id.0.trim().is_empty() {
            return Err(ApprovalError::InvalidIdentifier);
        }

        let request = ProgressUpdateRequest {
            id: next_request_id(),
            patient_id,
            submitted_by: caregiver_id,
            submitted_at: Utc::now(),
            payload,
            status: ProgressStatus::PendingApproval,
            self_review: None,
            decision: None,
        };

        let stored = self.store.insert(request)?;
        info!(
            request = %stored.id.0,
            patient = %stored.patient_id.0,
            caregiver = %stored.submitted_by.0,
            "progress update submitted"
        );
        Ok(stored)
    }

    /// Attach the submitter's own verdict to a pending request.
    ///
    /// Ownership is checked before state so a non-owner is always refused
    /// with `Forbidden`, terminal or not. The annotation never changes the
    /// authoritative status.
    pub fn self_annotate(
        &self,
        id: &RequestId,
        acting_caregiver: &CaregiverId,
        verdict: ReviewVerdict,
    ) -> Result<ProgressUpdateRequest, ApprovalError> {
        let mut request = self.store.fetch(id)?.ok_or(ApprovalError::NotFound)?;

        if &request.submitted_by != acting_caregiver {
            return Err(ApprovalError::Forbidden);
        }
        if request.status != ProgressStatus::PendingApproval {
            return Err(ApprovalError::InvalidState {
                current: request.status,
            });
        }

        request.self_review = Some(SelfReview {
            verdict,
            noted_at: Utc::now(),
        });

        self.commit_pending(request)
    }

    /// The binding transition: only the supervising clinician's decision
    /// moves a request out of `pending_approval`, and only once.
    pub fn decide(
        &self,
        id: &RequestId,
        clinician: &ClinicianId,
        verdict: ReviewVerdict,
    ) -> Result<ProgressUpdateRequest, ApprovalError> {
        if clinician.0.trim().is_empty() {
            return Err(ApprovalError::InvalidIdentifier);
        }

        let mut request = self.store.fetch(id)?.ok_or(ApprovalError::NotFound)?;

        if request.status.is_terminal() {
            return Err(ApprovalError::InvalidState {
                current: request.status,
            });
        }

        request.status = match verdict {
            ReviewVerdict::Approve => ProgressStatus::Approved,
            ReviewVerdict::Reject => ProgressStatus::Rejected,
        };
        request.decision = Some(DecisionRecord {
            verdict,
            decided_by: clinician.clone(),
            decided_at: Utc::now(),
        });

        let decided = self.commit_pending(request)?;
        info!(
            request = %decided.id.0,
            clinician = %clinician.0,
            status = decided.status.label(),
            "progress update decided"
        );
        Ok(decided)
    }

    pub fn get(&self, id: &RequestId) -> Result<ProgressUpdateRequest, ApprovalError> {
        self.store.fetch(id)?.ok_or(ApprovalError::NotFound)
    }

    pub fn pending(&self, limit: usize) -> Result<Vec<ProgressUpdateRequest>, ApprovalError> {
        Ok(self.store.pending(limit)?)
    }

    /// Write through the store's compare-and-set. A stale status means a
    /// concurrent writer won the race; report the current state instead of
    /// silently succeeding.
    fn commit_pending(
        &self,
        request: ProgressUpdateRequest,
    ) -> Result<ProgressUpdateRequest, ApprovalError> {
        let id = request.id.clone();
        match self.store.update_if_pending(request.clone()) {
            Ok(()) => Ok(request),
            Err(StoreError::StaleStatus) => {
                let current = self
                    .store
                    .fetch(&id)?
                    .map(|stored| stored.status)
                    .unwrap_or(request.status);
                Err(ApprovalError::InvalidState { current })
            }
            Err(other) => Err(ApprovalError::Store(other)),
        }
    }
}
