use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::triage::{CaregiverId, PatientId};

/// Identifier wrapper for submitted progress updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Identifier wrapper for the supervising clinician who decides requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClinicianId(pub String);

/// Structured progress data carried by a submission. Opaque to the approval
/// state machine; only the presentation layer interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPayload {
    /// Named numeric sub-scores (e.g. mobility, pain, adherence).
    pub scores: BTreeMap<String, u8>,
    pub notes: String,
}

/// Authoritative request status. Settable only through the clinician's
/// binding decision; monotonic with no way out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    PendingApproval,
    Approved,
    Rejected,
}

impl ProgressStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProgressStatus::PendingApproval => "pending_approval",
            ProgressStatus::Approved => "approved",
            ProgressStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ProgressStatus::Approved | ProgressStatus::Rejected)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    Approve,
    Reject,
}

impl ReviewVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewVerdict::Approve => "approve",
            ReviewVerdict::Reject => "reject",
        }
    }
}

/// Non-authoritative annotation the submitting caregiver may attach while
/// the request is pending. Never touches the authoritative status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfReview {
    pub verdict: ReviewVerdict,
    pub noted_at: DateTime<Utc>,
}

/// The clinician's binding decision, stamped with actor and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub verdict: ReviewVerdict,
    pub decided_by: ClinicianId,
    pub decided_at: DateTime<Utc>,
}

/// One progress-update submission moving through the approval workflow.
/// Append-only audit trail: requests terminate, they are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdateRequest {
    pub id: RequestId,
    pub patient_id: PatientId,
    pub submitted_by: CaregiverId,
    pub submitted_at: DateTime<Utc>,
    pub payload: ProgressPayload,
    pub status: ProgressStatus,
    pub self_review: Option<SelfReview>,
    pub decision: Option<DecisionRecord>,
}

impl ProgressUpdateRequest {
    pub fn status_view(&self) -> ProgressStatusView {
        ProgressStatusView {
            request_id: self.id.clone(),
            patient_id: self.patient_id.clone(),
            submitted_by: self.submitted_by.clone(),
            status: self.status.label(),
            self_review: self.self_review.map(|review| review.verdict.label()),
            decided_by: self
                .decision
                .as_ref()
                .map(|decision| decision.decided_by.clone()),
        }
    }
}

/// Sanitized representation of a request's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressStatusView {
    pub request_id: RequestId,
    pub patient_id: PatientId,
    pub submitted_by: CaregiverId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_review: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<ClinicianId>,
}
