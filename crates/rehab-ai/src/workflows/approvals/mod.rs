//! Progress-update approval workflow.
//!
//! Caregivers submit progress updates that sit in `pending_approval` until
//! the supervising clinician's binding decision. The submitter may attach a
//! non-authoritative self-review while the request is pending; only the
//! clinician ever moves the authoritative status, and terminal states are
//! final.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ClinicianId, DecisionRecord, ProgressPayload, ProgressStatus, ProgressStatusView,
    ProgressUpdateRequest, RequestId, ReviewVerdict, SelfReview,
};
pub use repository::{ProgressRequestStore, StoreError};
pub use router::approvals_router;
pub use service::{ApprovalError, ApprovalService};
