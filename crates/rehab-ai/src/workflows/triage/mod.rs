//! Patient triage and care-team assignment.
//!
//! A free-text injury description is classified into a severity assessment,
//! the assessment's required tier filters the caregiver roster, and the
//! least-loaded eligible caregiver receives the assignment. The record store
//! and notification subsystem stay behind traits.

pub mod classifier;
pub mod domain;
pub mod eligibility;
pub mod report;
pub mod repository;
pub mod router;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{
    ClassificationGateway, DisabledClassificationGateway, GatewayError, HttpClassificationGateway,
    SeverityClassifier, TriageInputError,
};
pub use domain::{
    Assignment, CareTier, Caregiver, CaregiverId, CaregiverStatus, PatientId, SeverityAssessment,
    SeverityLevel, StaffRole, Urgency, DEFAULT_MAX_PATIENTS,
};
pub use eligibility::eligible_for;
pub use report::{CaregiverLoadEntry, CaregiverLoadReport};
pub use repository::{
    AssignmentLedger, CaregiverDirectory, DirectoryError, LedgerError, NotificationPublisher,
    NotifyError, StaffNotification,
};
pub use router::triage_router;
pub use selection::{select_least_loaded, workload_of, SelectionError};
pub use service::{TriageOutcome, TriageService, TriageServiceError};
