use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{Assignment, Caregiver, CaregiverId, PatientId, StaffRole};

/// Read-only roster access delegated to the record store.
pub trait CaregiverDirectory: Send + Sync {
    fn active_caregivers(&self) -> Result<Vec<Caregiver>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("caregiver directory unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store of care-team assignments.
pub trait AssignmentLedger: Send + Sync {
    /// Snapshot of assignments whose patient is still active. Advisory by the
    /// time it is read; `append` is where consistency is enforced.
    fn active_assignments(&self) -> Result<Vec<Assignment>, LedgerError>;

    /// Record the assignment and return the caregiver's resulting active
    /// workload. Implementations must keep the record-and-recount atomic per
    /// caregiver so concurrent assignments converge instead of losing
    /// updates.
    fn append(&self, assignment: Assignment) -> Result<usize, LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("assignment ledger unavailable: {0}")]
    Unavailable(String),
}

/// One staff-assignment change to announce. Delivery (and any retry) belongs
/// to the notification subsystem, not the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffNotification {
    pub patient_id: PatientId,
    pub role: StaffRole,
    pub staff_id: CaregiverId,
}

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, notification: StaffNotification) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
