use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::classifier::{ClassificationGateway, SeverityClassifier, TriageInputError};
use super::domain::{Assignment, PatientId, SeverityAssessment, StaffRole};
use super::eligibility::eligible_for;
use super::report::CaregiverLoadReport;
use super::repository::{
    AssignmentLedger, CaregiverDirectory, DirectoryError, LedgerError, NotificationPublisher,
    NotifyError, StaffNotification,
};
use super::selection::select_least_loaded;

/// Assignment coordinator: classification, eligibility, selection, the
/// ledger write, and the caregiver notification for one patient.
pub struct TriageService<D, L, N> {
    classifier: SeverityClassifier,
    directory: Arc<D>,
    ledger: Arc<L>,
    notifier: Arc<N>,
}

/// Everything produced by one assignment run. The assessment is immutable
/// from here on; the workload is the caregiver's count after the write.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub assessment: SeverityAssessment,
    pub assignment: Assignment,
    pub caregiver_workload: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Input(#[from] TriageInputError),
    /// The roster holds no active caregiver at all. The eligibility fallback
    /// guarantees candidates otherwise, so this requires operator action.
    #[error("no active caregivers available for assignment")]
    NoActiveCaregivers,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Notification(#[from] NotifyError),
}

impl<D, L, N> TriageService<D, L, N>
where
    D: CaregiverDirectory + 'static,
    L: AssignmentLedger + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(
        gateway: Arc<dyn ClassificationGateway>,
        directory: Arc<D>,
        ledger: Arc<L>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            classifier: SeverityClassifier::new(gateway),
            directory,
            ledger,
            notifier,
        }
    }

    /// Run the four-step pipeline for one patient and persist the result.
    ///
    /// The roster and workload snapshots are advisory; the ledger append is
    /// the serialization point that keeps concurrent assignments consistent.
    pub async fn assign_caregiver(
        &self,
        patient_id: PatientId,
        description: &str,
    ) -> Result<TriageOutcome, TriageServiceError> {
        let assessment = self.classifier.classify(description).await?;

        let roster = self.directory.active_caregivers()?;
        let candidates = eligible_for(assessment.required_tier, &roster);
        let snapshot = self.ledger.active_assignments()?;

        let chosen = select_least_loaded(&candidates, &snapshot)
            .map_err(|_| TriageServiceError::NoActiveCaregivers)?;

        let assignment = Assignment {
            patient_id: patient_id.clone(),
            caregiver_id: chosen.id.clone(),
            assigned_tier: assessment.required_tier,
            assigned_at: Utc::now(),
        };

        let caregiver_workload = self.ledger.append(assignment.clone())?;

        self.notifier
            .publish(StaffNotification {
                patient_id,
                role: StaffRole::Caregiver,
                staff_id: assignment.caregiver_id.clone(),
            })
            .await?;

        info!(
            patient = %assignment.patient_id.0,
            caregiver = %assignment.caregiver_id.0,
            tier = assessment.required_tier.label(),
            severity = assessment.severity_score,
            fallback = assessment.is_fallback,
            workload = caregiver_workload,
            "caregiver assigned"
        );

        Ok(TriageOutcome {
            assessment,
            assignment,
            caregiver_workload,
        })
    }

    /// Current workload per active caregiver against the advisory cap.
    pub fn load_report(&self) -> Result<CaregiverLoadReport, TriageServiceError> {
        let roster = self.directory.active_caregivers()?;
        let snapshot = self.ledger.active_assignments()?;
        Ok(CaregiverLoadReport::build(&roster, &snapshot))
    }
}
