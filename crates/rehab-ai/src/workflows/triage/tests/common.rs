use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::triage::classifier::{ClassificationGateway, GatewayError};
use crate::workflows::triage::domain::{
    Assignment, CareTier, Caregiver, CaregiverId, CaregiverStatus, PatientId,
    DEFAULT_MAX_PATIENTS,
};
use crate::workflows::triage::repository::{
    AssignmentLedger, CaregiverDirectory, DirectoryError, LedgerError, NotificationPublisher,
    NotifyError, StaffNotification,
};
use crate::workflows::triage::TriageService;

pub(super) fn caregiver(id: &str, tier: Option<CareTier>) -> Caregiver {
    Caregiver {
        id: CaregiverId(id.to_string()),
        tier,
        status: CaregiverStatus::Active,
        max_patients: DEFAULT_MAX_PATIENTS,
    }
}

pub(super) fn inactive_caregiver(id: &str, tier: Option<CareTier>) -> Caregiver {
    Caregiver {
        status: CaregiverStatus::Inactive,
        ..caregiver(id, tier)
    }
}

pub(super) fn assignment(patient: &str, caregiver: &str, tier: CareTier) -> Assignment {
    Assignment {
        patient_id: PatientId(patient.to_string()),
        caregiver_id: CaregiverId(caregiver.to_string()),
        assigned_tier: tier,
        assigned_at: Utc::now(),
    }
}

/// Gateway returning a canned response body.
pub(super) struct CannedGateway {
    pub(super) response: String,
}

#[async_trait]
impl ClassificationGateway for CannedGateway {
    async fn classify_text(
        &self,
        _instruction: &str,
        _description: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.response.clone())
    }
}

/// Gateway simulating an unreachable or timed-out classification service.
pub(super) struct FailingGateway;

#[async_trait]
impl ClassificationGateway for FailingGateway {
    async fn classify_text(
        &self,
        _instruction: &str,
        _description: &str,
    ) -> Result<String, GatewayError> {
        Err(GatewayError::Transport("connection timed out".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) caregivers: Arc<Mutex<Vec<Caregiver>>>,
}

impl MemoryDirectory {
    pub(super) fn with_roster(roster: Vec<Caregiver>) -> Self {
        Self {
            caregivers: Arc::new(Mutex::new(roster)),
        }
    }
}

impl CaregiverDirectory for MemoryDirectory {
    fn active_caregivers(&self) -> Result<Vec<Caregiver>, DirectoryError> {
        let guard = self.caregivers.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.is_active())
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    pub(super) assignments: Arc<Mutex<Vec<Assignment>>>,
}

impl MemoryLedger {
    pub(super) fn with_assignments(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments: Arc::new(Mutex::new(assignments)),
        }
    }

    pub(super) fn workload(&self, caregiver: &CaregiverId) -> usize {
        let guard = self.assignments.lock().expect("ledger mutex poisoned");
        guard
            .iter()
            .filter(|entry| &entry.caregiver_id == caregiver)
            .count()
    }
}

impl AssignmentLedger for MemoryLedger {
    fn active_assignments(&self) -> Result<Vec<Assignment>, LedgerError> {
        let guard = self.assignments.lock().expect("ledger mutex poisoned");
        Ok(guard.clone())
    }

    fn append(&self, assignment: Assignment) -> Result<usize, LedgerError> {
        let mut guard = self.assignments.lock().expect("ledger mutex poisoned");
        let caregiver = assignment.caregiver_id.clone();
        guard.push(assignment);
        Ok(guard
            .iter()
            .filter(|entry| entry.caregiver_id == caregiver)
            .count())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<StaffNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<StaffNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationPublisher for MemoryNotifier {
    async fn publish(&self, notification: StaffNotification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) type MemoryTriageService = TriageService<MemoryDirectory, MemoryLedger, MemoryNotifier>;

pub(super) fn build_service(
    gateway: Arc<dyn ClassificationGateway>,
    roster: Vec<Caregiver>,
) -> (MemoryTriageService, Arc<MemoryLedger>, Arc<MemoryNotifier>) {
    let directory = Arc::new(MemoryDirectory::with_roster(roster));
    let ledger = Arc::new(MemoryLedger::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = TriageService::new(gateway, directory, ledger.clone(), notifier.clone());
    (service, ledger, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
