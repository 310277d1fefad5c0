use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use rehab_ai::error::AppError;
use rehab_ai::workflows::approvals::{
    ProgressRequestStore, ProgressStatus, ProgressUpdateRequest, RequestId, StoreError,
};
use rehab_ai::workflows::triage::{
    Assignment, AssignmentLedger, CareTier, Caregiver, CaregiverDirectory, CaregiverId,
    CaregiverStatus, DirectoryError, LedgerError, NotificationPublisher, NotifyError,
    StaffNotification, DEFAULT_MAX_PATIENTS,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCaregiverDirectory {
    roster: Arc<Mutex<Vec<Caregiver>>>,
}

impl InMemoryCaregiverDirectory {
    pub(crate) fn with_roster(roster: Vec<Caregiver>) -> Self {
        Self {
            roster: Arc::new(Mutex::new(roster)),
        }
    }
}

impl CaregiverDirectory for InMemoryCaregiverDirectory {
    fn active_caregivers(&self) -> Result<Vec<Caregiver>, DirectoryError> {
        let guard = self.roster.lock().expect("roster mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.is_active())
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssignmentLedger {
    assignments: Arc<Mutex<Vec<Assignment>>>,
}

impl AssignmentLedger for InMemoryAssignmentLedger {
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
pub(crate) struct InMemoryProgressStore {
    records: Arc<Mutex<HashMap<RequestId, ProgressUpdateRequest>>>,
}

impl ProgressRequestStore for InMemoryProgressStore {
    fn insert(
        &self,
        request: ProgressUpdateRequest,
    ) -> Result<ProgressUpdateRequest, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<ProgressUpdateRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_if_pending(&self, request: ProgressUpdateRequest) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let stored = guard.get(&request.id).ok_or(StoreError::NotFound)?;
        if stored.status != ProgressStatus::PendingApproval {
            return Err(StoreError::StaleStatus);
        }
        guard.insert(request.id.clone(), request);
        Ok(())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ProgressUpdateRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut requests: Vec<ProgressUpdateRequest> = guard
            .values()
            .filter(|request| request.status == ProgressStatus::PendingApproval)
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        requests.truncate(limit);
        Ok(requests)
    }
}

/// Records dispatched notifications and logs them. A delivery adapter
/// (e-mail, pager) subscribes downstream in production; the core never
/// retries delivery itself.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    events: Arc<Mutex<Vec<StaffNotification>>>,
}

impl LoggingNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<StaffNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationPublisher for LoggingNotificationPublisher {
    async fn publish(&self, notification: StaffNotification) -> Result<(), NotifyError> {
        info!(
            patient = %notification.patient_id.0,
            role = notification.role.label(),
            staff = %notification.staff_id.0,
            "staff assignment notification dispatched"
        );
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Built-in roster used when no `--roster` file is supplied.
pub(crate) fn demo_roster() -> Vec<Caregiver> {
    vec![
        roster_entry("cg-alvarez", Some(CareTier::Gold), 4),
        roster_entry("cg-brooks", Some(CareTier::Silver), DEFAULT_MAX_PATIENTS),
        roster_entry("cg-chen", Some(CareTier::Silver), DEFAULT_MAX_PATIENTS),
        roster_entry("cg-dube", Some(CareTier::Bronze), 6),
        roster_entry("cg-ellis", None, DEFAULT_MAX_PATIENTS),
    ]
}

fn roster_entry(id: &str, tier: Option<CareTier>, max_patients: u8) -> Caregiver {
    Caregiver {
        id: CaregiverId(id.to_string()),
        tier,
        status: CaregiverStatus::Active,
        max_patients,
    }
}

/// Hydrate the roster from a JSON export of the record store's caregiver
/// collection.
pub(crate) fn load_roster(path: &Path) -> Result<Vec<Caregiver>, AppError> {
    let raw = std::fs::read(path)?;
    let roster: Vec<Caregiver> = serde_json::from_slice(&raw)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    Ok(roster)
}
