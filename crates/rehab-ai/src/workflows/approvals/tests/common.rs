use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::approvals::domain::{
    ProgressPayload, ProgressStatus, ProgressUpdateRequest, RequestId,
};
use crate::workflows::approvals::repository::{ProgressRequestStore, StoreError};
use crate::workflows::approvals::ApprovalService;
use crate::workflows::triage::{CaregiverId, PatientId};

pub(super) fn payload() -> ProgressPayload {
    let mut scores = BTreeMap::new();
    scores.insert("mobility".to_string(), 7);
    scores.insert("pain".to_string(), 3);
    ProgressPayload {
        scores,
        notes: "Completed both sessions; gait noticeably steadier.".to_string(),
    }
}

pub(super) fn patient() -> PatientId {
    PatientId("p-900".to_string())
}

pub(super) fn submitter() -> CaregiverId {
    CaregiverId("cg-owner".to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryProgressStore {
    pub(super) records: Arc<Mutex<HashMap<RequestId, ProgressUpdateRequest>>>,
}

impl ProgressRequestStore for MemoryProgressStore {
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

pub(super) fn build_service() -> (ApprovalService<MemoryProgressStore>, Arc<MemoryProgressStore>) {
    let store = Arc::new(MemoryProgressStore::default());
    (ApprovalService::new(store.clone()), store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
