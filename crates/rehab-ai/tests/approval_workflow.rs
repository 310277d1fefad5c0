//! Integration specifications for the progress-update approval workflow:
//! submission, the submitter's non-authoritative self-review, and the
//! clinician's binding decision, all through the public facade.

mod common {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use rehab_ai::workflows::approvals::{
        ApprovalService, ProgressPayload, ProgressRequestStore, ProgressStatus,
        ProgressUpdateRequest, RequestId, StoreError,
    };
    use rehab_ai::workflows::triage::{CaregiverId, PatientId};

    #[derive(Default, Clone)]
    pub(super) struct MemoryProgressStore {
        records: Arc<Mutex<HashMap<RequestId, ProgressUpdateRequest>>>,
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

    pub(super) fn service() -> ApprovalService<MemoryProgressStore> {
        ApprovalService::new(Arc::new(MemoryProgressStore::default()))
    }

    pub(super) fn payload() -> ProgressPayload {
        let mut scores = BTreeMap::new();
        scores.insert("mobility".to_string(), 6);
        scores.insert("pain".to_string(), 4);
        ProgressPayload {
            scores,
            notes: "Patient walked 40 meters unassisted.".to_string(),
        }
    }

    pub(super) fn patient() -> PatientId {
        PatientId("p-int-1".to_string())
    }

    pub(super) fn submitter() -> CaregiverId {
        CaregiverId("cg-int-owner".to_string())
    }
}

use common::*;
use rehab_ai::workflows::approvals::{
    ApprovalError, ClinicianId, ProgressStatus, ReviewVerdict,
};
use rehab_ai::workflows::triage::CaregiverId;

#[test]
fn full_lifecycle_retains_the_audit_trail() {
    let service = service();

    let request = service
        .submit(patient(), submitter(), payload())
        .expect("submission succeeds");
    assert_eq!(request.status, ProgressStatus::PendingApproval);

    service
        .self_annotate(&request.id, &submitter(), ReviewVerdict::Approve)
        .expect("owner annotation succeeds");

    let decided = service
        .decide(
            &request.id,
            &ClinicianId("dr-int".to_string()),
            ReviewVerdict::Reject,
        )
        .expect("decision lands");

    assert_eq!(decided.status, ProgressStatus::Rejected);
    assert_eq!(
        decided.self_review.expect("annotation kept").verdict,
        ReviewVerdict::Approve,
        "self-review and decision are independent audit records"
    );
    assert_eq!(
        decided.decision.expect("decision recorded").decided_by,
        ClinicianId("dr-int".to_string())
    );
}

#[test]
fn a_caregiver_cannot_decide_their_own_request() {
    let service = service();
    let request = service
        .submit(patient(), submitter(), payload())
        .expect("submission succeeds");

    let err = service
        .self_annotate(
            &request.id,
            &CaregiverId("cg-somebody-else".to_string()),
            ReviewVerdict::Approve,
        )
        .expect_err("only the submitter may annotate");
    assert!(matches!(err, ApprovalError::Forbidden));

    let stored = service.get(&request.id).expect("request readable");
    assert_eq!(
        stored.status,
        ProgressStatus::PendingApproval,
        "annotation attempts never move the authoritative status"
    );
}

#[test]
fn terminal_requests_accept_no_further_transitions() {
    let service = service();
    let request = service
        .submit(patient(), submitter(), payload())
        .expect("submission succeeds");

    service
        .decide(
            &request.id,
            &ClinicianId("dr-int".to_string()),
            ReviewVerdict::Approve,
        )
        .expect("first decision lands");

    let err = service
        .decide(
            &request.id,
            &ClinicianId("dr-second".to_string()),
            ReviewVerdict::Reject,
        )
        .expect_err("terminal status is final");
    assert!(matches!(err, ApprovalError::InvalidState { .. }));

    let err = service
        .self_annotate(&request.id, &submitter(), ReviewVerdict::Reject)
        .expect_err("annotations close with the request");
    assert!(matches!(err, ApprovalError::InvalidState { .. }));
}
