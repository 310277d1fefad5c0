pub mod approvals;
pub mod triage;
