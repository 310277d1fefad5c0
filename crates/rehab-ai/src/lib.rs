//! Workflow library for rehabilitation-center administration.
//!
//! The decision-making core of the service lives here: triage of injury
//! descriptions into severity assessments, care-team assignment by tier
//! eligibility and current workload, and the approval lifecycle for
//! caregiver progress updates. Persistence, notification delivery, and the
//! presentation layer are reached only through traits so every workflow can
//! be exercised in isolation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
