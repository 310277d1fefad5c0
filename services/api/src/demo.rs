use crate::infra::{
    demo_roster, load_roster, InMemoryAssignmentLedger, InMemoryCaregiverDirectory,
    InMemoryProgressStore, LoggingNotificationPublisher,
};
use clap::Args;
use rehab_ai::config::AppConfig;
use rehab_ai::error::AppError;
use rehab_ai::workflows::approvals::{ApprovalService, ClinicianId, ProgressPayload, ReviewVerdict};
use rehab_ai::workflows::triage::{
    Caregiver, DisabledClassificationGateway, PatientId, TriageOutcome, TriageService,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// JSON export of the caregiver roster (defaults to the built-in demo roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Skip the progress-update approval portion of the demo
    #[arg(long)]
    pub(crate) skip_approvals: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TriageAssignArgs {
    /// Patient identifier to assign
    #[arg(long)]
    pub(crate) patient_id: String,
    /// Free-text injury description to classify
    #[arg(long)]
    pub(crate) description: String,
    /// JSON export of the caregiver roster (defaults to the built-in demo roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

type DemoTriageService =
    TriageService<InMemoryCaregiverDirectory, InMemoryAssignmentLedger, LoggingNotificationPublisher>;

fn resolve_roster(path: Option<PathBuf>) -> Result<Vec<Caregiver>, AppError> {
    match path {
        Some(path) => load_roster(&path),
        None => Ok(demo_roster()),
    }
}

fn offline_triage_service(
    roster: Vec<Caregiver>,
) -> (DemoTriageService, Arc<LoggingNotificationPublisher>) {
    let directory = Arc::new(InMemoryCaregiverDirectory::with_roster(roster));
    let ledger = Arc::new(InMemoryAssignmentLedger::default());
    let notifier = Arc::new(LoggingNotificationPublisher::default());
    let service = TriageService::new(
        Arc::new(DisabledClassificationGateway),
        directory,
        ledger,
        notifier.clone(),
    );
    (service, notifier)
}

/// One-shot operator spot check: classify a description and print the
/// resulting assignment as JSON. Uses the configured classification endpoint
/// when one is set, the local heuristic otherwise.
pub(crate) async fn run_triage_assign(args: TriageAssignArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gateway = crate::server::classification_gateway(&config)?;
    let roster = resolve_roster(args.roster)?;

    let directory = Arc::new(InMemoryCaregiverDirectory::with_roster(roster));
    let ledger = Arc::new(InMemoryAssignmentLedger::default());
    let notifier = Arc::new(LoggingNotificationPublisher::default());
    let service = TriageService::new(gateway, directory, ledger, notifier);

    let outcome = service
        .assign_caregiver(PatientId(args.patient_id), &args.description)
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).expect("outcome serializes")
    );
    Ok(())
}

/// Scripted end-to-end walk through triage and approvals, offline and
/// deterministic so it can run anywhere.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let roster = resolve_roster(args.roster)?;

    println!("Rehab care workflow demo");
    println!(
        "  roster: {} active caregiver(s); classification: local heuristic",
        roster.iter().filter(|entry| entry.is_active()).count()
    );

    let (triage, notifier) = offline_triage_service(roster);

    let cases = [
        ("p-1001", "minor bruise on forearm, mild discomfort"),
        ("p-1002", "recurring dizziness during gait training"),
        (
            "p-1003",
            "severe head trauma, unconscious, uncontrolled bleeding",
        ),
    ];

    println!("\nTriage and assignment");
    let mut first_outcome: Option<TriageOutcome> = None;
    for (patient, description) in cases {
        let outcome = triage
            .assign_caregiver(PatientId(patient.to_string()), description)
            .await?;
        render_outcome(&outcome, description);
        if first_outcome.is_none() {
            first_outcome = Some(outcome);
        }
    }

    println!("\nStaff notifications dispatched: {}", notifier.events().len());

    println!("\nCaregiver load report");
    let report = triage.load_report()?;
    for entry in &report.entries {
        let capacity_note = if entry.over_capacity {
            " [over capacity]"
        } else {
            ""
        };
        println!(
            "  {:<12} {:<7} {}/{} active patient(s){}",
            entry.caregiver_id.0,
            entry.tier.label(),
            entry.active_patients,
            entry.max_patients,
            capacity_note
        );
    }

    if args.skip_approvals {
        return Ok(());
    }

    println!("\nProgress-update approval");
    let approvals = ApprovalService::new(Arc::new(InMemoryProgressStore::default()));
    let outcome = first_outcome.expect("at least one triage case ran");

    let mut scores = BTreeMap::new();
    scores.insert("mobility".to_string(), 7);
    scores.insert("pain".to_string(), 2);
    let request = approvals
        .submit(
            outcome.assignment.patient_id.clone(),
            outcome.assignment.caregiver_id.clone(),
            ProgressPayload {
                scores,
                notes: "Bruising fading; full range of motion recovered.".to_string(),
            },
        )
        .map_err(AppError::Approval)?;
    println!(
        "  {} submitted by {} -> {}",
        request.id.0,
        request.submitted_by.0,
        request.status.label()
    );

    let annotated = approvals
        .self_annotate(
            &request.id,
            &outcome.assignment.caregiver_id,
            ReviewVerdict::Approve,
        )
        .map_err(AppError::Approval)?;
    println!(
        "  self-review by {}: {} (status stays {})",
        annotated.submitted_by.0,
        ReviewVerdict::Approve.label(),
        annotated.status.label()
    );

    let decided = approvals
        .decide(
            &request.id,
            &ClinicianId("dr-okafor".to_string()),
            ReviewVerdict::Approve,
        )
        .map_err(AppError::Approval)?;
    println!(
        "  decision by {}: {} -> {}",
        decided
            .decision
            .as_ref()
            .map(|decision| decision.decided_by.0.as_str())
            .unwrap_or("unknown"),
        ReviewVerdict::Approve.label(),
        decided.status.label()
    );

    Ok(())
}

fn render_outcome(outcome: &TriageOutcome, description: &str) {
    println!(
        "  {} \"{}\"\n    severity {:.1} ({}) urgency {} -> tier {} -> {} (workload {})",
        outcome.assignment.patient_id.0,
        description,
        outcome.assessment.severity_score,
        outcome.assessment.severity_level.label(),
        outcome.assessment.urgency.label(),
        outcome.assignment.assigned_tier.label(),
        outcome.assignment.caregiver_id.0,
        outcome.caregiver_workload
    );
}
