use super::super::domain::SeverityAssessment;

/// Terms that push an unclassified description straight to the extreme band.
const HIGH_SEVERITY_TERMS: &[&str] = &[
    "bleeding",
    "blood loss",
    "hemorrhage",
    "fracture",
    "broken bone",
    "unconscious",
    "unresponsive",
    "severe",
    "seizure",
    "head trauma",
    "chest pain",
    "cannot breathe",
];

const LOW_SEVERITY_TERMS: &[&str] = &[
    "minor",
    "scrape",
    "bruise",
    "mild",
    "soreness",
    "stiffness",
    "slight",
];

/// Keyword fallback used whenever the external classification service fails
/// or returns an unusable response. High-severity terms map to 9/extreme,
/// low-severity terms to 3/low; anything else lands in the moderate band.
///
/// The neutral score sits at 6 rather than the boundary value 5 so the
/// derived level is moderate, matching the silver-tier default.
pub(crate) fn assess(description: &str) -> SeverityAssessment {
    let text = description.to_lowercase();

    let matched: Vec<String> = HIGH_SEVERITY_TERMS
        .iter()
        .filter(|term| text.contains(*term))
        .map(|term| format!("reported {term}"))
        .collect();

    if !matched.is_empty() {
        return SeverityAssessment::from_score(
            9.0,
            matched,
            "Escalate to the supervising clinician immediately.".to_string(),
            true,
        );
    }

    if LOW_SEVERITY_TERMS.iter().any(|term| text.contains(term)) {
        return SeverityAssessment::from_score(
            3.0,
            Vec::new(),
            "Routine monitoring and scheduled follow-up.".to_string(),
            true,
        );
    }

    SeverityAssessment::from_score(
        6.0,
        Vec::new(),
        "Clinician review within one business day.".to_string(),
        true,
    )
}
