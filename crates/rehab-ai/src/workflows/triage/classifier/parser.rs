use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

use super::super::domain::{SeverityAssessment, Urgency};

/// Wire structure the classification service is instructed to return. Every
/// field besides the score is optional so partially-conforming responses
/// still parse.
#[derive(Debug, Deserialize)]
pub(crate) struct WireAssessment {
    severity: f32,
    #[serde(default, rename = "severityLevel")]
    severity_level: Option<String>,
    #[serde(default, rename = "riskFactors")]
    risk_factors: Vec<String>,
    #[serde(default, rename = "recommendedCare")]
    recommended_care: Option<String>,
    #[serde(default)]
    urgency: Option<String>,
    #[serde(default, rename = "buddyTier")]
    buddy_tier: Option<String>,
}

pub(crate) const DEFAULT_RECOMMENDATION: &str =
    "Review with the supervising clinician and schedule per assigned tier.";

static LABELED_SEVERITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:severity|score)"?\s*[:=]\s*"?(\d+(?:\.\d+)?)"#)
        .expect("severity token pattern compiles")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("numeric token pattern compiles"));

/// Schema parse of the raw response. Scores are clamped and the level, tier,
/// and urgency re-derived so a misbehaving service cannot break the
/// threshold invariants; only the advisory fields are taken at face value.
pub(crate) fn parse_structured(raw: &str) -> Option<SeverityAssessment> {
    let wire: WireAssessment = serde_json::from_str(raw.trim()).ok()?;
    if !wire.severity.is_finite() {
        return None;
    }

    let mut assessment = SeverityAssessment::from_score(
        wire.severity,
        wire.risk_factors,
        wire.recommended_care
            .unwrap_or_else(|| DEFAULT_RECOMMENDATION.to_string()),
        false,
    );

    if let Some(urgency) = wire.urgency.as_deref().and_then(parse_urgency) {
        assessment.urgency = urgency;
    }

    if let Some(level) = wire.severity_level.as_deref() {
        if !level.eq_ignore_ascii_case(assessment.severity_level.label()) {
            debug!(
                reported = level,
                derived = assessment.severity_level.label(),
                "service-reported level disagrees with score thresholds; keeping derived level"
            );
        }
    }
    if let Some(tier) = wire.buddy_tier.as_deref() {
        if !tier.eq_ignore_ascii_case(assessment.required_tier.label()) {
            debug!(
                reported = tier,
                derived = assessment.required_tier.label(),
                "service-reported tier disagrees with score thresholds; keeping derived tier"
            );
        }
    }

    Some(assessment)
}

/// Secondary salvage: pull the first plausible numeric severity token out of
/// a response that did not parse as the requested JSON document.
pub(crate) fn extract_severity_token(raw: &str) -> Option<f32> {
    if let Some(captures) = LABELED_SEVERITY.captures(raw) {
        if let Ok(score) = captures[1].parse::<f32>() {
            return Some(score);
        }
    }

    BARE_NUMBER
        .find_iter(raw)
        .filter_map(|token| token.as_str().parse::<f32>().ok())
        .find(|score| (0.0..=10.0).contains(score))
}

fn parse_urgency(value: &str) -> Option<Urgency> {
    match value.trim().to_ascii_lowercase().as_str() {
        "low" => Some(Urgency::Low),
        "medium" => Some(Urgency::Medium),
        "high" => Some(Urgency::High),
        _ => None,
    }
}
