mod gateway;
mod heuristic;
mod parser;

pub use gateway::{
    ClassificationGateway, DisabledClassificationGateway, GatewayError, HttpClassificationGateway,
};

use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::SeverityAssessment;
use gateway::CLASSIFICATION_PROMPT;

/// Caller error for triage input; the only failure `classify` ever surfaces.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TriageInputError {
    #[error("injury description must not be empty")]
    EmptyDescription,
}

/// Severity classifier client.
///
/// Wraps the external text-classification service and guarantees a usable
/// [`SeverityAssessment`] for every non-empty description: a failed or
/// malformed call degrades through a numeric-token salvage and finally the
/// local keyword heuristic, never into an error.
pub struct SeverityClassifier {
    gateway: Arc<dyn ClassificationGateway>,
}

impl SeverityClassifier {
    pub fn new(gateway: Arc<dyn ClassificationGateway>) -> Self {
        Self { gateway }
    }

    pub async fn classify(
        &self,
        description: &str,
    ) -> Result<SeverityAssessment, TriageInputError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(TriageInputError::EmptyDescription);
        }

        let assessment = match self
            .gateway
            .classify_text(CLASSIFICATION_PROMPT, trimmed)
            .await
        {
            Ok(raw) => {
                if let Some(assessment) = parser::parse_structured(&raw) {
                    assessment
                } else if let Some(score) = parser::extract_severity_token(&raw) {
                    debug!(score, "structured parse failed; salvaged numeric severity token");
                    SeverityAssessment::from_score(
                        score,
                        Vec::new(),
                        parser::DEFAULT_RECOMMENDATION.to_string(),
                        false,
                    )
                } else {
                    warn!("classification response unusable; using local severity heuristic");
                    heuristic::assess(trimmed)
                }
            }
            Err(err) => {
                warn!(error = %err, "classification service unavailable; using local severity heuristic");
                heuristic::assess(trimmed)
            }
        };

        Ok(assessment)
    }
}
