use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::ClassifierConfig;

/// Instruction sent ahead of every injury description. The service is asked
/// for strict JSON so the schema parse in `parser` can run first.
pub(crate) const CLASSIFICATION_PROMPT: &str = "\
You are a rehabilitation-center triage assistant. Classify the following \
injury description and respond with a single JSON object containing: \
severity (number 0-10), severityLevel (low|moderate|extreme), riskFactors \
(array of strings), recommendedCare (string), urgency (low|medium|high), \
and buddyTier (bronze|silver|gold). Respond with JSON only, no commentary.";

/// Failure raised by the outbound classification call. Always absorbed by the
/// classifier via the local heuristic; never surfaced to triage callers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("classification endpoint not configured")]
    NotConfigured,
    #[error("classification request failed: {0}")]
    Transport(String),
    #[error("classification service returned status {0}")]
    Status(u16),
}

/// Outbound boundary to the external text-classification service.
#[async_trait]
pub trait ClassificationGateway: Send + Sync {
    /// Send the instruction plus description and return the raw response body.
    async fn classify_text(
        &self,
        instruction: &str,
        description: &str,
    ) -> Result<String, GatewayError>;
}

/// HTTP adapter for the hosted classification service.
pub struct HttpClassificationGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpClassificationGateway {
    /// The timeout bounds the whole request; a slow service degrades to the
    /// heuristic instead of stalling the triage pipeline.
    pub fn new(endpoint: String, model: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    /// Build a gateway from configuration; `None` when no endpoint is set.
    pub fn from_config(config: &ClassifierConfig) -> Result<Option<Self>, GatewayError> {
        match &config.endpoint {
            Some(endpoint) => Ok(Some(Self::new(
                endpoint.clone(),
                config.model.clone(),
                config.timeout,
            )?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ClassificationGateway for HttpClassificationGateway {
    async fn classify_text(
        &self,
        instruction: &str,
        description: &str,
    ) -> Result<String, GatewayError> {
        let payload = json!({
            "model": self.model,
            "instruction": instruction,
            "input": description,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }
}

/// Stand-in used when no endpoint is configured: every call fails fast and
/// the triage pipeline runs on the local heuristic alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClassificationGateway;

#[async_trait]
impl ClassificationGateway for DisabledClassificationGateway {
    async fn classify_text(
        &self,
        _instruction: &str,
        _description: &str,
    ) -> Result<String, GatewayError> {
        Err(GatewayError::NotConfigured)
    }
}
