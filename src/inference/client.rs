//! OpenAI-compatible text-generation client.
//!
//! Sends a single non-streaming chat completion request per call: the fixed
//! system instruction plus the rendered prompt as the only user turn.
//! There are no retries and no caching. One failed attempt is reported
//! immediately so the caller can fall back without blocking.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::config::ServiceConfig;
use crate::recommendation::prompt::SYSTEM_INSTRUCTION;

use super::errors::ServiceError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

// ─── Constants ───────────────────────────────────────────────────────────────

/// TCP connection timeout. Capped by the total request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// ─── RecommendationClient ────────────────────────────────────────────────────

/// Anything that turns a prompt into raw recommendation text.
///
/// Implemented by [`InferenceClient`] for the real service and by test
/// doubles elsewhere.
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Ask the service for recommendations. Exactly one attempt.
    async fn fetch(&self, prompt: &str) -> Result<String, ServiceError>;
}

// ─── InferenceClient ─────────────────────────────────────────────────────────

/// Client for an OpenAI-compatible Chat Completions endpoint.
pub struct InferenceClient {
    http: HttpClient,
    config: ServiceConfig,
}

impl InferenceClient {
    /// Create a client from the service configuration.
    ///
    /// Does NOT check connectivity or credentials; that happens on the first
    /// request.
    pub fn from_config(config: ServiceConfig) -> Result<Self, ServiceError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::ConnectionFailed {
                endpoint: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http, config })
    }

    /// The model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the request body for `prompt`.
    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Classify a transport-level reqwest failure.
    fn classify_send_error(&self, url: &str, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout {
                duration_secs: self.config.timeout_secs,
            }
        } else {
            ServiceError::ConnectionFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl RecommendationClient for InferenceClient {
    async fn fetch(&self, prompt: &str) -> Result<String, ServiceError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ServiceError::Auth {
                reason: "no API key configured".into(),
            });
        }

        let url = self.endpoint();
        let body = self.build_request(prompt);

        // Log request metadata only; the prompt may contain the user's note.
        tracing::info!(
            url = %url,
            model = %body.model,
            max_tokens = body.max_tokens,
            temperature = body.temperature,
            prompt_len = prompt.len(),
            "requesting recommendations"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status.as_u16(), body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(&url, e))?;

        if body_text.trim().is_empty() {
            return Err(ServiceError::EmptyResponse);
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| ServiceError::InvalidResponse {
                reason: format!("failed to parse chat completion: {e}"),
            })?;

        let text = parsed.first_text().ok_or(ServiceError::EmptyResponse)?;
        tracing::debug!(response_len = text.len(), "received recommendations");
        Ok(text.to_string())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
