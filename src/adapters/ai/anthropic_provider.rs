//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-haiku-4-5")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Default model for narrative interpretation.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5";

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Used when the request does not set max_tokens.
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Every current Claude model has a 200k window.
const MAX_CONTEXT_TOKENS: u32 = 200_000;

/// Used when a 429 arrives without a `retry-after` header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Longest wait between two attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a provider with a client bound to the configured timeout.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        // Anthropic carries the system prompt outside the message list.
        let messages = request
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::System => return None,
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &AnthropicRequest) -> Result<Response, AIError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_retry_after);
        let error_body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status.as_u16(), retry_after, error_body))
    }

    /// Maps a non-success status, `retry-after` header and body onto an [`AIError`].
    fn status_error(status: u16, retry_after: Option<u32>, error_body: String) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
            400 if error_body.contains("prompt is too long") => {
                AIError::context_too_long(0, MAX_CONTEXT_TOKENS)
            }
            400 => AIError::InvalidRequest(error_body),
            // 529 is Anthropic's "overloaded"
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    async fn parse_response(response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(anthropic_response.into_completion())
    }

    async fn attempt(&self, request: &AnthropicRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        Self::parse_response(response).await
    }
}

/// Parses a `retry-after` header given in whole seconds.
fn parse_retry_after(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Backoff before retry `retry_count`: the server's `retry-after` for rate
/// limits, otherwise 1s, 2s, 4s, ... Both are capped at [`MAX_RETRY_DELAY`].
fn retry_delay(err: &AIError, retry_count: u32) -> Duration {
    let delay = match err {
        AIError::RateLimited { retry_after_secs } => {
            Duration::from_secs(u64::from(*retry_after_secs))
        }
        _ => Duration::from_secs(1u64.checked_shl(retry_count).unwrap_or(u64::MAX)),
    };
    delay.min(MAX_RETRY_DELAY)
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let anthropic_request = self.to_anthropic_request(&request);
        let mut retry_count = 0;

        loop {
            match self.attempt(&anthropic_request).await {
                Ok(completion) => {
                    debug!(
                        trace_id = %request.metadata.trace_id,
                        model = %completion.model,
                        output_tokens = completion.usage.completion_tokens,
                        "Anthropic completion received"
                    );
                    return Ok(completion);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = retry_delay(&err, retry_count);
                    warn!(
                        trace_id = %request.metadata.trace_id,
                        error = %err,
                        attempt = retry_count + 1,
                        delay_secs = delay.as_secs(),
                        "Retrying Anthropic request"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model, MAX_CONTEXT_TOKENS)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    fn into_completion(self) -> CompletionResponse {
        let content = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        let finish_reason = match self.stop_reason.as_deref() {
            Some("max_tokens") => FinishReason::Length,
            Some("refusal") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        };

        CompletionResponse {
            content,
            usage: TokenUsage::new(self.usage.input_tokens, self.usage.output_tokens),
            model: self.model,
            finish_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider(config: AnthropicConfig) -> AnthropicProvider {
        AnthropicProvider::new(config).unwrap()
    }

    #[test]
    fn config_defaults_match_service_settings() {
        let config = AnthropicConfig::new("test-key");
        assert_eq!(config.model, "claude-haiku-4-5");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("k")
            .with_model("claude-sonnet-4-5")
            .with_base_url("http://localhost:9999/")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);

        assert_eq!(config.model, "claude-sonnet-4-5");
        assert_eq!(config.max_retries, 0);
        assert_eq!(provider(config).messages_url(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn request_moves_system_prompt_out_of_messages() {
        let provider = provider(AnthropicConfig::new("k"));
        let request = CompletionRequest::new(RequestMetadata::generate())
            .with_system_prompt("expert")
            .with_message(MessageRole::System, "dropped")
            .with_message(MessageRole::User, "profile");

        let converted = provider.to_anthropic_request(&request);
        assert_eq!(converted.system.as_deref(), Some("expert"));
        assert_eq!(converted.messages.len(), 1);
        assert_eq!(converted.messages[0].role, "user");
        assert_eq!(converted.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn status_errors_are_classified() {
        assert_eq!(
            AnthropicProvider::status_error(401, None, String::new()),
            AIError::AuthenticationFailed
        );
        assert!(AnthropicProvider::status_error(529, None, "overloaded".into()).is_retryable());
        assert!(matches!(
            AnthropicProvider::status_error(400, None, "prompt is too long".into()),
            AIError::ContextTooLong { .. }
        ));
        assert!(!AnthropicProvider::status_error(400, None, "bad".into()).is_retryable());
    }

    #[test]
    fn rate_limit_uses_retry_after_header() {
        assert_eq!(
            AnthropicProvider::status_error(429, Some(12), "{}".into()),
            AIError::rate_limited(12)
        );
        assert_eq!(
            AnthropicProvider::status_error(429, None, "{}".into()),
            AIError::rate_limited(60)
        );
    }

    #[test]
    fn parse_retry_after_accepts_whole_seconds() {
        assert_eq!(parse_retry_after("12"), Some(12));
        assert_eq!(parse_retry_after(" 3 "), Some(3));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2026 07:28:00 GMT"), None);
    }

    #[test]
    fn retry_delay_doubles_until_capped() {
        let err = AIError::unavailable("overloaded");
        assert_eq!(retry_delay(&err, 0), Duration::from_secs(1));
        assert_eq!(retry_delay(&err, 2), Duration::from_secs(4));
        assert_eq!(retry_delay(&err, 10), MAX_RETRY_DELAY);
        assert_eq!(retry_delay(&err, 64), MAX_RETRY_DELAY);
        assert_eq!(retry_delay(&err, u32::MAX), MAX_RETRY_DELAY);
    }

    #[test]
    fn retry_delay_honours_rate_limit() {
        assert_eq!(retry_delay(&AIError::rate_limited(7), 0), Duration::from_secs(7));
        assert_eq!(retry_delay(&AIError::rate_limited(600), 0), MAX_RETRY_DELAY);
    }

    #[test]
    fn response_concatenates_text_blocks() {
        let raw = r#"{
            "model": "claude-haiku-4-5",
            "content": [
                {"type": "text", "text": "You are "},
                {"type": "tool_use"},
                {"type": "text", "text": "curious."}
            ],
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion();

        assert_eq!(completion.content, "You are curious.");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage.total_tokens, 14);
    }

    #[test]
    fn provider_info_reports_model() {
        let info = provider(AnthropicConfig::new("k")).provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, DEFAULT_MODEL);
        assert_eq!(info.max_context_tokens, 200_000);
    }
}
