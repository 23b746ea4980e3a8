//! Narrative interpretation provider configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::{AnthropicConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use super::error::ValidationError;

/// Upper bound accepted for `max_tokens`.
pub const MAX_COMPLETION_TOKENS: u32 = 64_000;

/// Upper bound accepted for `max_retries`.
pub const MAX_RETRIES: u32 = 10;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Turns narrative interpretation on or off
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Completion length limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Deadline in seconds for the whole narrative call, retries included.
    /// Must stay below the server request timeout.
    #[serde(default = "default_interpretation_timeout")]
    pub interpretation_timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn interpretation_timeout(&self) -> Duration {
        Duration::from_secs(self.interpretation_timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Provider settings, or `None` when interpretation is off or no key is set.
    pub fn anthropic_config(&self) -> Option<AnthropicConfig> {
        if !self.enabled {
            return None;
        }
        let key = self.anthropic_api_key.as_ref().filter(|k| !k.is_empty())?;
        Some(
            AnthropicConfig::new(key.clone())
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_COMPLETION_TOKENS {
            return Err(ValidationError::InvalidMaxTokens {
                max: MAX_COMPLETION_TOKENS,
                actual: self.max_tokens,
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::InvalidMaxRetries {
                max: MAX_RETRIES,
                actual: self.max_retries,
            });
        }
        if self.interpretation_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            enabled: default_enabled(),
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            interpretation_timeout_secs: default_interpretation_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}

fn default_interpretation_timeout() -> u64 {
    25
}
