//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `BFAS` prefix and nested values are
//! separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use bfas_profile::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod scoring;
mod server;

pub use ai::{AiConfig, MAX_COMPLETION_TOKENS};
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// service with built-in norms and interpretation disabled for lack of a key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Narrative interpretation provider
    #[serde(default)]
    pub ai: AiConfig,

    /// Norm table and knowledge base overrides
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `BFAS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BFAS__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    /// - `BFAS__SCORING__NORMS_PATH=norms.yaml` -> `scoring.norms_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("BFAS").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.scoring.validate()?;

        // The narrative deadline must fire before the outer request timeout.
        if self.ai.interpretation_timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::InterpretationTimeoutTooLong {
                interpretation_secs: self.ai.interpretation_timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
