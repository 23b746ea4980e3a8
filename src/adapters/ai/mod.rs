//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Claude models
//! - `MockAIProvider` - Configurable mock for testing
//! - `DisabledAIProvider` - Always unavailable; used when interpretation is off

mod anthropic_provider;
mod disabled_provider;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use disabled_provider::DisabledAIProvider;
pub use mock_provider::{MockAIProvider, MockResponse, DEFAULT_MOCK_RESPONSE};
