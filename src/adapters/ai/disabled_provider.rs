//! Provider used when narrative interpretation is switched off or no API key
//! is configured. Every call fails with `Unavailable`.

use async_trait::async_trait;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

#[derive(Debug, Clone)]
pub struct DisabledAIProvider {
    reason: String,
}

impl DisabledAIProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl AIProvider for DisabledAIProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::unavailable(self.reason.clone()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("disabled", "none", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    #[tokio::test]
    async fn disabled_provider_always_fails() {
        let provider = DisabledAIProvider::new("no API key configured");
        let err = provider
            .complete(CompletionRequest::new(RequestMetadata::generate()))
            .await
            .unwrap_err();

        assert_eq!(err, AIError::unavailable("no API key configured"));
        assert_eq!(provider.provider_info().name, "disabled");
    }
}
