//! Paraphrase Backends
//!
//! A unified interface over the services that can rewrite selected text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::RephraseResult;

pub mod llm;
pub mod remote;

pub use llm::LlmParaphraser;
pub use remote::RemoteParaphraser;

/// Body sent to a paraphrase endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaphraseRequest {
    pub text: String,
}

/// Body a paraphrase endpoint answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaphraseResponse {
    pub paraphrased: String,
}

/// Trait for paraphrase services
#[async_trait]
pub trait Paraphraser: Send + Sync + std::fmt::Debug {
    /// Rewrite `text`, returning the replacement
    async fn paraphrase(&self, text: &str) -> RephraseResult<String>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Shared HTTP client honouring the configured timeout
pub(crate) fn http_client(config: &Config) -> RephraseResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Factory to create the configured paraphrase backend
pub fn create_paraphraser(config: &Config) -> RephraseResult<Arc<dyn Paraphraser>> {
    info!("🛠️ Creating paraphrase backend: {}", config.backend);
    let backend: Arc<dyn Paraphraser> = match config.backend.as_str() {
        "remote" => {
            info!("  - Using remote endpoint ({})", config.endpoint);
            Arc::new(RemoteParaphraser::new(config)?)
        }
        "llm" | "openai" => {
            info!(
                "  - Using LLM chat completions ({} @ {})",
                config.llm_model, config.llm_url
            );
            Arc::new(LlmParaphraser::new(config)?)
        }
        _ => {
            warn!(
                "  - Unknown backend '{}', falling back to remote",
                config.backend
            );
            Arc::new(RemoteParaphraser::new(config)?)
        }
    };
    info!("✅ Paraphrase backend '{}' initialized", backend.name());
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let req = ParaphraseRequest {
            text: "The cat sat.".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"text":"The cat sat."}"#
        );

        let resp: ParaphraseResponse =
            serde_json::from_str(r#"{"paraphrased":"The feline sat."}"#).unwrap();
        assert_eq!(resp.paraphrased, "The feline sat.");
    }

    #[test]
    fn test_factory_picks_backend() {
        let mut config = Config::default();
        assert_eq!(create_paraphraser(&config).unwrap().name(), "remote");

        config.backend = "llm".to_string();
        assert_eq!(create_paraphraser(&config).unwrap().name(), "llm");

        config.backend = "carrier-pigeon".to_string();
        assert_eq!(create_paraphraser(&config).unwrap().name(), "remote");
    }
}
