//! Remote paraphrase endpoint
//!
//! `POST {"text": ...}` → `{"paraphrased": ...}`. Any non-2xx status,
//! transport failure or undecodable body is a failure.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{http_client, ParaphraseRequest, ParaphraseResponse, Paraphraser};
use crate::config::Config;
use crate::error::{RephraseError, RephraseResult};

#[derive(Debug, Clone)]
pub struct RemoteParaphraser {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteParaphraser {
    pub fn new(config: &Config) -> RephraseResult<Self> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Paraphraser for RemoteParaphraser {
    async fn paraphrase(&self, text: &str) -> RephraseResult<String> {
        debug!("📤 POST {} ({} chars)", self.endpoint, text.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ParaphraseRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("❌ Paraphrase endpoint error ({}): {}", status, body);
            return Err(RephraseError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ParaphraseResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("❌ Failed to decode paraphrase response: {} - Body: {}", e, body);
            RephraseError::InvalidResponse(e.to_string())
        })?;

        debug!("📥 Paraphrased: {}", parsed.paraphrased);
        Ok(parsed.paraphrased)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
