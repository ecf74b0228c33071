//! LLM paraphrasing over an OpenAI-compatible chat completions API
//!
//! Works against OpenAI itself or any local server exposing `/v1`
//! (Ollama, llama.cpp).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{http_client, Paraphraser};
use crate::config::Config;
use crate::error::{RephraseError, RephraseResult};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmParaphraser {
    client: reqwest::Client,
    url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl LlmParaphraser {
    /// Create a backend from config; the API key is read from the
    /// environment variable the config names
    pub fn new(config: &Config) -> RephraseResult<Self> {
        let api_key = std::env::var(&config.llm_api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            debug!(
                "{} not set, calling {} without credentials",
                config.llm_api_key_env, config.llm_url
            );
        }

        Ok(Self {
            client: http_client(config)?,
            url: config.llm_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.url)
    }

    fn build_prompt(text: &str) -> String {
        format!("Paraphrase this text: {text}")
    }

    fn extract_content(body: &str) -> RephraseResult<String> {
        let parsed: ChatResponse = serde_json::from_str(body)
            .map_err(|e| RephraseError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| RephraseError::InvalidResponse("no completion content".to_string()))
    }
}

#[async_trait]
impl Paraphraser for LlmParaphraser {
    async fn paraphrase(&self, text: &str) -> RephraseResult<String> {
        let mut request = self.client.post(self.completions_url()).json(&serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": Self::build_prompt(text)}],
            "temperature": self.temperature
        }));
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("❌ LLM API Error ({}): {}", status, body);
            return Err(RephraseError::Status(status.as_u16()));
        }

        debug!("🧠 LLM raw body: {}", body);

        Self::extract_content(&body).map_err(|e| {
            warn!("❌ Failed to read LLM completion: {} - Body: {}", e, body);
            e
        })
    }

    fn name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_trims() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  The feline sat.\n"}}]}"#;
        assert_eq!(
            LlmParaphraser::extract_content(body).unwrap(),
            "The feline sat."
        );
    }

    #[test]
    fn test_extract_content_missing_is_invalid() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"role":"assistant"}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            "not json",
        ] {
            assert!(matches!(
                LlmParaphraser::extract_content(body),
                Err(RephraseError::InvalidResponse(_))
            ));
        }
    }

    #[test]
    fn test_url_and_prompt() {
        let mut config = Config::default();
        config.llm_url = "http://localhost:11434/".to_string();
        let llm = LlmParaphraser::new(&config).unwrap();
        assert_eq!(
            llm.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            LlmParaphraser::build_prompt("hi there"),
            "Paraphrase this text: hi there"
        );
    }
}
