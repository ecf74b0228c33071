use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Paraphrase backend
    pub backend: String,
    pub endpoint: String,
    pub request_timeout_secs: Option<u64>,

    // LLM
    pub llm_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_api_key_env: String,

    // Editor
    pub initial_text: String,
    pub editor_font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "remote".to_string(),
            endpoint: "http://127.0.0.1:8080/paraphrase".to_string(),
            request_timeout_secs: None,
            llm_url: "https://api.openai.com".to_string(),
            llm_model: "gpt-3.5-turbo".to_string(),
            llm_temperature: 0.7,
            llm_api_key_env: "OPENAI_API_KEY".to_string(),
            initial_text: "Welcome! Highlight some of this text to try the \"Paraphrase\" feature."
                .to_string(),
            editor_font_size: 16.0,
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; missing files give defaults, corrupt files
    /// are set aside and give defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rephrase")
        .join("config.json")
}
