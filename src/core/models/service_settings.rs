use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::models::OcrLanguage;
use crate::global_constants;

/// Wire protocol spoken by the model server hosting the vision model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// OpenAI-compatible chat completions (vLLM, TGI, LM Studio)
    #[default]
    OpenAi,
    /// Ollama `/api/generate`
    Ollama,
}

impl ModelProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "openai" | "vllm" | "tgi" => Some(Self::OpenAi),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::OpenAi => write!(f, "openai"),
            ModelProvider::Ollama => write!(f, "ollama"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub model_provider: ModelProvider,
    #[serde(default = "default_model_endpoint")]
    pub model_endpoint: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    /// Preselected in the form; has no effect on extraction.
    #[serde(default)]
    pub default_language: OcrLanguage,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind_address() -> String {
    global_constants::DEFAULT_BIND_ADDRESS.to_string()
}

fn default_model_endpoint() -> String {
    global_constants::DEFAULT_MODEL_ENDPOINT.to_string()
}

fn default_model_name() -> String {
    global_constants::DEFAULT_MODEL_NAME.to_string()
}

fn default_max_new_tokens() -> u32 {
    global_constants::DEFAULT_MAX_NEW_TOKENS
}

fn default_request_timeout_seconds() -> u64 {
    global_constants::DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_max_upload_bytes() -> usize {
    global_constants::DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            model_provider: ModelProvider::default(),
            model_endpoint: default_model_endpoint(),
            model_name: default_model_name(),
            api_key: None,
            max_new_tokens: default_max_new_tokens(),
            request_timeout_seconds: default_request_timeout_seconds(),
            default_language: OcrLanguage::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Loads settings from `settings_path`, or from the per-user config
    /// directory when no path is given. A missing file is created with
    /// defaults. Environment overrides are applied last.
    pub fn load(settings_path: Option<&Path>) -> anyhow::Result<Self> {
        let settings_path = match settings_path {
            Some(path) => path.to_path_buf(),
            None => Self::get_settings_file_path()?,
        };

        if !settings_path.exists() {
            log::info!(
                "[SETTINGS] No settings file found at {:?}, using defaults",
                settings_path
            );
            let default_settings = Self::default();
            default_settings.save_to(&settings_path)?;
            return Ok(default_settings.with_env_overrides());
        }

        let contents = std::fs::read_to_string(&settings_path)?;
        let settings: ServiceSettings = serde_json::from_str(&contents)?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Model endpoint: {}", settings.model_endpoint);
        log::debug!("[SETTINGS] Model name: {}", settings.model_name);

        Ok(settings.with_env_overrides())
    }

    pub fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(global_constants::ENV_BIND_ADDRESS) {
            self.bind_address = value;
        }

        if let Some(value) = lookup(global_constants::ENV_MODEL_PROVIDER) {
            match ModelProvider::parse(&value) {
                Some(provider) => self.model_provider = provider,
                None => log::warn!("[SETTINGS] Ignoring unknown model provider: {}", value),
            }
        }

        if let Some(value) = lookup(global_constants::ENV_MODEL_ENDPOINT) {
            self.model_endpoint = value;
        }

        if let Some(value) = lookup(global_constants::ENV_MODEL_NAME) {
            self.model_name = value;
        }

        if let Some(value) = lookup(global_constants::ENV_API_KEY) {
            self.api_key = Some(value);
        }

        if let Some(value) = lookup(global_constants::ENV_MAX_NEW_TOKENS) {
            match value.trim().parse() {
                Ok(tokens) => self.max_new_tokens = tokens,
                Err(error) => log::warn!(
                    "[SETTINGS] Ignoring invalid {}={}: {}",
                    global_constants::ENV_MAX_NEW_TOKENS,
                    value,
                    error
                ),
            }
        }

        self
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::SETTINGS_DIRECTORY_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}
