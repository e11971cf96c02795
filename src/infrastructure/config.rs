use crate::domain::error::TranslateError;
use crate::domain::model::{AdapterInit, ExtractionStrategy, Provider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub cache: bool,
    #[serde(default)]
    pub init: AdapterInit,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub deepl: DeeplConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    pub proxy: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DeeplConfig {
    pub api_key: Option<String>,
    /// Unset: chosen from the key (`:fx` keys use the free API)
    pub endpoint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default)]
    pub extraction: ExtractionStrategy,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_google_endpoint(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_openai_endpoint(),
            model: default_chat_model(),
            extraction: ExtractionStrategy::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_openai_endpoint(),
            model: default_completion_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            cache: false,
            init: AdapterInit::default(),
            workers: default_workers(),
            logging: Logging::default(),
            http: HttpConfig::default(),
            google: GoogleConfig::default(),
            deepl: DeeplConfig::default(),
            chat: ChatConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl Config {
    /// Non-empty credential configured for `provider`
    pub fn credential_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Google => return None,
            Provider::Deepl => &self.deepl.api_key,
            Provider::Chat => &self.chat.api_key,
            Provider::OpenAi => &self.openai.api_key,
        };
        key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn has_credential(&self, provider: Provider) -> bool {
        !provider.requires_credential() || self.credential_for(provider).is_some()
    }
}

// Defaults
fn default_provider() -> String {
    "google".to_string()
}
fn default_workers() -> usize {
    4
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("translang/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com".to_string()
}
fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_completion_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}
fn default_max_tokens() -> u32 {
    100
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("translang").join("config.toml"))
}

pub fn load_config() -> Result<Config, TranslateError> {
    match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(Config::default()),
    }
}

/// Read a config file, falling back to defaults when it cannot be parsed
pub fn load_config_from(path: &Path) -> Result<Config, TranslateError> {
    let content = fs::read_to_string(path)?;
    match parse_config(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, TranslateError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn generate_config_sample() -> Result<(), TranslateError> {
    let path = get_config_path()
        .ok_or_else(|| TranslateError::Config("Cannot determine config directory".to_string()))?;

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| TranslateError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| TranslateError::Config(format!("Failed to write config file: {}", e)))?;
    println!("Generated config file at: {}", path.display());

    Ok(())
}
