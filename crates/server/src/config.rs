//! # Application Configuration
//!
//! This module defines the configuration structure for the `askdocs-server` and
//! provides the logic for loading it, once, at startup. Values are layered:
//!
//! 1. built-in defaults,
//! 2. an optional `config.yml` (or the file given on the command line),
//! 3. an optional `secrets.yml` beside it, kept out of source control,
//! 4. plain environment variables (`PORT`, `DATA_DIR`, `GEMINI_API_KEY`, ...),
//! 5. `ASKDOCS_`-prefixed variables for nested keys (`ASKDOCS_ASSISTANT__LANGUAGE`).
//!
//! Both YAML files support `${VAR}` substitution from the environment.

use askdocs::prompts::AssistantProfile;
use askdocs::providers::ai::{gemini::gemini_api_url, DEFAULT_GEMINI_MODEL};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// The operator-facing message shown when the AI credential is absent.
pub const MISSING_SECRET_MESSAGE: &str =
    "AI credential (GEMINI_API_KEY) is not configured. Please contact the administrator.";

/// The main configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// The secret store file, looked up next to the main configuration file.
pub const SECRETS_FILE: &str = "secrets.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
    /// The AI credential is absent or blank. Startup must stop.
    MissingSecret,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::MissingSecret => f.write_str(MISSING_SECRET_MESSAGE),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The configuration as deserialized, before the secret is validated.
#[derive(Debug, Deserialize)]
struct RawConfig {
    port: u16,
    data_dir: PathBuf,
    model_name: String,
    session_ttl_secs: u64,
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    gemini_api_key: Option<String>,
    #[serde(default)]
    assistant: AssistantProfile,
}

/// The validated application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    pub port: u16,
    /// The directory scanned for PDF documents at startup. Loaded from `DATA_DIR`.
    pub data_dir: PathBuf,
    /// The Gemini model answering questions.
    pub model_name: String,
    /// The `generateContent` endpoint, derived from `model_name` unless overridden.
    pub api_url: String,
    /// How long an untouched chat session is kept before it is dropped.
    pub session_ttl: Duration,
    /// Wording and language of the assistant.
    pub assistant: AssistantProfile,
    api_key: String,
}

impl AppConfig {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("model_name", &self.model_name)
            .field("api_url", &self.api_url)
            .field("session_ttl", &self.session_ttl)
            .field("api_key", &"<redacted>")
            .field("assistant", &self.assistant)
            .finish()
    }
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let api_key = raw
            .gemini_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let api_url = raw
            .api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| gemini_api_url(&raw.model_name));

        Ok(AppConfig {
            port: raw.port,
            data_dir: raw.data_dir,
            model_name: raw.model_name,
            api_url,
            session_ttl: Duration::from_secs(raw.session_ttl_secs),
            assistant: raw.assistant,
            api_key,
        })
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::General(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads and validates the application configuration.
///
/// `config_path_override` names the main YAML file; it must exist when given.
/// Without it, `config.yml` in the working directory is used if present.
///
/// Fails with [`ConfigError::MissingSecret`] when `GEMINI_API_KEY` is not set
/// by any layer. Nothing else is started before this check.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    // Layer 1: Programmatic defaults.
    let mut builder = ConfigBuilder::builder()
        .set_default("port", 8501_i64)?
        .set_default("data_dir", "data")?
        .set_default("model_name", DEFAULT_GEMINI_MODEL)?
        .set_default("session_ttl_secs", 3600_i64)?;

    // Layer 2: Main config file.
    let main_config_path = match config_path_override {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::NotFound(format!(
                    "Config file not found at '{}'.",
                    path.display()
                )));
            }
            path
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    if let Some(content) = read_and_substitute(&main_config_path)? {
        info!("Loading configuration from '{}'.", main_config_path.display());
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    // Layer 3: Secrets file (Optional)
    let secrets_path = main_config_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(SECRETS_FILE);
    if let Some(content) = read_and_substitute(&secrets_path)? {
        info!("Loading secrets from '{}'.", secrets_path.display());
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 4: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 5: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("ASKDOCS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let raw: RawConfig = settings.try_deserialize()?;
    AppConfig::try_from(raw)
}
