// src/core/config_manager.rs
//! Application configuration: optional config.yaml section plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::docx::RenderOptions;
use crate::optimizer::gemini::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_THINKING_BUDGET, DEFAULT_TIMEOUT_SECS,
};
use crate::optimizer::{GeminiSettings, RetryPolicy};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
    pub output_path: PathBuf,
    pub strict_validation: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

/// One environment section of config.yaml, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    gemini: Option<GeminiConfig>,
    server: Option<ServerConfig>,
    output_path: Option<PathBuf>,
    strict_validation: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: Option<EnvironmentSection>,
    production: Option<EnvironmentSection>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: 3,
            backoff_base_ms: 500,
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ConfigManager {
    /// Load configuration from config.yaml (if present) and the process environment
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("ATS_RESUME_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let contents = Self::read_config_file(&config_path)?;
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());

        let config = Self::from_sources(contents.as_deref(), &environment, |key| {
            std::env::var(key).ok()
        })?;

        info!(
            "Loaded {} configuration: model={}, port={}, output={}",
            config.environment,
            config.gemini.model,
            config.server.port,
            config.output_path.display()
        );
        if config.gemini.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; optimization requests will fail");
        }

        Ok(config)
    }

    fn read_config_file(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(None);
        }

        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))
            .map(Some)
    }

    /// Build the configuration from file contents and an environment lookup
    pub fn from_sources<F>(contents: Option<&str>, environment: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match contents {
            Some(text) if !text.trim().is_empty() => {
                serde_yaml::from_str(text).context("Failed to parse config.yaml")?
            }
            _ => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        }
        .unwrap_or_default();

        let mut config = Self {
            environment: environment.to_string(),
            gemini: section.gemini.unwrap_or_default(),
            server: section.server.unwrap_or_default(),
            output_path: section
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            strict_validation: section.strict_validation.unwrap_or(true),
        };

        config.apply_env_overrides(env)?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        self.gemini.api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY"));

        if let Some(model) = non_blank("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(base_url) = non_blank("GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
        }
        if let Some(port) = non_blank("ROCKET_PORT").or_else(|| non_blank("PORT")) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Port must be a valid port number, got '{}'", port))?;
        }
        if let Some(dir) = non_blank("OUTPUT_DIR") {
            self.output_path = PathBuf::from(dir);
        }

        Ok(())
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.gemini.api_key.clone().unwrap_or_default(),
            model: self.gemini.model.clone(),
            base_url: self.gemini.base_url.clone(),
            timeout: Duration::from_secs(self.gemini.timeout_seconds),
            retry: RetryPolicy {
                max_attempts: self.gemini.max_attempts,
                base_delay: Duration::from_millis(self.gemini.backoff_base_ms),
            },
            thinking_budget: self.gemini.thinking_budget,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            allow_incomplete: !self.strict_validation,
            created_at: None,
        }
    }

    /// Ensure the export directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.output_path).await
    }
}
