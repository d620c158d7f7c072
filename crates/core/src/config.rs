//! Configuration management for kotae.
//!
//! This module resolves configuration once at startup from several sources,
//! in increasing precedence:
//! - Built-in defaults
//! - Config file (`kotae.yaml`, or the path given via `KOTAE_CONFIG`/`--config`)
//! - Environment variables
//! - Command-line flags
//!
//! The resolved [`AppConfig`] is validated before any backend client is
//! built, and the request path only ever sees the [`RagSettings`] value
//! object derived from it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "kotae.yaml";

/// Content language the search index is filtered on.
pub const DEFAULT_LANGUAGE_CODE: &str = "ja";

/// Generation providers kotae can talk to.
pub const SUPPORTED_PROVIDERS: [&str; 2] = ["bedrock", "http"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file the settings were merged from, if any
    pub config_file: Option<PathBuf>,

    /// Search index identifier (Kendra index id)
    pub index_id: Option<String>,

    /// Content language filter applied to every search.
    ///
    /// Always `"ja"` unless `search.language_code` is set in the config
    /// file. Changing it alters which documents can back an answer while the
    /// prompt instructions stay Japanese; neither environment variables nor
    /// CLI flags touch it.
    pub language_code: String,

    /// Generation provider ("bedrock" or "http")
    pub provider: String,

    /// Generation model identifier
    pub model_id: Option<String>,

    /// Custom generation endpoint (required by the "http" provider)
    pub endpoint: Option<String>,

    /// AWS region override
    pub region: Option<String>,

    /// Bearer token for the "http" provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    search: Option<SearchSection>,
    generation: Option<GenerationSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchSection {
    index_id: Option<String>,
    language_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerationSection {
    provider: Option<String>,
    model_id: Option<String>,
    endpoint: Option<String>,
    region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            index_id: None,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            provider: "bedrock".to_string(),
            model_id: None,
            endpoint: None,
            region: None,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// When `config_file` is `None`, `kotae.yaml` in the working directory is
    /// merged if it exists. An explicitly named file must exist.
    ///
    /// Environment variables:
    /// - `KENDRA_INDEX_ID`: Search index id
    /// - `BEDROCK_MODEL_ID`: Generation model id
    /// - `KOTAE_PROVIDER`: Generation provider
    /// - `KOTAE_ENDPOINT`: Generation endpoint (http provider)
    /// - `AWS_REGION`: Region for both backends
    /// - `AWS_BEARER_TOKEN_BEDROCK`: Bearer token (http provider)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use kotae_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Index: {:?}", config.index_id);
    /// ```
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(path)?;
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    config = config.merge_yaml(default_path)?;
                }
            }
        }

        // Environment variables override YAML config
        Ok(config.merge_env(|key| std::env::var(key).ok()))
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merged config file {:?}", path);

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(search) = config_file.search {
            if search.index_id.is_some() {
                result.index_id = search.index_id;
            }
            if let Some(language_code) = search.language_code {
                result.language_code = language_code;
            }
        }

        if let Some(generation) = config_file.generation {
            if let Some(provider) = generation.provider {
                result.provider = provider;
            }
            if generation.model_id.is_some() {
                result.model_id = generation.model_id;
            }
            if generation.endpoint.is_some() {
                result.endpoint = generation.endpoint;
            }
            if generation.region.is_some() {
                result.region = generation.region;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Merge values from an environment lookup into this config.
    fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(index_id) = lookup("KENDRA_INDEX_ID") {
            self.index_id = Some(index_id);
        }

        if let Some(model_id) = lookup("BEDROCK_MODEL_ID") {
            self.model_id = Some(model_id);
        }

        if let Some(provider) = lookup("KOTAE_PROVIDER") {
            self.provider = provider;
        }

        if let Some(endpoint) = lookup("KOTAE_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }

        if let Some(region) = lookup("AWS_REGION") {
            self.region = Some(region);
        }

        self.api_key = lookup("AWS_BEARER_TOKEN_BEDROCK");

        if let Some(level) = lookup("RUST_LOG") {
            self.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            self.no_color = true;
        }

        self
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the config file and the
    /// environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        index_id: Option<String>,
        model_id: Option<String>,
        provider: Option<String>,
        endpoint: Option<String>,
        region: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if index_id.is_some() {
            self.index_id = index_id;
        }

        if model_id.is_some() {
            self.model_id = model_id;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if endpoint.is_some() {
            self.endpoint = endpoint;
        }

        if region.is_some() {
            self.region = region;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the configuration before any backend client is created.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.as_str();
        if !SUPPORTED_PROVIDERS.contains(&provider) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if self.language_code.trim().is_empty() {
            return Err(AppError::Config(
                "Search language code must not be empty".to_string(),
            ));
        }

        // Same presence rules the request path enforces
        self.rag_settings().require()?;

        if provider == "http" {
            match self.endpoint.as_deref() {
                Some(endpoint)
                    if endpoint.starts_with("http://") || endpoint.starts_with("https://") => {}
                Some(endpoint) => {
                    return Err(AppError::Config(format!(
                        "Invalid endpoint '{}': must start with http:// or https://",
                        endpoint
                    )));
                }
                None => {
                    return Err(AppError::Config(
                        "The http provider requires an endpoint (KOTAE_ENDPOINT or --endpoint)"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Settings handed to the RAG orchestrator.
    pub fn rag_settings(&self) -> RagSettings {
        RagSettings {
            index_id: self.index_id.clone(),
            model_id: self.model_id.clone(),
            language_code: self.language_code.clone(),
        }
    }
}

/// Per-process settings consumed by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagSettings {
    /// Search index to query
    pub index_id: Option<String>,

    /// Model to invoke for generation
    pub model_id: Option<String>,

    /// Content language filter for search
    pub language_code: String,
}

impl RagSettings {
    /// Create settings with the default language filter.
    pub fn new(index_id: Option<String>, model_id: Option<String>) -> Self {
        Self {
            index_id,
            model_id,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }

    /// Return `(index_id, model_id)`, failing when either is absent or blank.
    pub fn require(&self) -> AppResult<(&str, &str)> {
        let index_id = non_blank(self.index_id.as_deref()).ok_or_else(|| {
            AppError::Config(
                "Search index id is not configured (KENDRA_INDEX_ID or search.index_id)"
                    .to_string(),
            )
        })?;

        let model_id = non_blank(self.model_id.as_deref()).ok_or_else(|| {
            AppError::Config(
                "Generation model id is not configured (BEDROCK_MODEL_ID or generation.model_id)"
                    .to_string(),
            )
        })?;

        Ok((index_id, model_id))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
