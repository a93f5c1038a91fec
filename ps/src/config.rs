//! PackSmart configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".packsmart.yml";

/// Main PackSmart configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Which collaborators generate lists and images
    pub backend: Backend,

    /// LLM provider configuration (used by the `llm` backend)
    pub llm: LlmConfig,

    /// Forecast lookup configuration
    pub weather: WeatherConfig,

    /// Trip history configuration
    pub history: HistoryConfig,

    /// Prompt template configuration
    pub prompts: PromptsConfig,
}

/// Collaborator backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Deterministic rule-based generation, no network
    #[default]
    Offline,
    /// Prompt-driven generation through an LLM provider
    Llm,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offline => write!(f, "offline"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

impl Config {
    /// Validate configuration before use
    ///
    /// The `llm` backend needs its API key in the environment.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Llm && std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration
    ///
    /// An explicit path must load. Otherwise the first readable file among
    /// `./.packsmart.yml` and `<config_dir>/packsmart/packsmart.yml` wins, and
    /// with neither present the defaults apply.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths().iter().filter(|p| p.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!(path = %candidate.display(), error = %e, "Skipping unreadable config"),
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is set up
    ///
    /// Errors are ignored; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::search_paths(),
        };

        candidates
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(path).ok())
            .and_then(|config| config.log_level)
    }

    /// Implicit config locations, most specific first
    fn search_paths() -> Vec<PathBuf> {
        [Some(PathBuf::from(LOCAL_CONFIG_FILE)), Self::user_config_path()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("packsmart").join("packsmart.yml"))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!(path = %path.display(), backend = %config.backend, "Loaded config");
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai", or any OpenAI-compatible API)
    pub provider: String,

    /// Chat model used for list generation and forgotten-item checks
    pub model: String,

    /// Image model used for destination imagery
    #[serde(rename = "image-model")]
    pub image_model: String,

    /// Requested image size, e.g. "1024x1024"
    #[serde(rename = "image-size")]
    pub image_size: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("LLM API key not found. Set the {} environment variable.", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            image_model: "gpt-image-1".to_string(),
            image_size: "1024x1024".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 1024,
            timeout_ms: 120_000,
        }
    }
}

/// Forecast lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Delay before the static table answers, in milliseconds
    #[serde(rename = "simulated-delay-ms")]
    pub simulated_delay_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { simulated_delay_ms: 500 }
    }
}

/// Trip history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Directory holding the history file
    pub dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        // XDG data directory (~/.local/share/packsmart on Linux)
        let dir = dirs::data_dir()
            .map(|d| d.join("packsmart"))
            .unwrap_or_else(|| PathBuf::from(".packsmart"));
        Self { dir }
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory with `{name}.pmt` overrides for the embedded templates
    pub dir: Option<PathBuf>,
}
