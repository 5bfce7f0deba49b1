use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the shell: where the collection lives on disk
/// and how the suggestion client talks to the completion endpoint. The API
/// key is deliberately not configurable here; it is entered at runtime and
/// held only in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted collection file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Model identifier for the suggestion client.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the completion endpoint (proxies, self-hosted gateways).
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            model: default_model(),
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_model() -> String {
    crate::suggest::DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_KEEPER_ prefix
    /// 2. config.toml file in the current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_KEEPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
