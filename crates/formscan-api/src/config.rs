use formscan_core::config::LayeredConfig;
use formscan_core::error::Result;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,

    /// Optional TOML file layered under the `FORMSCAN_*` variables
    pub config_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, cors_origin: DEFAULT_CORS_ORIGIN.to_string(), config_file: None }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = match env::var("FORMSCAN_PORT") {
            Ok(value) => match value.parse() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(value = %value, "Ignoring invalid FORMSCAN_PORT");
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let cors_origin =
            env::var("FORMSCAN_CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let config_file = env::var("FORMSCAN_CONFIG").ok().map(PathBuf::from);

        Self { port, cors_origin, config_file }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Extraction settings: defaults, then the config file, then the environment
    pub fn load_layered(&self) -> Result<LayeredConfig> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_file {
            config = config.load_from_file(path)?;
        }
        Ok(config.load_from_env())
    }
}
