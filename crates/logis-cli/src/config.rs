use anyhow::{Context, Result, bail};
use logis_client::{ApiConfig, DEFAULT_BASE_URL, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Token file; defaults to `<config dir>/logis/session.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CliConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("LOGIS_API_URL") {
            self.api.base_url = val;
        }

        if let Ok(val) = std::env::var("LOGIS_SESSION_FILE") {
            self.session.file = Some(val);
        }

        if let Ok(val) = std::env::var("LOGIS_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("LOGIS_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => self.api.timeout_secs = secs,
                _ => eprintln!(
                    "Warning: Invalid LOGIS_TIMEOUT_SECS '{}', using {}",
                    val, self.api.timeout_secs
                ),
            }
        }
    }

    /// Apply command line flags (highest precedence)
    pub fn apply_flags(&mut self, api_url: Option<String>, session_file: Option<String>) {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        if let Some(file) = session_file {
            self.session.file = Some(file);
        }
    }

    /// Where the session tokens live
    pub fn session_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.session.file {
            return Ok(PathBuf::from(shellexpand::tilde(file).to_string()));
        }
        match dirs::config_dir() {
            Some(dir) => Ok(dir.join("logis").join("session.json")),
            None => bail!("No configuration directory on this system; set LOGIS_SESSION_FILE"),
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone()).with_client_config(
            HttpClientConfig::default()
                .with_timeouts(self.api.timeout_secs, self.api.connect_timeout_secs),
        )
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}
