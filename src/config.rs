use crate::error::{FileDeckError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Whole-request timeout in seconds. Unset means the HTTP client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_urls: bool,
    pub page_title: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_urls: true,
            page_title: "Zendesk Extractor".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FileDeckError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FileDeckError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| FileDeckError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["filedeck.toml", ".filedeck.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref base_url) = cli_args.backend_url {
            self.backend.base_url = base_url.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.backend.timeout = Some(timeout);
        }

        if let Some(show_urls) = cli_args.show_urls {
            self.display.show_urls = show_urls;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| FileDeckError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| FileDeckError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.backend_url()?;

        if self.backend.timeout == Some(0) {
            return Err(FileDeckError::Config {
                message: "Request timeout must be greater than 0".to_string(),
            });
        }

        if self.backend.connect_timeout == Some(0) {
            return Err(FileDeckError::Config {
                message: "Connect timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed backend root. Only http and https with a host and no query or
    /// fragment are accepted.
    pub fn backend_url(&self) -> Result<Url> {
        let url = Url::parse(&self.backend.base_url).map_err(|_| {
            FileDeckError::InvalidBackendUrl {
                url: self.backend.base_url.clone(),
            }
        })?;

        match url.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(FileDeckError::InvalidBackendUrl {
                    url: self.backend.base_url.clone(),
                })
            }
        }

        if url.host_str().is_none()
            || url.cannot_be_a_base()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(FileDeckError::InvalidBackendUrl {
                url: self.backend.base_url.clone(),
            });
        }

        Ok(url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.timeout.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.backend.connect_timeout.map(Duration::from_secs)
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub timeout: Option<u64>,
    pub show_urls: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend_url(mut self, backend_url: Option<String>) -> Self {
        self.backend_url = backend_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_show_urls(mut self, show_urls: Option<bool>) -> Self {
        self.show_urls = show_urls;
        self
    }
}
