use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub github: GitHubConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub issue: IssueConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    pub app_id: u64,
    pub private_key_path: PathBuf,
    /// Base URL of a GitHub Enterprise Server API. Defaults to api.github.com.
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Inbound API key check for the provisioning endpoint.
#[derive(Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

// Manual Debug impl to avoid leaking the API key
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IssueConfig {
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_template_path() -> PathBuf {
    PathBuf::from("templates/setup-issue.md")
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("repo-crafter").required(false));
        }

        // Environment variable overrides with REPO_CRAFTER_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("REPO_CRAFTER")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.auth.enabled && self.configured_api_key().is_none() {
            return Err(AppError::Config(
                "auth.enabled is set but auth.api_key is missing or empty".to_string(),
            ));
        }
        Ok(())
    }

    fn configured_api_key(&self) -> Option<&str> {
        self.auth.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// The shared secret callers must present, or `None` when authentication is disabled.
    pub fn required_api_key(&self) -> Option<&str> {
        if self.auth.enabled {
            self.configured_api_key()
        } else {
            None
        }
    }
}
