//! Deploy configuration domain models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `<root>/deploy.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// GitHub access configuration.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Local deploy bookkeeping.
    #[serde(default)]
    pub deploy: DeploySettings,
}

impl DeployConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.github.validate()?;
        self.deploy.validate()?;
        Ok(())
    }
}

/// GitHub repository and API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// Web host used when building compare links.
    #[serde(default = "default_host")]
    pub host: String,
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Repository owner (user or organization).
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Repository name.
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Pre-provisioned API token.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How many recent tags to scan for the previous deploy.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    /// Domain used for the tagger email when the user has no public email.
    #[serde(default = "default_email_domain")]
    pub fallback_email_domain: String,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("host", &self.host)
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tags", &self.max_tags)
            .field("fallback_email_domain", &self.fallback_email_domain)
            .finish()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_url: default_api_url(),
            owner: default_owner(),
            repo: default_repo(),
            token: None,
            timeout_secs: default_timeout(),
            max_tags: default_max_tags(),
            fallback_email_domain: default_email_domain(),
        }
    }
}

impl GitHubConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("github.timeout_secs must be greater than 0".to_string());
        }
        if self.max_tags == 0 {
            return Err("github.max_tags must be greater than 0".to_string());
        }
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            return Err("github.owner and github.repo must not be empty".to_string());
        }
        Ok(())
    }

    /// `owner/repo` form used in messages and API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Web URL of the repository, without a trailing slash.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.repo)
    }
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("Default API URL must be valid")
}

fn default_owner() -> String {
    "dimagi".to_string()
}

fn default_repo() -> String {
    "commcare-hq".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tags() -> usize {
    100
}

fn default_email_domain() -> String {
    "dimagi.com".to_string()
}

/// Local files written while a deploy runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploySettings {
    /// Append-only timing log, relative to the project root.
    #[serde(default)]
    pub timing_log: Option<PathBuf>,
    /// Suffix of the `<env>_<suffix>` command-index checkpoint file.
    #[serde(default = "default_checkpoint_suffix")]
    pub checkpoint_suffix: String,
    /// Suffix of the `<env>_<suffix>` environment snapshot file.
    #[serde(default = "default_environment_suffix")]
    pub environment_suffix: String,
    /// `strftime` format of the deploy timestamp used in tag names.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            timing_log: None,
            checkpoint_suffix: default_checkpoint_suffix(),
            environment_suffix: default_environment_suffix(),
            date_format: default_date_format(),
        }
    }
}

impl DeploySettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.checkpoint_suffix.is_empty() || self.environment_suffix.is_empty() {
            return Err("deploy checkpoint suffixes must not be empty".to_string());
        }
        if self.checkpoint_suffix == self.environment_suffix {
            return Err(
                "deploy.checkpoint_suffix and deploy.environment_suffix must differ".to_string()
            );
        }
        if self.date_format.trim().is_empty() {
            return Err("deploy.date_format must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_checkpoint_suffix() -> String {
    "deploy_checkpoint".to_string()
}

fn default_environment_suffix() -> String {
    "deploy_env".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d_%H.%M".to_string()
}

/// Parse configuration from string content.
pub fn parse_config_content(path: &str, content: &str) -> Result<DeployConfig, AppError> {
    let config: DeployConfig =
        toml::from_str(content).map_err(|e| AppError::invalid_config(path, e))?;
    config.validate().map_err(|e| AppError::invalid_config(path, e))?;
    Ok(config)
}
