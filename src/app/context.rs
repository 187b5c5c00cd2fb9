use std::path::{Path, PathBuf};

use crate::adapters::{CheckpointStore, HttpGitHubClient};
use crate::app::timing::TimingLog;
use crate::domain::configuration::paths;
use crate::domain::credentials::{TOKEN_ENV_VAR, resolve_credentials};
use crate::domain::{AppError, DeployConfig, load_deploy_config};
use crate::ports::CredentialPrompt;

/// Project root plus the configuration loaded from it.
#[derive(Debug, Clone)]
pub struct DeployContext {
    root: PathBuf,
    config: DeployConfig,
}

impl DeployContext {
    pub fn new(root: PathBuf, config: DeployConfig) -> Self {
        Self { root, config }
    }

    /// Load `deploy.toml` from `root`.
    pub fn load(root: PathBuf) -> Result<Self, AppError> {
        let config = load_deploy_config(&root)?;
        Ok(Self::new(root, config))
    }

    /// Load from `$DEPLOYCTL_ROOT` or the current directory.
    pub fn current() -> Result<Self, AppError> {
        Self::load(paths::project_root()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn checkpoints(&self) -> CheckpointStore {
        CheckpointStore::new(self.root.clone(), &self.config.deploy)
    }

    /// Timing log, when one is configured.
    pub fn timing_log(&self) -> Option<TimingLog> {
        self.config.deploy.timing_log.as_ref().map(|path| TimingLog::new(self.root.join(path)))
    }

    /// Authenticate and build the GitHub client for this process.
    pub fn github_client(&self, prompt: &impl CredentialPrompt) -> Result<HttpGitHubClient, AppError> {
        let credentials = resolve_credentials(
            std::env::var(TOKEN_ENV_VAR).ok(),
            self.config.github.token.as_deref(),
            &self.root,
            prompt,
        )?;
        HttpGitHubClient::new(credentials, &self.config.github)
    }
}
