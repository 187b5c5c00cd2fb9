//! deployctl: helpers for a remote deploy driver.
//!
//! Release tagging against GitHub, resumable deploy checkpoints, per-environment
//! pillow config, step timing and package-manager command lines.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Mapping;

use adapters::TerminalPrompt;
use app::DeployContext;
use app::commands::tag;

pub use adapters::{CheckpointStore, HttpGitHubClient};
pub use app::commands::tag::TagOutcome;
pub use app::diagnostics::traceback_string;
pub use app::timing::{TimingLog, run_timed};
pub use domain::{
    AppError, BowerCommand, Credentials, DeployConfig, DeployMetadata, PipInstall,
    build_frontend_command, build_install_command, load_pillow_config,
};
pub use ports::{GitHubPort, GitHubUser, TagRequest, Tagger};

// =============================================================================
// Release Tagging API
// =============================================================================

/// Tag the commit `code_branch` points at as a deploy to `environment`.
///
/// Credentials come from `DEPLOYCTL_GITHUB_TOKEN`, then `deploy.toml`, then an
/// interactive prompt.
pub fn tag_deploy(code_branch: &str, environment: &str) -> Result<TagOutcome, AppError> {
    let ctx = DeployContext::current()?;
    let github = ctx.github_client(&TerminalPrompt)?;
    let mut metadata = tag::deploy_metadata(&ctx, code_branch, environment)?;
    tag::execute(&ctx, &github, &mut metadata)
}

// =============================================================================
// Pillow Config API
// =============================================================================

/// Pillow overlay for `environment` from `<root>/pillows/<environment>.yml`.
pub fn pillow_config(environment: &str) -> Result<Option<Mapping>, AppError> {
    let ctx = DeployContext::current()?;
    load_pillow_config(ctx.root(), environment)
}

// =============================================================================
// Checkpoint API
// =============================================================================

/// Persist the resume position and environment snapshot for `environment`.
pub fn save_deploy_state<I, S>(environment: &str, command_index: &I, state: &S) -> Result<(), AppError>
where
    I: Serialize + ?Sized,
    S: Serialize + ?Sized,
{
    DeployContext::current()?.checkpoints().save_deploy_state(environment, command_index, state)
}

/// Resume position saved for `environment`.
pub fn load_deploy_checkpoint<T: DeserializeOwned>(environment: &str) -> Result<T, AppError> {
    DeployContext::current()?.checkpoints().load_checkpoint(environment)
}

/// Environment snapshot saved for `environment`.
pub fn load_deploy_environment<T: DeserializeOwned>(environment: &str) -> Result<T, AppError> {
    DeployContext::current()?.checkpoints().load_environment_snapshot(environment)
}

/// Forget the saved deploy for `environment`. Succeeds when nothing was saved.
pub fn clear_deploy_state(environment: &str) -> Result<(), AppError> {
    DeployContext::current()?.checkpoints().clear(environment)
}

// =============================================================================
// Timing API
// =============================================================================

/// Run a deploy step, logging its duration to the configured timing log.
pub fn timed_step<T>(
    task_name: &str,
    task: impl FnOnce() -> Result<T, AppError>,
) -> Result<T, AppError> {
    let ctx = DeployContext::current()?;
    run_timed(ctx.timing_log().as_ref(), task_name, task)
}
