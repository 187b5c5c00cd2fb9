//! Tag the commit being deployed and link it to the previous deploy.

use chrono::Utc;

use crate::app::DeployContext;
use crate::domain::release::deploy_timestamp;
use crate::domain::{AppError, DeployMetadata};
use crate::ports::GitHubPort;

/// Result of tagging a deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub deploy_tag: String,
    pub previous_tag: Option<String>,
    pub deploy_ref: String,
    pub diff_url: String,
}

/// Start a deploy of `code_branch` to `environment` using the configured
/// timestamp format and scan depth.
pub fn deploy_metadata(
    ctx: &DeployContext,
    code_branch: &str,
    environment: &str,
) -> Result<DeployMetadata, AppError> {
    let config = ctx.config();
    let timestamp = deploy_timestamp(Utc::now(), &config.deploy.date_format)?;
    Ok(DeployMetadata::with_timestamp(code_branch, environment, timestamp)
        .max_tags(config.github.max_tags)
        .fallback_email_domain(config.github.fallback_email_domain.clone()))
}

pub fn execute(
    ctx: &DeployContext,
    github: &impl GitHubPort,
    metadata: &mut DeployMetadata,
) -> Result<TagOutcome, AppError> {
    let deploy_ref = metadata.resolve_deploy_ref(github)?.to_string();
    let deploy_tag = metadata.tag_commit(github)?.to_string();
    let diff_url = metadata.diff_url(&ctx.config().github.web_url())?;

    Ok(TagOutcome {
        deploy_tag,
        previous_tag: metadata.last_tag().map(str::to_string),
        deploy_ref,
        diff_url,
    })
}
