//! Deploy tagging: locate the previous deploy tag, tag the new deploy and
//! link the two.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::domain::AppError;
use crate::ports::{GitHubPort, GitHubUser, TagRequest, Tagger};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d_%H.%M";
pub const DEFAULT_MAX_TAGS: usize = 100;
pub const DEFAULT_EMAIL_DOMAIN: &str = "dimagi.com";

const TAGGER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a deploy timestamp, rejecting invalid `strftime` strings.
pub fn deploy_timestamp(at: DateTime<Utc>, date_format: &str) -> Result<String, AppError> {
    let mut out = String::new();
    write!(out, "{}", at.format(date_format)).map_err(|_| {
        AppError::invalid_config("deploy.date_format", format!("bad format '{}'", date_format))
    })?;
    Ok(out)
}

/// Whether `tag` looks like `<anything>-<environment>-<anything>`.
///
/// The environment is matched literally.
pub fn is_environment_tag(tag: &str, environment: &str) -> bool {
    tag.contains(&format!("-{}-", environment))
}

/// First tag in `tags` (newest first) belonging to `environment`.
pub fn find_previous_deploy_tag<'a>(tags: &'a [String], environment: &str) -> Option<&'a str> {
    tags.iter().map(String::as_str).find(|tag| is_environment_tag(tag, environment))
}

/// Compare link between two tags of `repository_url`.
///
/// Without a previous tag there is nothing to compare against, so the link
/// points at the history leading up to `deploy_tag` instead.
pub fn compare_url(repository_url: &str, last_tag: Option<&str>, deploy_tag: &str) -> String {
    let base = repository_url.trim_end_matches('/');
    match last_tag {
        Some(last) => format!("{}/compare/{}...{}", base, last, deploy_tag),
        None => format!("{}/commits/{}", base, deploy_tag),
    }
}

fn tagger_for(user: &GitHubUser, fallback_domain: &str, at: DateTime<Utc>) -> Tagger {
    let email = user
        .email
        .as_deref()
        .filter(|email| !email.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}@{}", user.login, fallback_domain));
    Tagger { name: user.login.clone(), email, date: at.format(TAGGER_DATE_FORMAT).to_string() }
}

/// Tagging state for one deploy invocation.
///
/// Starts untagged; a successful [`DeployMetadata::tag_commit`] moves it to
/// tagged, after which [`DeployMetadata::diff_url`] becomes available.
#[derive(Debug, Clone)]
pub struct DeployMetadata {
    timestamp: String,
    code_branch: String,
    environment: String,
    max_tags: usize,
    fallback_email_domain: String,
    deploy_ref: Option<String>,
    last_tag: Option<String>,
    deploy_tag: Option<String>,
}

impl DeployMetadata {
    /// Start a deploy now, using the default timestamp format.
    pub fn new(code_branch: impl Into<String>, environment: impl Into<String>) -> Self {
        let timestamp = Utc::now().format(DEFAULT_DATE_FORMAT).to_string();
        Self::with_timestamp(code_branch, environment, timestamp)
    }

    pub fn with_timestamp(
        code_branch: impl Into<String>,
        environment: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            code_branch: code_branch.into(),
            environment: environment.into(),
            max_tags: DEFAULT_MAX_TAGS,
            fallback_email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            deploy_ref: None,
            last_tag: None,
            deploy_tag: None,
        }
    }

    /// Number of recent tags scanned for the previous deploy.
    pub fn max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn fallback_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.fallback_email_domain = domain.into();
        self
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn code_branch(&self) -> &str {
        &self.code_branch
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn last_tag(&self) -> Option<&str> {
        self.last_tag.as_deref()
    }

    pub fn deploy_tag(&self) -> Option<&str> {
        self.deploy_tag.as_deref()
    }

    pub fn is_tagged(&self) -> bool {
        self.deploy_tag.is_some()
    }

    /// Name the new tag will get: `<timestamp>-<environment>-deploy`.
    pub fn tag_name(&self) -> String {
        format!("{}-{}-deploy", self.timestamp, self.environment)
    }

    pub fn tag_message(&self) -> String {
        format!("{} deploy at {}", self.environment, self.timestamp)
    }

    /// Commit sha of `code_branch`, resolved on first use and cached.
    pub fn resolve_deploy_ref(&mut self, github: &impl GitHubPort) -> Result<&str, AppError> {
        if self.deploy_ref.is_none() {
            let sha = github.resolve_ref(&self.code_branch)?;
            tracing::debug!(branch = %self.code_branch, %sha, "resolved deploy ref");
            self.deploy_ref = Some(sha);
        }
        Ok(self.deploy_ref.as_deref().unwrap_or_default())
    }

    /// Tag the deploy commit on the remote and return the new tag name.
    pub fn tag_commit(&mut self, github: &impl GitHubPort) -> Result<&str, AppError> {
        if let Some(tag) = &self.deploy_tag {
            return Err(AppError::AlreadyTagged(tag.clone()));
        }

        let tags = github.recent_tags(self.max_tags)?;
        self.last_tag = find_previous_deploy_tag(&tags, &self.environment).map(str::to_string);
        if self.last_tag.is_none() {
            tracing::warn!(
                "No previous tag found in last {} tags for {}",
                self.max_tags,
                self.environment
            );
        }

        let user = github.current_user()?;
        let tagger = tagger_for(&user, &self.fallback_email_domain, Utc::now());
        let sha = self.resolve_deploy_ref(github)?.to_string();

        let request = TagRequest {
            tag: self.tag_name(),
            message: self.tag_message(),
            sha,
            object_type: "commit".to_string(),
            tagger,
        };
        github.create_tag(&request)?;
        tracing::info!(tag = %request.tag, sha = %request.sha, "created deploy tag");

        Ok(self.deploy_tag.insert(request.tag).as_str())
    }

    /// Link comparing the previous deploy tag with this one.
    pub fn diff_url(&self, repository_url: &str) -> Result<String, AppError> {
        let deploy_tag = self.deploy_tag.as_deref().ok_or(AppError::PrematureQuery)?;
        Ok(compare_url(repository_url, self.last_tag.as_deref(), deploy_tag))
    }
}
