//! GitHub credential resolution.

use std::fmt;
use std::path::Path;

use crate::domain::AppError;
use crate::ports::CredentialPrompt;

pub const TOKEN_ENV_VAR: &str = "DEPLOYCTL_GITHUB_TOKEN";

/// How the GitHub client authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    Basic { username: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Pick credentials: environment token, then configured token, then prompt.
pub fn resolve_credentials(
    env_token: Option<String>,
    config_token: Option<&str>,
    project_root: &Path,
    prompt: &impl CredentialPrompt,
) -> Result<Credentials, AppError> {
    let token = env_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| config_token.filter(|t| !t.trim().is_empty()).map(str::to_string));
    if let Some(token) = token {
        tracing::debug!("using pre-provisioned GitHub token");
        return Ok(Credentials::Token(token));
    }

    prompt.notice(&format!(
        "You can add a GitHub API token to automate this step:\n    \
         export {}=<token>\nor set `token` under [github] in {}",
        TOKEN_ENV_VAR,
        project_root.join("deploy.toml").display()
    ));
    let username = prompt.username()?;
    if username.trim().is_empty() {
        return Err(AppError::AuthenticationFailed("no GitHub username given".into()));
    }
    let password = prompt.password()?;
    Ok(Credentials::Basic { username: username.trim().to_string(), password })
}
