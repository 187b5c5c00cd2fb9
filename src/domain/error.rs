use std::io;

use thiserror::Error;

/// Library-wide error type for deployctl operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A required configuration file is absent.
    #[error("Configuration not found: {0}")]
    ConfigurationMissing(String),

    /// A configuration file exists but could not be parsed or validated.
    #[error("Invalid configuration in {path}: {details}")]
    ConfigurationInvalid { path: String, details: String },

    /// No checkpoint was saved for the environment.
    #[error("No cached deploy {what} found for '{environment}'")]
    CheckpointMissing { environment: String, what: &'static str },

    /// A checkpoint file exists but cannot be decoded.
    #[error("Cached deploy {what} for '{environment}' is unreadable: {details}")]
    CheckpointCorrupt { environment: String, what: &'static str, details: String },

    /// Hosting credentials were rejected or could not be obtained.
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Repository is missing or not visible with the current credentials.
    #[error("Repository '{0}' not found or not accessible")]
    RepositoryNotFound(String),

    /// Branch or ref does not exist upstream.
    #[error("Reference '{0}' could not be resolved to a commit")]
    ReferenceNotFound(String),

    /// The remote already has a tag with this name.
    #[error("Tag '{0}' already exists")]
    TagConflict(String),

    /// A tagging-dependent value was requested before tagging.
    #[error("You haven't tagged anything yet")]
    PrematureQuery,

    /// `tag_commit` was called twice on the same deploy.
    #[error("Deploy is already tagged as '{0}'")]
    AlreadyTagged(String),

    /// Any other non-success response from the GitHub API.
    #[error("GitHub API error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    GitHubApi { message: String, status: Option<u16> },

    /// Interactive credential prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// JSON encoding failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML encoding failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    pub fn invalid_config<P: Into<String>, D: ToString>(path: P, details: D) -> Self {
        AppError::ConfigurationInvalid { path: path.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind` view for callers that bucket failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::ConfigurationMissing(_)
            | AppError::CheckpointMissing { .. }
            | AppError::RepositoryNotFound(_)
            | AppError::ReferenceNotFound(_) => io::ErrorKind::NotFound,
            AppError::ConfigurationInvalid { .. }
            | AppError::CheckpointCorrupt { .. }
            | AppError::Json(_)
            | AppError::Yaml(_) => io::ErrorKind::InvalidData,
            AppError::AuthenticationFailed(_) => io::ErrorKind::PermissionDenied,
            AppError::TagConflict(_) | AppError::AlreadyTagged(_) => io::ErrorKind::AlreadyExists,
            AppError::PrematureQuery => io::ErrorKind::InvalidInput,
            AppError::GitHubApi { .. } | AppError::Prompt(_) => io::ErrorKind::Other,
        }
    }
}
