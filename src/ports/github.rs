//! GitHub repository port definition.

use crate::domain::AppError;

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubUser {
    pub login: String,
    /// Public email, if the user has one.
    pub email: Option<String>,
}

/// Author metadata recorded on an annotated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagger {
    pub name: String,
    pub email: String,
    /// UTC ISO-8601 with a literal `Z`, e.g. `2024-03-01T09:30:00Z`.
    pub date: String,
}

/// Request to create an annotated tag and its ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub tag: String,
    pub message: String,
    /// Object the tag points at.
    pub sha: String,
    /// Git object type of `sha`, normally `commit`.
    pub object_type: String,
    pub tagger: Tagger,
}

/// Port for the repository operations a deploy needs.
///
/// Implementations are bound to a single repository and authenticated once.
pub trait GitHubPort {
    /// Names of the most recent tags, newest first, at most `limit` of them.
    fn recent_tags(&self, limit: usize) -> Result<Vec<String>, AppError>;

    /// Resolve a branch, tag or sha to a full commit sha.
    fn resolve_ref(&self, reference: &str) -> Result<String, AppError>;

    /// The account the client is authenticated as.
    fn current_user(&self) -> Result<GitHubUser, AppError>;

    /// Create an annotated tag and the `refs/tags/<tag>` ref pointing at it.
    fn create_tag(&self, request: &TagRequest) -> Result<(), AppError>;
}
