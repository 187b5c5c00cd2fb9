//! GitHub REST client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, Credentials, GitHubConfig};
use crate::ports::{GitHubPort, GitHubUser, TagRequest};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const MAX_PER_PAGE: usize = 100;

/// HTTP transport for one GitHub repository.
///
/// Authenticated once at construction; the handle is meant to be built by the
/// caller and shared by reference for the rest of the process.
#[derive(Clone)]
pub struct HttpGitHubClient {
    credentials: Credentials,
    api_url: Url,
    repository: String,
    client: Client,
}

impl std::fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl HttpGitHubClient {
    pub fn new(credentials: Credentials, config: &GitHubConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::GitHubApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self {
            credentials,
            api_url: config.api_url.clone(),
            repository: config.full_name(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, path.trim_start_matches('/'))).map_err(|e| {
            AppError::GitHubApi { message: format!("Invalid API URL: {}", e), status: None }
        })
    }

    fn repo_endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.endpoint(&format!("repos/{}/{}", self.repository, path))
    }

    /// Succeeds when the repository is visible with the current credentials.
    fn ensure_repository(&self) -> Result<(), AppError> {
        let url = self.endpoint(&format!("repos/{}", self.repository))?;
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url))?;
        self.check_status(response).map(|_| ())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, concat!("deployctl/", env!("CARGO_PKG_VERSION")))
            .header(API_VERSION_HEADER, API_VERSION);
        match &self.credentials {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        self.authorized(request).send().map_err(|e| AppError::GitHubApi {
            message: format!("HTTP request failed: {}", e),
            status: None,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url))?;
        let response = self.check_status(response)?;
        parse_json(response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, AppError> {
        tracing::debug!(%url, "POST");
        let response = self.send(self.client.post(url).json(body))?;
        let response = self.check_status(response)?;
        parse_json(response)
    }

    fn check_status(&self, response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("GitHub API request failed").to_string()
        });
        Err(status_error(status, message, &self.repository))
    }
}

fn status_error(status: StatusCode, message: String, repository: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::AuthenticationFailed(message),
        StatusCode::NOT_FOUND => AppError::RepositoryNotFound(repository.to_string()),
        _ => AppError::GitHubApi { message, status: Some(status.as_u16()) },
    }
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().map_err(|e| AppError::GitHubApi {
        message: format!("Failed to read response: {}", e),
        status: Some(status.as_u16()),
    })?;
    serde_json::from_str(&body).map_err(|e| AppError::GitHubApi {
        message: format!("Failed to parse response: {}", e),
        status: Some(status.as_u16()),
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed.get("message").and_then(|m| m.as_str()).map(ToOwned::to_owned)
}

#[derive(Debug, Deserialize)]
struct ApiTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiTagger<'a> {
    name: &'a str,
    email: &'a str,
    date: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiCreateTag<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
    tagger: ApiTagger<'a>,
}

#[derive(Debug, Deserialize)]
struct ApiTagObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct ApiCreateRef<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

impl GitHubPort for HttpGitHubClient {
    fn recent_tags(&self, limit: usize) -> Result<Vec<String>, AppError> {
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        let mut names = Vec::with_capacity(limit);
        let mut page = 1;

        while names.len() < limit {
            let mut url = self.repo_endpoint("tags")?;
            url.query_pairs_mut()
                .append_pair("per_page", &per_page.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<ApiTag> = self.get_json(url)?;
            if batch.is_empty() {
                break;
            }
            let exhausted = batch.len() < per_page;
            names.extend(batch.into_iter().map(|t| t.name).take(limit - names.len()));
            if exhausted {
                break;
            }
            page += 1;
        }

        Ok(names)
    }

    fn resolve_ref(&self, reference: &str) -> Result<String, AppError> {
        let mut url = self.repo_endpoint("commits")?;
        url.path_segments_mut()
            .map_err(|()| AppError::GitHubApi {
                message: format!("Invalid API URL: {}", self.api_url),
                status: None,
            })?
            .extend(reference.split('/'));
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url))?;
        match response.status() {
            // GitHub answers 404 both for an unknown ref and for a repository
            // the credentials cannot see.
            StatusCode::NOT_FOUND => {
                self.ensure_repository()?;
                Err(AppError::ReferenceNotFound(reference.to_string()))
            }
            StatusCode::UNPROCESSABLE_ENTITY => Err(AppError::ReferenceNotFound(reference.to_string())),
            _ => {
                let commit: ApiCommit = parse_json(self.check_status(response)?)?;
                Ok(commit.sha)
            }
        }
    }

    fn current_user(&self) -> Result<GitHubUser, AppError> {
        let user: ApiUser = self.get_json(self.endpoint("user")?)?;
        Ok(GitHubUser { login: user.login, email: user.email.filter(|e| !e.is_empty()) })
    }

    fn create_tag(&self, request: &TagRequest) -> Result<(), AppError> {
        let body = ApiCreateTag {
            tag: &request.tag,
            message: &request.message,
            object: &request.sha,
            object_type: &request.object_type,
            tagger: ApiTagger {
                name: &request.tagger.name,
                email: &request.tagger.email,
                date: &request.tagger.date,
            },
        };
        let tag_object: ApiTagObject =
            self.post_json(self.repo_endpoint("git/tags")?, &body).map_err(|e| conflict(e, request))?;

        let reference = ApiCreateRef {
            reference: format!("refs/tags/{}", request.tag),
            sha: &tag_object.sha,
        };
        let _: serde_json::Value =
            self.post_json(self.repo_endpoint("git/refs")?, &reference).map_err(|e| conflict(e, request))?;
        Ok(())
    }
}

fn conflict(err: AppError, request: &TagRequest) -> AppError {
    match err {
        AppError::GitHubApi { status: Some(422), .. } => AppError::TagConflict(request.tag.clone()),
        other => other,
    }
}
