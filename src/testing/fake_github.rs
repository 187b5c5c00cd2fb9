use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::domain::AppError;
use crate::ports::{GitHubPort, GitHubUser, TagRequest};

/// In-memory repository that records the tags created against it.
pub struct FakeGitHub {
    tags: Vec<String>,
    refs: HashMap<String, String>,
    user: GitHubUser,
    existing_tags: HashSet<String>,
    reject_auth: bool,
    created: RefCell<Vec<TagRequest>>,
    resolve_calls: Cell<usize>,
    tag_limits: RefCell<Vec<usize>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            refs: HashMap::new(),
            user: GitHubUser { login: "deployer".into(), email: Some("deployer@example.com".into()) },
            existing_tags: HashSet::new(),
            reject_auth: false,
            created: RefCell::new(Vec::new()),
            resolve_calls: Cell::new(0),
            tag_limits: RefCell::new(Vec::new()),
        }
    }

    /// Tags in newest-first order.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_ref(mut self, name: &str, sha: &str) -> Self {
        self.refs.insert(name.to_string(), sha.to_string());
        self
    }

    pub fn with_user(mut self, login: &str, email: Option<&str>) -> Self {
        self.user = GitHubUser { login: login.to_string(), email: email.map(str::to_string) };
        self
    }

    pub fn with_existing_tag(mut self, tag: &str) -> Self {
        self.existing_tags.insert(tag.to_string());
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_auth = true;
        self
    }

    pub fn created_tags(&self) -> Vec<TagRequest> {
        self.created.borrow().clone()
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.get()
    }

    pub fn requested_tag_limits(&self) -> Vec<usize> {
        self.tag_limits.borrow().clone()
    }

    fn check_auth(&self) -> Result<(), AppError> {
        if self.reject_auth {
            return Err(AppError::AuthenticationFailed("Bad credentials".into()));
        }
        Ok(())
    }
}

impl GitHubPort for FakeGitHub {
    fn recent_tags(&self, limit: usize) -> Result<Vec<String>, AppError> {
        self.check_auth()?;
        self.tag_limits.borrow_mut().push(limit);
        Ok(self.tags.iter().take(limit).cloned().collect())
    }

    fn resolve_ref(&self, reference: &str) -> Result<String, AppError> {
        self.check_auth()?;
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        self.refs
            .get(reference)
            .cloned()
            .ok_or_else(|| AppError::ReferenceNotFound(reference.to_string()))
    }

    fn current_user(&self) -> Result<GitHubUser, AppError> {
        self.check_auth()?;
        Ok(self.user.clone())
    }

    fn create_tag(&self, request: &TagRequest) -> Result<(), AppError> {
        self.check_auth()?;
        let exists = self.existing_tags.contains(&request.tag)
            || self.created.borrow().iter().any(|t| t.tag == request.tag);
        if exists {
            return Err(AppError::TagConflict(request.tag.clone()));
        }
        self.created.borrow_mut().push(request.clone());
        Ok(())
    }
}
