mod credential_prompt;
mod github;

pub use credential_prompt::CredentialPrompt;
pub use github::{GitHubPort, GitHubUser, TagRequest, Tagger};
