pub mod checkpoint_filesystem;
pub mod github_http;
pub mod terminal_prompt;

pub use checkpoint_filesystem::CheckpointStore;
pub use github_http::HttpGitHubClient;
pub use terminal_prompt::TerminalPrompt;
