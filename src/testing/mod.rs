mod fake_github;
mod scripted_prompt;

pub use fake_github::FakeGitHub;
pub use scripted_prompt::ScriptedPrompt;
