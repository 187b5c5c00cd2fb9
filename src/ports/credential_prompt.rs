use crate::domain::AppError;

/// Interactive source of GitHub username/password credentials.
pub trait CredentialPrompt {
    /// Show a hint before prompting.
    fn notice(&self, message: &str);

    fn username(&self) -> Result<String, AppError>;

    /// Read the password without echoing it.
    fn password(&self) -> Result<String, AppError>;
}
