use dialoguer::{Input, Password};

use crate::domain::AppError;
use crate::ports::CredentialPrompt;

/// Terminal prompt backed by dialoguer.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn username(&self) -> Result<String, AppError> {
        Input::<String>::new()
            .with_prompt("Github username")
            .interact_text()
            .map_err(|err| AppError::Prompt(format!("Failed to read username: {}", err)))
    }

    fn password(&self) -> Result<String, AppError> {
        Password::new()
            .with_prompt("Github password")
            .interact()
            .map_err(|err| AppError::Prompt(format!("Failed to read password: {}", err)))
    }
}
