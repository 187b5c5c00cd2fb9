use std::cell::RefCell;

use crate::domain::AppError;
use crate::ports::CredentialPrompt;

/// Prompt that answers with fixed values and keeps the notices it was shown.
pub struct ScriptedPrompt {
    username: String,
    password: String,
    notices: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            notices: RefCell::new(Vec::new()),
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn username(&self) -> Result<String, AppError> {
        Ok(self.username.clone())
    }

    fn password(&self) -> Result<String, AppError> {
        Ok(self.password.clone())
    }
}
