//! Password policy for new accounts.

use expensehub_core::config::AuthConfig;
use expensehub_core::error::AppError;

/// Upper bound that keeps Argon2 input sizes sane.
const MAX_PASSWORD_CHARS: usize = 128;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let chars = password.chars().count();
        if chars < self.min_length {
            return Err(AppError::validation(format!(
                "Password should be at least {} characters.",
                self.min_length
            )));
        }
        if chars > MAX_PASSWORD_CHARS {
            return Err(AppError::validation(format!(
                "Password should be at most {MAX_PASSWORD_CHARS} characters."
            )));
        }
        Ok(())
    }
}
