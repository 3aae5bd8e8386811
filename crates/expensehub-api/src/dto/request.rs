//! Request DTOs.
//!
//! Group and expense fields are optional here so that a missing field is
//! reported with the same message as an empty one.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use expensehub_core::error::AppError;

/// Create or rename a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupRequest {
    /// Group name.
    pub name: Option<String>,
}

/// Create or update an expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// What the money was spent on.
    pub description: Option<String>,
    /// A JSON number or a numeric string.
    pub amount: Option<serde_json::Value>,
}

/// Register a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// E-mail address. Format is checked after trimming by the session manager.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Optional display name, trimmed and length-checked by the session manager.
    #[serde(default)]
    pub username: Option<String>,
}

/// Sign in with e-mail and password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// E-mail address.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query of the confirmation link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmQuery {
    /// Confirmation token.
    pub token: Option<String>,
}

/// Run `validate` and turn the first failure into a validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|errors| AppError::validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
