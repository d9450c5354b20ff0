//! Canonical user-facing message table
//!
//! Every validation failure maps to exactly one [`ErrorKind`], and every kind
//! renders to one fixed sentence. Limits are interpolated from the active
//! [`ValidationConfig`] so the text always agrees with the rule that fired.

use crate::config::ValidationConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NameRequired,
    NameTooShort,
    NameTooLong,
    NameInvalidCharacters,
    EmailRequired,
    EmailInvalid,
    EmailTaken,
    PhoneInvalid,
    PasswordRequired,
    PasswordWeak,
    PasswordMismatch,
    ConfirmRequired,
    AgeRequired,
    AgeInvalid,
    CountryRequired,
    CountryInvalid,
    MessageTooLong,
}

impl ErrorKind {
    pub fn message(&self, config: &ValidationConfig) -> String {
        match self {
            ErrorKind::NameRequired => "Full name is required".to_string(),
            ErrorKind::NameTooShort => format!(
                "Name must be at least {} characters long",
                config.min_name_length
            ),
            ErrorKind::NameTooLong => {
                format!("Name cannot exceed {} characters", config.max_name_length)
            }
            ErrorKind::NameInvalidCharacters => {
                "Name can only contain letters, spaces, hyphens, and apostrophes".to_string()
            }
            ErrorKind::EmailRequired => "Email address is required".to_string(),
            ErrorKind::EmailInvalid => "Please enter a valid email address".to_string(),
            ErrorKind::EmailTaken => "Email address already exists".to_string(),
            ErrorKind::PhoneInvalid => {
                "Please enter a valid phone number (e.g., 123-456-7890 or 1234567890)".to_string()
            }
            ErrorKind::PasswordRequired => "Password is required".to_string(),
            ErrorKind::PasswordWeak => format!(
                "Password must be at least {} characters with at least one uppercase letter, \
                 one lowercase letter, one number, and one special character",
                config.min_password_length
            ),
            ErrorKind::PasswordMismatch => "Passwords do not match".to_string(),
            ErrorKind::ConfirmRequired => "Please confirm your password".to_string(),
            ErrorKind::AgeRequired => "Age is required".to_string(),
            ErrorKind::AgeInvalid => {
                format!("You must be at least {} years old", config.min_age)
            }
            ErrorKind::CountryRequired => "Please select your country".to_string(),
            ErrorKind::CountryInvalid => "Invalid country selection".to_string(),
            ErrorKind::MessageTooLong => format!(
                "Message cannot exceed {} characters",
                config.max_message_length
            ),
        }
    }
}

/// Messages reported back to the submitter once validation has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessMessage {
    FormSubmitted,
    DataSaved,
    FixErrors,
    SaveFailed,
}

impl SuccessMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessMessage::FormSubmitted => "Form submitted successfully! All fields are valid.",
            SuccessMessage::DataSaved => "Your information has been saved successfully.",
            SuccessMessage::FixErrors => "Please fix the errors in the form before submitting.",
            SuccessMessage::SaveFailed => {
                "Data validation passed but failed to save. Please try again."
            }
        }
    }
}
