//! Form field keys

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Raw submitted values keyed by wire name. Missing keys read as "".
pub type FieldValues = HashMap<String, String>;

/// One named input slot of the intake form.
///
/// The key set is fixed. Variants are declared in form order, which is
/// also the order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Age,
    Country,
    Message,
}

/// Returned when a wire key does not name a form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Password,
        Field::ConfirmPassword,
        Field::Age,
        Field::Country,
        Field::Message,
    ];

    /// Wire key used in form posts and JSON bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Age => "age",
            Field::Country => "country",
            Field::Message => "message",
        }
    }

    /// Secret fields never leave the validator in sanitized output
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }

    /// Human label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
            Field::Age => "Age",
            Field::Country => "Country",
            Field::Message => "Message",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Phone | Field::Message)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
