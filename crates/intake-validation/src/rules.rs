//! Rule tables for each form field
//!
//! Each field owns an ordered list of [`Rule`]s. Rules run in order and the
//! first failing one decides the error; later rules are skipped. Optional
//! fields short-circuit to valid when their value is empty.

use crate::config::ValidationConfig;
use crate::field::{Field, FieldValues};
use crate::messages::ErrorKind;
use crate::strength::is_strong_password;
use once_cell::sync::Lazy;
use regex::Regex;

// Letters, whitespace, hyphens and apostrophes only
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s'\-]+$").unwrap());

// Dot-atom local part over the atext set; domain labels alphanumeric at
// both ends; alphabetic TLD of two or more letters
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let atext = r"[A-Za-z0-9!#$%\&'*+/=?^_`{|}\~\-]+";
    let label = r"[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?";
    Regex::new(&format!(
        r"^{atext}(?:\.{atext})*@(?:{label}\.)+[A-Za-z]{{2,}}$"
    ))
    .unwrap()
});

// 123-456-7890 or 1234567890
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{3}-[0-9]{3}-[0-9]{4}|[0-9]{10})$").unwrap());

/// What a rule predicate sees: the field's value plus read access to the
/// rest of the submission for cross-field checks.
pub struct RuleInput<'a> {
    pub value: &'a str,
    pub config: &'a ValidationConfig,
    data: &'a FieldValues,
}

impl<'a> RuleInput<'a> {
    pub fn new(value: &'a str, config: &'a ValidationConfig, data: &'a FieldValues) -> Self {
        Self {
            value,
            config,
            data,
        }
    }

    /// Untrimmed value of another field, "" when unset
    pub fn other(&self, field: Field) -> &'a str {
        self.data
            .get(field.as_str())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A single predicate with the error it reports on failure
pub struct Rule {
    pub check: fn(&RuleInput<'_>) -> bool,
    pub kind: ErrorKind,
    /// Field the error is recorded against when it differs from the one
    /// being validated
    pub target: Option<Field>,
}

/// Ordered rules for one field plus how its raw value is prepared
pub struct FieldRules {
    pub field: Field,
    pub trim: bool,
    pub optional: bool,
    pub rules: &'static [Rule],
}

const fn rule(kind: ErrorKind, check: fn(&RuleInput<'_>) -> bool) -> Rule {
    Rule {
        check,
        kind,
        target: None,
    }
}

const fn rule_on(target: Field, kind: ErrorKind, check: fn(&RuleInput<'_>) -> bool) -> Rule {
    Rule {
        check,
        kind,
        target: Some(target),
    }
}

static NAME_RULES: FieldRules = FieldRules {
    field: Field::Name,
    trim: true,
    optional: false,
    rules: &[
        rule(ErrorKind::NameRequired, not_empty),
        rule(ErrorKind::NameTooShort, |i| {
            char_len(i.value) >= i.config.min_name_length
        }),
        rule(ErrorKind::NameTooLong, |i| {
            char_len(i.value) <= i.config.max_name_length
        }),
        rule(ErrorKind::NameInvalidCharacters, |i| is_valid_name(i.value)),
    ],
};

static EMAIL_RULES: FieldRules = FieldRules {
    field: Field::Email,
    trim: true,
    optional: false,
    rules: &[
        rule(ErrorKind::EmailRequired, not_empty),
        rule(ErrorKind::EmailInvalid, |i| is_valid_email(i.value)),
    ],
};

static PHONE_RULES: FieldRules = FieldRules {
    field: Field::Phone,
    trim: true,
    optional: true,
    rules: &[rule(ErrorKind::PhoneInvalid, |i| is_valid_phone(i.value))],
};

static PASSWORD_RULES: FieldRules = FieldRules {
    field: Field::Password,
    trim: false,
    optional: false,
    rules: &[
        rule(ErrorKind::PasswordRequired, not_empty),
        rule(ErrorKind::PasswordWeak, |i| {
            is_strong_password(i.value, i.config.min_password_length)
        }),
        rule_on(Field::ConfirmPassword, ErrorKind::PasswordMismatch, |i| {
            i.value == i.other(Field::ConfirmPassword)
        }),
    ],
};

static CONFIRM_PASSWORD_RULES: FieldRules = FieldRules {
    field: Field::ConfirmPassword,
    trim: false,
    optional: false,
    rules: &[
        rule(ErrorKind::ConfirmRequired, not_empty),
        rule(ErrorKind::PasswordMismatch, |i| {
            i.value == i.other(Field::Password)
        }),
    ],
};

static AGE_RULES: FieldRules = FieldRules {
    field: Field::Age,
    trim: false,
    optional: false,
    rules: &[
        rule(ErrorKind::AgeRequired, not_empty),
        // Non-numeric input reports the same error as an out-of-range number
        rule(ErrorKind::AgeInvalid, |i| {
            parse_age(i.value).is_some_and(|age| {
                age >= f64::from(i.config.min_age) && age <= f64::from(i.config.max_age)
            })
        }),
    ],
};

static COUNTRY_RULES: FieldRules = FieldRules {
    field: Field::Country,
    trim: false,
    optional: false,
    rules: &[
        rule(ErrorKind::CountryRequired, not_empty),
        rule(ErrorKind::CountryInvalid, |i| i.config.countries.contains(i.value)),
    ],
};

static MESSAGE_RULES: FieldRules = FieldRules {
    field: Field::Message,
    trim: true,
    optional: true,
    rules: &[rule(ErrorKind::MessageTooLong, |i| {
        char_len(i.value) <= i.config.max_message_length
    })],
};

/// Rule table for a field
pub fn rules_for(field: Field) -> &'static FieldRules {
    match field {
        Field::Name => &NAME_RULES,
        Field::Email => &EMAIL_RULES,
        Field::Phone => &PHONE_RULES,
        Field::Password => &PASSWORD_RULES,
        Field::ConfirmPassword => &CONFIRM_PASSWORD_RULES,
        Field::Age => &AGE_RULES,
        Field::Country => &COUNTRY_RULES,
        Field::Message => &MESSAGE_RULES,
    }
}

fn not_empty(input: &RuleInput<'_>) -> bool {
    !input.value.is_empty()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Accepts the hyphenated or plain ten-digit form as typed, or anything
/// that leaves exactly ten digits once non-digits are stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone) || phone.chars().filter(|c| c.is_ascii_digit()).count() == 10
}

/// Lenient numeric parse: surrounding whitespace allowed, decimals and
/// exponents accepted, non-finite values rejected.
pub fn parse_age(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite())
}
