//! Validation limits and the allowed-country table
//!
//! Loaded once per process and immutable afterwards. The server installs its
//! configured values at startup with [`ValidationConfig::install`]; anything
//! that runs before that (or without it, like tests) sees the defaults.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static INSTALLED: OnceCell<ValidationConfig> = OnceCell::new();

/// Static rule limits for the intake form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    #[serde(default = "default_min_age")]
    pub min_age: u32,

    #[serde(default = "default_max_age")]
    pub max_age: u32,

    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    #[serde(default)]
    pub countries: CountryTable,
}

/// A selectable country: wire code plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// Ordered code → display-name table. Order is the select-box order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryTable(Vec<Country>);

// Default values
fn default_min_name_length() -> usize {
    2
}

fn default_max_name_length() -> usize {
    50
}

fn default_min_password_length() -> usize {
    8
}

fn default_min_age() -> u32 {
    18
}

fn default_max_age() -> u32 {
    120
}

fn default_max_message_length() -> usize {
    500
}

const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("ca", "Canada"),
    ("uk", "United Kingdom"),
    ("au", "Australia"),
    ("de", "Germany"),
    ("fr", "France"),
    ("jp", "Japan"),
    ("bd", "Bangladesh"),
    ("in", "India"),
    ("other", "Other"),
];

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_length: default_min_name_length(),
            max_name_length: default_max_name_length(),
            min_password_length: default_min_password_length(),
            min_age: default_min_age(),
            max_age: default_max_age(),
            max_message_length: default_max_message_length(),
            countries: CountryTable::default(),
        }
    }
}

impl ValidationConfig {
    /// Process-wide configuration. Falls back to defaults if nothing was installed.
    pub fn global() -> &'static ValidationConfig {
        INSTALLED.get_or_init(ValidationConfig::default)
    }

    /// Install the process-wide configuration.
    ///
    /// Succeeds only once, and only before the first [`ValidationConfig::global`]
    /// call. On failure the rejected value is handed back.
    pub fn install(config: ValidationConfig) -> Result<(), ValidationConfig> {
        INSTALLED.set(config)
    }
}

impl Default for CountryTable {
    fn default() -> Self {
        Self(
            DEFAULT_COUNTRIES
                .iter()
                .map(|(code, name)| Country {
                    code: code.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }
}

impl CountryTable {
    pub fn new(countries: Vec<Country>) -> Self {
        Self(countries)
    }

    /// Exact, case-sensitive membership test on country codes
    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c.code == code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
