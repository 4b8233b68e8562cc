use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "de07-user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TABLE_NAME must not be empty")]
    EmptyTableName,

    #[error("invalid EMAIL_VALIDATION value {0:?}, expected \"presence\" or \"format\"")]
    InvalidEmailValidation(String),
}

/// How strictly create and update check the record's email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailValidation {
    /// Email must be non-empty.
    #[default]
    Presence,
    /// Email must be non-empty and pass [`crate::validators::is_email_valid`].
    Format,
}

impl FromStr for EmailValidation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" => Ok(EmailValidation::Presence),
            "format" => Ok(EmailValidation::Format),
            _ => Err(ConfigError::InvalidEmailValidation(s.to_string())),
        }
    }
}

/// Settings read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub table_name: String,
    pub email_validation: EmailValidation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            email_validation: EmailValidation::default(),
        }
    }
}

impl Settings {
    /// Load settings from `TABLE_NAME` and `EMAIL_VALIDATION`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        if table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }

        let email_validation = match lookup("EMAIL_VALIDATION") {
            Some(value) => value.parse()?,
            None => EmailValidation::default(),
        };

        Ok(Self {
            table_name,
            email_validation,
        })
    }
}
