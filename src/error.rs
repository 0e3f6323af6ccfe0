//! Error types for purl-kit.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when the add-qualifier form has no key.
pub const KEY_REQUIRED: &str = "A key is required";

/// Message shown when the add-qualifier form has no value.
pub const VALUE_REQUIRED: &str = "A value is required";

/// Errors that can occur when building, parsing or deriving Package URLs.
#[derive(Error, Debug)]
pub enum Error {
    /// The string is not a well-formed Package URL.
    #[error("invalid Package URL '{input}': {message}")]
    Parse { input: String, message: String },

    /// A component violates the Package URL rules.
    #[error("invalid {field}: {message}")]
    Construction {
        field: &'static str,
        message: String,
    },

    /// No registry mapping recognized the URL.
    #[error("given URL is either invalid or not supported: {0}")]
    UnsupportedRegistryUrl(String),

    /// The add-qualifier form was submitted with a blank key and/or value.
    #[error("{}", incomplete_qualifier_message(.key_missing, .value_missing))]
    IncompleteQualifier { key_missing: bool, value_missing: bool },

    /// Config file not found.
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read a config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn construction(field: &'static str, message: impl Into<String>) -> Self {
        Error::Construction {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// Per-field messages for an [`Error::IncompleteQualifier`], as
    /// `(key message, value message)`. Other variants yield `(None, None)`.
    pub fn qualifier_messages(&self) -> (Option<&'static str>, Option<&'static str>) {
        match self {
            Error::IncompleteQualifier {
                key_missing,
                value_missing,
            } => (
                key_missing.then_some(KEY_REQUIRED),
                value_missing.then_some(VALUE_REQUIRED),
            ),
            _ => (None, None),
        }
    }
}

fn incomplete_qualifier_message(key_missing: &bool, value_missing: &bool) -> String {
    match (*key_missing, *value_missing) {
        (true, true) => format!("{}; {}", KEY_REQUIRED, VALUE_REQUIRED.to_lowercase()),
        (true, false) => KEY_REQUIRED.to_string(),
        (false, true) => VALUE_REQUIRED.to_string(),
        (false, false) => "qualifier is complete".to_string(),
    }
}

/// Result type alias for purl-kit operations.
pub type Result<T> = std::result::Result<T, Error>;
