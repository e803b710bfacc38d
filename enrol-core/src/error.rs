//! Error types for enrol-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Field;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    Required,
    TooShort,
    InvalidChars,
    InvalidFormat,
    /// Another record already uses this email (case-insensitive).
    Duplicate,
    InvalidUrl,
    /// Value is not in the configured option list.
    NotAnOption,
}

/// A failed field check. Reported to the caller as a value, never raised
/// out of a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.field, .kind, .value))]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    /// Trimmed offending value.
    pub value: String,
}

impl ValidationError {
    pub fn is_duplicate_email(&self) -> bool {
        self.kind == ValidationErrorKind::Duplicate
    }
}

fn describe(field: &Field, kind: &ValidationErrorKind, value: &str) -> String {
    use ValidationErrorKind as K;
    match (kind, field) {
        (K::Required, Field::FirstName) => "First name is required".into(),
        (K::Required, Field::LastName) => "Last name is required".into(),
        (K::Required, Field::Email) => "Email address is required".into(),
        (K::Required, Field::Programme) => "Please select your programme".into(),
        (K::Required, Field::Year) => "Please select your academic year".into(),
        (K::Required, other) => format!("{other} is required"),
        (K::TooShort, _) => "Must be at least 2 characters long".into(),
        (K::InvalidChars, _) => "Only letters, spaces, apostrophes, and hyphens allowed".into(),
        (K::InvalidFormat, _) => "Please enter a valid email address".into(),
        (K::Duplicate, _) => "This email is already registered".into(),
        (K::InvalidUrl, _) => "Please enter a valid URL".into(),
        (K::NotAnOption, _) => format!("{value} is not one of the available options"),
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Failures reading or writing the persisted record list.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slot held text that is not a record list.
    #[error("stored records are malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// All errors that can arise from loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`; cannot locate `~/.enrol/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
