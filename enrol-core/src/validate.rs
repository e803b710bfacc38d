//! Field-level and whole-form validation.
//!
//! Each [`Field`] maps to one rule function through [`Field::rule`]; the
//! rules are pure and read existing records only through
//! [`ValidationContext`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{ValidationError, ValidationErrorKind};
use crate::types::{ProfileForm, StudentRecord};

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern compiles"));

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const MIN_NAME_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A registration form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Programme,
    Year,
    Interests,
    PhotoUrl,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Programme,
        Field::Year,
        Field::Interests,
        Field::PhotoUrl,
    ];

    /// Fields a submission cannot leave empty.
    pub const REQUIRED: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Programme,
        Field::Year,
    ];

    /// Key used in the persisted JSON and by form markup.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Programme => "programme",
            Field::Year => "year",
            Field::Interests => "interests",
            Field::PhotoUrl => "photoUrl",
        }
    }

    pub fn rule(self) -> Rule {
        match self {
            Field::FirstName | Field::LastName => check_name,
            Field::Email => check_email,
            Field::Programme => check_programme,
            Field::Year => check_year,
            Field::PhotoUrl => check_photo_url,
            Field::Interests => accept,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.wire_name() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Context + results
// ---------------------------------------------------------------------------

/// Enumerated choices offered for `programme` and `year`.
///
/// An empty list leaves that field unrestricted beyond being required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    pub programmes: Vec<String>,
    pub years: Vec<String>,
}

/// What a rule may consult besides the raw value.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub records: &'a [StudentRecord],
    /// Position of the record being edited; excluded from the duplicate check.
    pub editing: Option<usize>,
    pub options: Option<&'a FieldOptions>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(records: &'a [StudentRecord]) -> Self {
        ValidationContext { records, editing: None, options: None }
    }

    pub fn excluding(mut self, position: Option<usize>) -> Self {
        self.editing = position;
        self
    }

    pub fn with_options(mut self, options: &'a FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    fn email_taken(&self, email: &str) -> bool {
        let wanted = email.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .any(|(i, r)| Some(i) != self.editing && r.email.to_lowercase() == wanted)
    }
}

pub type Rule = fn(&str, &ValidationContext<'_>) -> Result<(), ValidationErrorKind>;

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field: Field,
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    pub fn valid(&self) -> bool {
        self.error.is_none()
    }

    /// Human-readable failure, or `""` when valid.
    pub fn message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

/// Per-field results of a whole-form validation, required fields first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub results: Vec<ValidationResult>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(ValidationResult::valid)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.results.iter().filter_map(|r| r.error.as_ref())
    }

    pub fn message_for(&self, field: Field) -> Option<String> {
        self.results
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.error.as_ref())
            .map(ToString::to_string)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn validate_field(field: Field, raw: &str, ctx: &ValidationContext<'_>) -> ValidationResult {
    let error = (field.rule())(raw, ctx)
        .err()
        .map(|kind| ValidationError { field, kind, value: raw.trim().to_string() });
    ValidationResult { field, error }
}

/// Validate every required field, plus the photo URL when one was given.
pub fn validate_form(form: &ProfileForm, ctx: &ValidationContext<'_>) -> FormReport {
    let mut results: Vec<ValidationResult> = Field::REQUIRED
        .into_iter()
        .map(|field| validate_field(field, form.get(field), ctx))
        .collect();
    if !form.photo_url.trim().is_empty() {
        results.push(validate_field(Field::PhotoUrl, &form.photo_url, ctx));
    }
    FormReport { results }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn check_name(raw: &str, _ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    let value = raw.trim();
    if value.is_empty() {
        Err(ValidationErrorKind::Required)
    } else if value.encode_utf16().count() < MIN_NAME_LEN {
        Err(ValidationErrorKind::TooShort)
    } else if !NAME_CHARS.is_match(value) {
        Err(ValidationErrorKind::InvalidChars)
    } else {
        Ok(())
    }
}

fn check_email(raw: &str, ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    if raw.trim().is_empty() {
        Err(ValidationErrorKind::Required)
    } else if !EMAIL_SHAPE.is_match(raw) {
        Err(ValidationErrorKind::InvalidFormat)
    } else if ctx.email_taken(raw) {
        Err(ValidationErrorKind::Duplicate)
    } else {
        Ok(())
    }
}

fn check_programme(raw: &str, ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    check_choice(raw, ctx.options.map(|o| o.programmes.as_slice()))
}

fn check_year(raw: &str, ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    check_choice(raw, ctx.options.map(|o| o.years.as_slice()))
}

fn check_choice(raw: &str, choices: Option<&[String]>) -> Result<(), ValidationErrorKind> {
    if raw.is_empty() {
        return Err(ValidationErrorKind::Required);
    }
    match choices {
        Some(list) if !list.is_empty() && !list.iter().any(|c| c == raw) => {
            Err(ValidationErrorKind::NotAnOption)
        }
        _ => Ok(()),
    }
}

fn check_photo_url(raw: &str, _ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    if raw.trim().is_empty() || Url::parse(raw.trim()).is_ok() {
        Ok(())
    } else {
        Err(ValidationErrorKind::InvalidUrl)
    }
}

fn accept(_raw: &str, _ctx: &ValidationContext<'_>) -> Result<(), ValidationErrorKind> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentId;
    use chrono::Utc;

    fn record(email: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId(1),
            first_name: "Ana".into(),
            last_name: "Lee".into(),
            email: email.into(),
            programme: "CS".into(),
            year: "2".into(),
            interests: String::new(),
            photo_url: String::new(),
            created_at: Utc::now(),
        }
    }

    fn kind(field: Field, raw: &str, ctx: &ValidationContext<'_>) -> Option<ValidationErrorKind> {
        validate_field(field, raw, ctx).error.map(|e| e.kind)
    }

    #[test]
    fn name_rule_order() {
        let ctx = ValidationContext::new(&[]);
        assert_eq!(kind(Field::FirstName, "   ", &ctx), Some(ValidationErrorKind::Required));
        assert_eq!(kind(Field::FirstName, " J ", &ctx), Some(ValidationErrorKind::TooShort));
        assert_eq!(kind(Field::FirstName, "J3", &ctx), Some(ValidationErrorKind::InvalidChars));
        assert_eq!(kind(Field::LastName, "O'Brien-Smith", &ctx), None);
    }

    #[test]
    fn required_messages_name_the_field() {
        let ctx = ValidationContext::new(&[]);
        assert_eq!(validate_field(Field::FirstName, "", &ctx).message(), "First name is required");
        assert_eq!(validate_field(Field::LastName, "", &ctx).message(), "Last name is required");
        assert_eq!(validate_field(Field::Year, "", &ctx).message(), "Please select your academic year");
    }

    #[test]
    fn email_format_and_duplicates() {
        let records = vec![record("Ana@X.com")];
        let ctx = ValidationContext::new(&records);
        assert_eq!(kind(Field::Email, "ana@x", &ctx), Some(ValidationErrorKind::InvalidFormat));
        assert_eq!(kind(Field::Email, "a b@x.com", &ctx), Some(ValidationErrorKind::InvalidFormat));
        assert_eq!(kind(Field::Email, "ana@x.com", &ctx), Some(ValidationErrorKind::Duplicate));
        assert_eq!(kind(Field::Email, "ana@x.com", &ctx.excluding(Some(0))), None);
        assert_eq!(kind(Field::Email, "bo@x.com", &ctx), None);
    }

    #[test]
    fn photo_url_is_optional_but_must_parse() {
        let ctx = ValidationContext::new(&[]);
        assert!(validate_field(Field::PhotoUrl, "", &ctx).valid());
        assert!(validate_field(Field::PhotoUrl, "https://x.com/a.png", &ctx).valid());
        assert_eq!(kind(Field::PhotoUrl, "not a url", &ctx), Some(ValidationErrorKind::InvalidUrl));
    }

    #[test]
    fn option_lists_restrict_choices_when_present() {
        let options = FieldOptions { programmes: vec!["CS".into()], years: vec![] };
        let ctx = ValidationContext::new(&[]).with_options(&options);
        assert_eq!(kind(Field::Programme, "Law", &ctx), Some(ValidationErrorKind::NotAnOption));
        assert_eq!(kind(Field::Programme, "CS", &ctx), None);
        assert_eq!(kind(Field::Year, "7", &ctx), None);
    }

    #[test]
    fn interests_always_valid() {
        let ctx = ValidationContext::new(&[]);
        assert!(validate_field(Field::Interests, "", &ctx).valid());
    }

    #[test]
    fn form_report_skips_empty_photo() {
        let ctx = ValidationContext::new(&[]);
        let form = ProfileForm::default();
        let report = validate_form(&form, &ctx);
        assert!(!report.is_valid());
        assert_eq!(report.results.len(), Field::REQUIRED.len());
        assert_eq!(
            report.message_for(Field::Email).as_deref(),
            Some("Email address is required")
        );
    }

    #[test]
    fn field_parses_from_wire_name() {
        assert_eq!("photoUrl".parse::<Field>().unwrap(), Field::PhotoUrl);
        assert!("nickname".parse::<Field>().is_err());
    }
}
