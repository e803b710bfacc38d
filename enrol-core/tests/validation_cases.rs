//! Field rule tables.
//!
//! Each `#[case]` is isolated; no shared state.

use chrono::Utc;
use enrol_core::{
    validate::{validate_field, validate_form},
    Field, ProfileForm, StudentId, StudentRecord, ValidationContext, ValidationErrorKind,
};
use rstest::rstest;

fn existing() -> Vec<StudentRecord> {
    vec![StudentRecord {
        id: StudentId(1),
        first_name: "Ana".into(),
        last_name: "Lee".into(),
        email: "Ana@X.com".into(),
        programme: "CS".into(),
        year: "2".into(),
        interests: String::new(),
        photo_url: String::new(),
        created_at: Utc::now(),
    }]
}

#[rstest]
#[case("", Some(ValidationErrorKind::Required))]
#[case("   ", Some(ValidationErrorKind::Required))]
#[case("J", Some(ValidationErrorKind::TooShort))]
#[case("Jo3", Some(ValidationErrorKind::InvalidChars))]
#[case("Ana!", Some(ValidationErrorKind::InvalidChars))]
#[case("Zoë", Some(ValidationErrorKind::InvalidChars))]
#[case("é", Some(ValidationErrorKind::TooShort))]
#[case("😀", Some(ValidationErrorKind::InvalidChars))]
#[case("O'Brien-Smith", None)]
#[case("Mary Ann", None)]
#[case("  Jo  ", None)]
fn name_rules(#[case] raw: &str, #[case] expected: Option<ValidationErrorKind>) {
    let ctx = ValidationContext::new(&[]);
    for field in [Field::FirstName, Field::LastName] {
        let got = validate_field(field, raw, &ctx).error.map(|e| e.kind);
        assert_eq!(got, expected, "{field} = {raw:?}");
    }
}

#[rstest]
#[case("", Some(ValidationErrorKind::Required))]
#[case("plain", Some(ValidationErrorKind::InvalidFormat))]
#[case("a@b", Some(ValidationErrorKind::InvalidFormat))]
#[case("a@@b.co", Some(ValidationErrorKind::InvalidFormat))]
#[case("ana@x.com", Some(ValidationErrorKind::Duplicate))]
#[case("ANA@X.COM", Some(ValidationErrorKind::Duplicate))]
#[case("bo@x.com", None)]
#[case("first.last+tag@sub.uni.edu", None)]
fn email_rules(#[case] raw: &str, #[case] expected: Option<ValidationErrorKind>) {
    let records = existing();
    let ctx = ValidationContext::new(&records);
    let got = validate_field(Field::Email, raw, &ctx).error.map(|e| e.kind);
    assert_eq!(got, expected, "email = {raw:?}");
}

#[rstest]
#[case("https://example.com/me.jpg", true)]
#[case("http://localhost:8080", true)]
#[case("data:image/png;base64,AAAA", true)]
#[case("example.com/me.jpg", false)]
#[case("https://", false)]
fn photo_url_rules(#[case] raw: &str, #[case] valid: bool) {
    let ctx = ValidationContext::new(&[]);
    let result = validate_field(Field::PhotoUrl, raw, &ctx);
    assert_eq!(result.valid(), valid, "photoUrl = {raw:?}: {}", result.message());
}

#[rstest]
#[case(Field::Programme, "Please select your programme")]
#[case(Field::Year, "Please select your academic year")]
#[case(Field::Email, "Email address is required")]
fn required_choice_messages(#[case] field: Field, #[case] message: &str) {
    let ctx = ValidationContext::new(&[]);
    assert_eq!(validate_field(field, "", &ctx).message(), message);
}

#[test]
fn whole_form_reports_first_message_per_field() {
    let records = existing();
    let ctx = ValidationContext::new(&records);
    let form = ProfileForm {
        first_name: "A".into(),
        last_name: "Lee".into(),
        email: "ana@x.com".into(),
        programme: String::new(),
        year: "1".into(),
        interests: String::new(),
        photo_url: "nope".into(),
    };
    let report = validate_form(&form, &ctx);
    assert!(!report.is_valid());
    assert_eq!(
        report.message_for(Field::FirstName).as_deref(),
        Some("Must be at least 2 characters long")
    );
    assert_eq!(report.message_for(Field::LastName), None);
    assert_eq!(
        report.message_for(Field::Email).as_deref(),
        Some("This email is already registered")
    );
    assert_eq!(
        report.message_for(Field::Programme).as_deref(),
        Some("Please select your programme")
    );
    assert_eq!(
        report.message_for(Field::PhotoUrl).as_deref(),
        Some("Please enter a valid URL")
    );
    assert_eq!(report.errors().count(), 4);
}

#[test]
fn valid_form_passes() {
    let ctx = ValidationContext::new(&[]);
    let form = ProfileForm {
        first_name: "Ana".into(),
        last_name: "Lee".into(),
        email: "ana@x.com".into(),
        programme: "CS".into(),
        year: "2".into(),
        ..ProfileForm::default()
    };
    assert!(validate_form(&form, &ctx).is_valid());
}
