//! Domain types for the student registry.
//!
//! [`StudentRecord`] is the persisted shape; its serde layout (camelCase keys,
//! numeric `id`, ISO-8601 `createdAt`) is the on-disk contract.
//! [`ProfileForm`] carries raw, untrimmed values as a form submits them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::Field;

/// Stored in place of empty interests.
pub const INTERESTS_PLACEHOLDER: &str = "No specific interests mentioned";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Creation-time identifier of a student record (milliseconds since epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for StudentId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A registered student profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub programme: String,
    pub year: String,
    #[serde(default)]
    pub interests: String,
    /// Empty when the student supplied no photo.
    #[serde(default)]
    pub photo_url: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl StudentRecord {
    /// Build a record from a validated form. Names, email, interests and the
    /// photo URL are trimmed; empty interests become [`INTERESTS_PLACEHOLDER`].
    pub fn from_form(id: StudentId, created_at: DateTime<Utc>, form: &ProfileForm) -> Self {
        let interests = form.interests.trim();
        StudentRecord {
            id,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            programme: form.programme.clone(),
            year: form.year.clone(),
            interests: if interests.is_empty() {
                INTERESTS_PLACEHOLDER.to_string()
            } else {
                interests.to_string()
            },
            photo_url: form.photo_url.trim().to_string(),
            created_at,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First letter of each name, upper-cased (`"ana" "lee"` → `"AL"`).
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// True when the interests are something other than the placeholder.
    pub fn has_interests(&self) -> bool {
        !self.interests.is_empty() && self.interests != INTERESTS_PLACEHOLDER
    }

    pub fn photo(&self) -> Option<&str> {
        (!self.photo_url.is_empty()).then_some(self.photo_url.as_str())
    }
}

/// Raw field values of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub programme: String,
    pub year: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub photo_url: String,
}

impl ProfileForm {
    /// Pre-fill a form from a stored record. The interests placeholder maps
    /// back to an empty field.
    pub fn from_record(record: &StudentRecord) -> Self {
        ProfileForm {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            programme: record.programme.clone(),
            year: record.year.clone(),
            interests: if record.interests == INTERESTS_PLACEHOLDER {
                String::new()
            } else {
                record.interests.clone()
            },
            photo_url: record.photo_url.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Programme => &self.programme,
            Field::Year => &self.year,
            Field::Interests => &self.interests,
            Field::PhotoUrl => &self.photo_url,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Programme => &mut self.programme,
            Field::Year => &mut self.year,
            Field::Interests => &mut self.interests,
            Field::PhotoUrl => &mut self.photo_url,
        };
        *slot = value.into();
    }
}

/// Which record, if any, the next submission updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingState {
    #[default]
    Idle,
    Editing(usize),
}

impl EditingState {
    pub fn position(&self) -> Option<usize> {
        match self {
            EditingState::Idle => None,
            EditingState::Editing(p) => Some(*p),
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp format
// ---------------------------------------------------------------------------

/// `createdAt` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> StudentRecord {
        StudentRecord {
            id: StudentId(1_700_000_000_123),
            first_name: "Ana".into(),
            last_name: "Lee".into(),
            email: "ana@x.com".into(),
            programme: "CS".into(),
            year: "2".into(),
            interests: INTERESTS_PLACEHOLDER.into(),
            photo_url: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys_and_numeric_id() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], serde_json::json!(1_700_000_000_123u64));
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["photoUrl"], "");
        assert_eq!(json["createdAt"], "2024-03-01T09:30:00.000Z");
    }

    #[test]
    fn missing_optional_keys_default_to_empty() {
        let raw = r#"{"id":5,"firstName":"Ana","lastName":"Lee","email":"a@b.co",
            "programme":"CS","year":"1","createdAt":"2024-03-01T09:30:00.000Z"}"#;
        let rec: StudentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.photo_url, "");
        assert_eq!(rec.interests, "");
        assert_eq!(rec.id, StudentId(5));
    }

    #[test]
    fn from_form_trims_and_defaults_interests() {
        let form = ProfileForm {
            first_name: "  Ana ".into(),
            last_name: "Lee".into(),
            email: " ana@x.com".into(),
            programme: "CS".into(),
            year: "2".into(),
            interests: "   ".into(),
            photo_url: " ".into(),
        };
        let rec = StudentRecord::from_form(StudentId(1), Utc::now(), &form);
        assert_eq!(rec.first_name, "Ana");
        assert_eq!(rec.email, "ana@x.com");
        assert_eq!(rec.interests, INTERESTS_PLACEHOLDER);
        assert_eq!(rec.photo(), None);
    }

    #[test]
    fn form_prefill_hides_placeholder() {
        let form = ProfileForm::from_record(&sample());
        assert_eq!(form.interests, "");
        assert_eq!(form.get(Field::Email), "ana@x.com");
    }

    #[test]
    fn initials_and_full_name() {
        let mut rec = sample();
        rec.first_name = "ana".into();
        assert_eq!(rec.initials(), "AL");
        assert_eq!(rec.full_name(), "ana Lee");
        assert!(!rec.has_interests());
    }

    #[test]
    fn editing_state_position() {
        assert_eq!(EditingState::Idle.position(), None);
        assert_eq!(EditingState::Editing(3).position(), Some(3));
    }
}
