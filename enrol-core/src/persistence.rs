//! Saving and loading the record list under one fixed storage key.
//!
//! The in-memory list is authoritative: [`Persistence::save`] and
//! [`Persistence::load`] log failures and carry on. Use the `try_` forms to
//! see the underlying [`StorageError`].

use crate::error::StorageError;
use crate::storage::Storage;
use crate::types::StudentRecord;

/// Slot that holds the serialized record list.
pub const STORAGE_KEY: &str = "studentRegistrations";

pub struct Persistence<S> {
    storage: S,
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: S) -> Self {
        Persistence { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn try_save(&mut self, records: &[StudentRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        self.storage.set(STORAGE_KEY, &json)
    }

    /// Overwrite the slot with `records`. Failures are logged and dropped.
    pub fn save(&mut self, records: &[StudentRecord]) {
        match self.try_save(records) {
            Ok(()) => tracing::debug!(count = records.len(), "saved student records"),
            Err(err) => tracing::warn!("could not save student records: {err}"),
        }
    }

    /// `Ok(None)` when the slot has never been written.
    pub fn try_load(&self) -> Result<Option<Vec<StudentRecord>>, StorageError> {
        match self.storage.get(STORAGE_KEY)? {
            None => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        }
    }

    /// Stored records, or an empty list when the slot is absent or unreadable.
    pub fn load(&self) -> Vec<StudentRecord> {
        match self.try_load() {
            Ok(Some(records)) => {
                tracing::debug!(count = records.len(), "loaded student records");
                records
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("could not load student records: {err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::{StudentId, INTERESTS_PLACEHOLDER};
    use chrono::{TimeZone, Utc};

    fn record(id: u64, email: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId(id),
            first_name: "Ana".into(),
            last_name: "Lee".into(),
            email: email.into(),
            programme: "CS".into(),
            year: "2".into(),
            interests: INTERESTS_PLACEHOLDER.into(),
            photo_url: "https://x.com/a.png".into(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn absent_slot_loads_empty() {
        let p = Persistence::new(MemoryStorage::new());
        assert!(p.load().is_empty());
        assert!(p.try_load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_is_lossless() {
        let mut p = Persistence::new(MemoryStorage::new());
        let records = vec![record(1, "a@x.com"), record(2, "b@x.com")];
        p.save(&records);
        assert_eq!(p.load(), records);
    }

    #[test]
    fn malformed_slot_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.insert(STORAGE_KEY, "{not json");
        let p = Persistence::new(storage);
        assert!(p.load().is_empty());
        assert!(matches!(p.try_load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn failed_save_is_swallowed() {
        let mut p = Persistence::new(MemoryStorage::with_quota(16));
        p.save(&[record(1, "a@x.com")]);
        assert!(p.storage().raw(STORAGE_KEY).is_none());
        assert!(p.try_save(&[record(1, "a@x.com")]).is_err());
    }

    #[test]
    fn persisted_shape_uses_wire_keys() {
        let mut p = Persistence::new(MemoryStorage::new());
        p.save(&[record(7, "a@x.com")]);
        let raw = p.storage().raw(STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        let obj = value[0].as_object().unwrap();
        for key in [
            "id", "firstName", "lastName", "email", "programme", "year", "interests", "photoUrl",
            "createdAt",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["createdAt"], "2023-11-14T22:13:20.123Z");
    }
}
