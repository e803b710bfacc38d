//! Case-insensitive substring search over the searchable record fields.
//! Recomputed from scratch on every query.

use crate::types::StudentRecord;

/// True when `query` (trimmed, case-insensitive) occurs in any of first name,
/// last name, email, programme, year or interests. An empty query matches.
pub fn matches(record: &StudentRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    matches_lowered(record, &needle)
}

fn matches_lowered(record: &StudentRecord, needle: &str) -> bool {
    needle.is_empty()
        || [
            &record.first_name,
            &record.last_name,
            &record.email,
            &record.programme,
            &record.year,
            &record.interests,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Lazily filter `records`, yielding each match with its position in the
/// full list. The iterator is `Clone`, so a view can walk it more than once.
pub fn filter<'a>(records: &'a [StudentRecord], query: &str) -> Filter<'a> {
    Filter {
        inner: records.iter().enumerate(),
        needle: query.trim().to_lowercase(),
    }
}

#[derive(Debug, Clone)]
pub struct Filter<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, StudentRecord>>,
    needle: String,
}

impl<'a> Iterator for Filter<'a> {
    type Item = (usize, &'a StudentRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.inner.find(|(_, r)| matches_lowered(r, needle))
    }
}
