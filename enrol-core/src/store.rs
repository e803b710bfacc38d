//! The registration store: an ordered list of student records plus the
//! editing state, kept in step with persistent storage.
//!
//! # Mutation contract
//!
//! Every successful `create` / `update` / `remove`:
//! 1. changes the in-memory list,
//! 2. saves the full list (failures logged, never returned),
//! 3. notifies subscribers, then
//! 4. posts a status message to the announcer.
//!
//! Operations on a position that does not exist do nothing at all.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use crate::announce::{Announcer, Confirm, Silent};
use crate::persistence::Persistence;
use crate::search::{self, Filter};
use crate::storage::Storage;
use crate::types::{EditingState, ProfileForm, StudentId, StudentRecord};
use crate::validate::{validate_form, FieldOptions, FormReport, ValidationContext};

/// What a successful [`RegistrationStore::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Created(StudentRecord),
    Updated(StudentRecord),
    /// The edited position no longer exists; nothing changed.
    Dropped,
}

type Observer = Box<dyn FnMut()>;

pub struct RegistrationStore<S: Storage> {
    records: Vec<StudentRecord>,
    editing: EditingState,
    persistence: Persistence<S>,
    options: FieldOptions,
    observers: Vec<Observer>,
    announcer: Box<dyn Announcer>,
    last_id: u64,
}

impl<S: Storage> RegistrationStore<S> {
    /// Load the stored list once and start with no edit in progress.
    pub fn open(persistence: Persistence<S>) -> Self {
        let records = persistence.load();
        let last_id = records.iter().map(|r| r.id.0).max().unwrap_or(0);
        RegistrationStore {
            records,
            editing: EditingState::Idle,
            persistence,
            options: FieldOptions::default(),
            observers: Vec::new(),
            announcer: Box::new(Silent),
            last_id,
        }
    }

    pub fn with_announcer(mut self, announcer: impl Announcer + 'static) -> Self {
        self.announcer = Box::new(announcer);
        self
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a callback run after every successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&StudentRecord> {
        self.records.get(position)
    }

    pub fn editing(&self) -> EditingState {
        self.editing
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn filter(&self, query: &str) -> Filter<'_> {
        search::filter(&self.records, query)
    }

    /// Validate `form` as it would be checked on submit, excluding
    /// `editing` from the duplicate-email check.
    pub fn validate(&self, form: &ProfileForm, editing: Option<usize>) -> FormReport {
        let ctx = ValidationContext::new(&self.records)
            .excluding(editing)
            .with_options(&self.options);
        validate_form(form, &ctx)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new record built from `form`.
    pub fn create(&mut self, form: &ProfileForm) -> Result<StudentRecord, FormReport> {
        let report = self.validate(form, None);
        if !report.is_valid() {
            return Err(report);
        }
        let now = now_millis();
        let id = self.next_id(now);
        let record = StudentRecord::from_form(id, now, form);
        self.records.push(record.clone());
        self.changed(&format!("Profile created for {}", record.full_name()));
        Ok(record)
    }

    /// Replace every field of the record at `position` except `id` and
    /// `created_at`. `Ok(None)` if `position` is out of range.
    pub fn update(
        &mut self,
        position: usize,
        form: &ProfileForm,
    ) -> Result<Option<StudentRecord>, FormReport> {
        let Some(existing) = self.records.get(position) else {
            return Ok(None);
        };
        let (id, created_at) = (existing.id, existing.created_at);
        let report = self.validate(form, Some(position));
        if !report.is_valid() {
            return Err(report);
        }
        let record = StudentRecord::from_form(id, created_at, form);
        self.records[position] = record.clone();
        self.changed(&format!("Profile updated for {}", record.full_name()));
        Ok(Some(record))
    }

    /// Remove the record at `position` once `confirm` agrees.
    ///
    /// Returns `None`, touching nothing, when the position is out of range or
    /// the confirmation is declined.
    pub fn remove(&mut self, position: usize, confirm: &mut dyn Confirm) -> Option<StudentRecord> {
        let record = self.records.get(position)?;
        let prompt = format!(
            "Remove {}'s profile? This cannot be undone.",
            record.full_name()
        );
        if !confirm.confirm(&prompt) {
            tracing::debug!(position, "removal declined");
            return None;
        }
        let removed = self.records.remove(position);
        self.editing = match self.editing {
            EditingState::Editing(p) if p == position => EditingState::Idle,
            EditingState::Editing(p) if p > position => EditingState::Editing(p - 1),
            other => other,
        };
        self.changed(&format!("Profile removed for {}", removed.full_name()));
        Some(removed)
    }

    /// Enter edit mode for `position` and return the form pre-filled from it.
    pub fn begin_edit(&mut self, position: usize) -> Option<ProfileForm> {
        let record = self.records.get(position)?;
        let form = ProfileForm::from_record(record);
        let message = format!("Editing profile for {}", record.full_name());
        self.editing = EditingState::Editing(position);
        self.announcer.announce(&message);
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        if self.editing != EditingState::Idle {
            self.editing = EditingState::Idle;
            self.announcer.announce("Profile editing cancelled");
        }
    }

    /// Create or update depending on the editing state, then leave edit mode.
    ///
    /// On validation failure the editing state is kept so the caller can
    /// correct the form and resubmit.
    pub fn submit(&mut self, form: &ProfileForm) -> Result<Submission, FormReport> {
        let outcome = match self.editing {
            EditingState::Idle => self.create(form).map(Submission::Created),
            EditingState::Editing(position) => self
                .update(position, form)
                .map(|r| r.map_or(Submission::Dropped, Submission::Updated)),
        };
        match outcome {
            Ok(submission) => {
                self.editing = EditingState::Idle;
                Ok(submission)
            }
            Err(report) => {
                self.announcer.announce("Please correct the errors in the form");
                Err(report)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Clock millis, bumped past the largest id handed out so far. Once the
    /// id space is exhausted, the first free id from the clock onwards.
    fn next_id(&mut self, now: DateTime<Utc>) -> StudentId {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.last_id.checked_add(1) {
            Some(next) => {
                self.last_id = candidate.max(next);
                StudentId(self.last_id)
            }
            None => {
                let taken = |id: &u64| self.records.iter().any(|r| r.id.0 == *id);
                let free = (candidate..=u64::MAX)
                    .chain(0..candidate)
                    .find(|id| !taken(id))
                    .unwrap_or(candidate);
                StudentId(free)
            }
        }
    }

    fn changed(&mut self, message: &str) {
        self.persistence.save(&self.records);
        for observer in &mut self.observers {
            observer();
        }
        self.announcer.announce(message);
    }
}

/// Current time at millisecond precision, the resolution `createdAt` is
/// stored with.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
