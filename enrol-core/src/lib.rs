//! Enrol core library: student records, validation, the registration
//! store, search, and persistence.
//!
//! - [`types`]: records, form values, editing state
//! - [`validate`]: field rules and whole-form checks
//! - [`store`]: [`RegistrationStore`], the single owner of the record list
//! - [`search`]: substring filtering
//! - [`storage`] / [`persistence`]: key-value slots and the record blob
//! - [`announce`]: status-message and confirmation collaborators
//! - [`settings`]: `~/.enrol/config.yaml`

pub mod announce;
pub mod error;
pub mod persistence;
pub mod search;
pub mod settings;
pub mod storage;
pub mod store;
pub mod types;
pub mod validate;

pub use announce::{Announcer, Confirm, LiveRegion};
pub use error::{SettingsError, StorageError, ValidationError, ValidationErrorKind};
pub use persistence::{Persistence, STORAGE_KEY};
pub use settings::Settings;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{RegistrationStore, Submission};
pub use types::{EditingState, ProfileForm, StudentId, StudentRecord, INTERESTS_PLACEHOLDER};
pub use validate::{Field, FieldOptions, FormReport, ValidationContext, ValidationResult};
