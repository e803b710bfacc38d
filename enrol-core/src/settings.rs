//! User settings and on-disk locations.
//!
//! # Storage layout
//!
//! ```text
//! ~/.enrol/
//!   config.yaml                       (optional; defaults when absent)
//!   storage/
//!     studentRegistrations.json       (record list, mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every path-taking function has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::announce::DEFAULT_CLEAR_AFTER;
use crate::error::SettingsError;
use crate::persistence::Persistence;
use crate::storage::FileStorage;
use crate::validate::FieldOptions;

/// Contents of `~/.enrol/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the record slot. Defaults to `~/.enrol/storage`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Allowed programmes; empty accepts any non-empty value.
    pub programmes: Vec<String>,
    /// Allowed academic years; empty accepts any non-empty value.
    pub years: Vec<String>,
    pub announcement_clear_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_dir: None,
            programmes: Vec::new(),
            years: Vec::new(),
            announcement_clear_ms: DEFAULT_CLEAR_AFTER.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn field_options(&self) -> FieldOptions {
        FieldOptions {
            programmes: self.programmes.clone(),
            years: self.years.clone(),
        }
    }

    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.announcement_clear_ms)
    }

    /// Configured storage directory, or `<home>/.enrol/storage`.
    pub fn storage_dir_at(&self, home: &Path) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| enrol_root(home).join("storage"))
    }

    /// File-backed persistence rooted at [`Settings::storage_dir_at`].
    pub fn persistence_at(&self, home: &Path) -> Persistence<FileStorage> {
        Persistence::new(FileStorage::new(self.storage_dir_at(home)))
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.enrol/`
pub fn enrol_root(home: &Path) -> PathBuf {
    home.join(".enrol")
}

/// `<home>/.enrol/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    enrol_root(home).join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load settings from `<home>/.enrol/config.yaml`.
///
/// A missing file yields [`Settings::default`]; malformed YAML yields
/// `SettingsError::Parse` with the file path.
pub fn load_at(home: &Path) -> Result<Settings, SettingsError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| SettingsError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Settings, SettingsError> {
    load_at(&home()?)
}

/// Write settings to `<home>/.enrol/config.yaml` via a `.tmp` + rename.
pub fn save_at(home: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let path = config_path_at(home);
    std::fs::create_dir_all(enrol_root(home))?;
    let tmp = path.with_file_name("config.yaml.tmp");
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(&tmp, yaml)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

pub fn home() -> Result<PathBuf, SettingsError> {
    dirs::home_dir().ok_or(SettingsError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
