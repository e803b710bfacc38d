//! Per-invocation wiring: settings, the store, and its collaborators.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use enrol_core::{settings, FileStorage, FormReport, LiveRegion, RegistrationStore};

pub struct Session {
    pub home: PathBuf,
    pub store: RegistrationStore<FileStorage>,
    region: LiveRegion,
}

impl Session {
    pub fn open() -> Result<Self> {
        let home = settings::home()?;
        Self::open_at(&home)
    }

    pub fn open_at(home: &Path) -> Result<Self> {
        let settings = settings::load_at(home).context("failed to load ~/.enrol/config.yaml")?;
        let region = LiveRegion::new(settings.clear_after());
        let store = RegistrationStore::open(settings.persistence_at(home))
            .with_options(settings.field_options())
            .with_announcer(region.clone());
        tracing::debug!(
            records = store.len(),
            storage = %settings.storage_dir_at(home).display(),
            "opened registration store"
        );
        Ok(Session {
            home: home.to_path_buf(),
            store,
            region,
        })
    }

    /// `<home>/.enrol/templates`, where user overrides for the HTML views live.
    pub fn template_dir(&self) -> PathBuf {
        settings::enrol_root(&self.home).join("templates")
    }

    /// Print the store's latest status message, whether or not the live
    /// region has already cleared it.
    pub fn print_announcement(&self) {
        if let Some(message) = self.region.last() {
            println!("{} {}", "✓".green().bold(), message);
        }
    }
}

/// One line per failing field, on stderr.
pub fn print_report(report: &FormReport) {
    for err in report.errors() {
        eprintln!("  {} {}: {}", "✗".red().bold(), err.field, err);
    }
}

pub fn print_missing(position: usize) {
    println!(
        "{}",
        format!("No profile at position {position}; nothing changed.").bright_black()
    );
}
