//! `enrol add --first <name> --last <name> --email <addr> --programme <p> --year <y>`

use anyhow::{bail, Result};
use clap::Args;

use enrol_core::ProfileForm;

use crate::session::{print_report, Session};

/// Create a new student profile.
///
/// Every value is passed through unchanged; missing ones surface as
/// validation messages rather than argument errors.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// First name (letters, spaces, apostrophes, hyphens).
    #[arg(long, default_value = "")]
    pub first: String,

    /// Last name (letters, spaces, apostrophes, hyphens).
    #[arg(long, default_value = "")]
    pub last: String,

    /// Email address; must not already be registered.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Programme of study.
    #[arg(long, default_value = "")]
    pub programme: String,

    /// Academic year.
    #[arg(long, default_value = "")]
    pub year: String,

    /// Free-text interests.
    #[arg(long, default_value = "")]
    pub interests: String,

    /// Link to a profile photo.
    #[arg(long = "photo-url", default_value = "")]
    pub photo_url: String,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        let form = ProfileForm {
            first_name: self.first,
            last_name: self.last,
            email: self.email,
            programme: self.programme,
            year: self.year,
            interests: self.interests,
            photo_url: self.photo_url,
        };

        match session.store.submit(&form) {
            Ok(_) => {
                session.print_announcement();
                println!("  {} profiles registered", session.store.len());
                Ok(())
            }
            Err(report) => {
                print_report(&report);
                bail!("profile not created; correct the fields above and retry")
            }
        }
    }
}
