//! `enrol edit <position> [--first …] [--last …] …`

use anyhow::{bail, Result};
use clap::Args;

use enrol_core::{Field, Submission};

use crate::session::{print_missing, print_report, Session};

/// Update the profile at a position; omitted fields keep their values.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Position as shown by `enrol list`.
    pub position: usize,

    #[arg(long)]
    pub first: Option<String>,

    #[arg(long)]
    pub last: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub programme: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    /// Pass an empty string to clear.
    #[arg(long)]
    pub interests: Option<String>,

    /// Pass an empty string to clear.
    #[arg(long = "photo-url")]
    pub photo_url: Option<String>,
}

impl EditArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        let Some(mut form) = session.store.begin_edit(self.position) else {
            print_missing(self.position);
            return Ok(());
        };

        let changes = [
            (Field::FirstName, self.first),
            (Field::LastName, self.last),
            (Field::Email, self.email),
            (Field::Programme, self.programme),
            (Field::Year, self.year),
            (Field::Interests, self.interests),
            (Field::PhotoUrl, self.photo_url),
        ];
        for (field, value) in changes {
            if let Some(value) = value {
                form.set(field, value);
            }
        }

        match session.store.submit(&form) {
            Ok(Submission::Dropped) => {
                print_missing(self.position);
                Ok(())
            }
            Ok(_) => {
                session.print_announcement();
                Ok(())
            }
            Err(report) => {
                print_report(&report);
                bail!("profile at position {} not updated", self.position)
            }
        }
    }
}
