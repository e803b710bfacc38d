//! `enrol remove <position> [--yes]`

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use crate::session::{print_missing, Session};

/// Remove the profile at a position.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Position as shown by `enrol list`.
    pub position: usize,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl RemoveArgs {
    pub fn run(self) -> Result<()> {
        let mut session = Session::open()?;
        if session.store.get(self.position).is_none() {
            print_missing(self.position);
            return Ok(());
        }

        let assume_yes = self.yes;
        let mut confirm = |prompt: &str| assume_yes || ask(prompt);
        match session.store.remove(self.position, &mut confirm) {
            Some(_) => session.print_announcement(),
            None => println!("Kept profile at position {}.", self.position),
        }
        Ok(())
    }
}

/// `<prompt> [y/N]` on stdout; anything but `y`/`yes` declines.
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(err) => {
            tracing::warn!("could not read confirmation: {err}");
            false
        }
    }
}
