//! `enrol list [--query <q>] [--json]`: the table view in the terminal.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use enrol_core::StudentRecord;

use crate::session::Session;

/// Arguments for `enrol list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show profiles whose name, email, programme, year or interests
    /// contain this text (case-insensitive).
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListedJson<'a> {
    position: usize,
    #[serde(flatten)]
    record: &'a StudentRecord,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "email")]
    email: String,
    #[tabled(rename = "programme")]
    programme: String,
    #[tabled(rename = "year")]
    year: String,
    #[tabled(rename = "registered")]
    registered: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let store = &session.store;

        if self.json {
            let payload: Vec<ListedJson<'_>> = store
                .filter(&self.query)
                .map(|(position, record)| ListedJson { position, record })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize profiles")?
            );
            return Ok(());
        }

        println!(
            "{}",
            format!("Enrol v{} | {} profiles", env!("CARGO_PKG_VERSION"), store.len()).bold()
        );
        if store.is_empty() {
            println!("No profiles registered.");
            println!("Run: enrol add --first <name> --last <name> --email <addr> --programme <p> --year <y>");
            return Ok(());
        }

        let rows: Vec<ProfileRow> = store
            .filter(&self.query)
            .map(|(position, r)| ProfileRow {
                position,
                name: r.full_name(),
                email: r.email.clone(),
                programme: r.programme.clone(),
                year: r.year.clone(),
                registered: r.created_at.format("%Y-%m-%d %H:%M").to_string(),
            })
            .collect();

        if rows.is_empty() {
            println!("{}", format!("No matches for '{}'.", self.query.trim()).yellow());
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
