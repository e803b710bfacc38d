//! `enrol render [--query <q>] [--out <file>]`: card grid + table as HTML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use enrol_renderer::{Renderer, View};

use crate::session::Session;

/// Arguments for `enrol render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Filter the card grid (the table always lists everyone).
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Render only the card grid.
    #[arg(long, conflicts_with = "table_only")]
    pub cards_only: bool,

    /// Render only the table.
    #[arg(long)]
    pub table_only: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let template_dir = session.template_dir();
        let renderer = Renderer::with_overrides(&template_dir)
            .with_context(|| format!("failed to load templates from {}", template_dir.display()))?;

        let view = if self.cards_only {
            View::Cards
        } else if self.table_only {
            View::Table
        } else {
            View::Page
        };
        let html = renderer
            .render(session.store.records(), &self.query, view)
            .context("failed to render profiles")?;

        match self.out {
            Some(path) => {
                std::fs::write(&path, html)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("✓ Rendered {} profiles to {}", session.store.len(), path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
