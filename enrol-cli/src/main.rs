//! Enrol: student profile registration CLI.
//!
//! # Usage
//!
//! ```text
//! enrol add --first <name> --last <name> --email <addr> --programme <p> --year <y>
//!           [--interests <text>] [--photo-url <url>]
//! enrol edit <position> [--first …] [--last …] [--email …] …
//! enrol remove <position> [--yes]
//! enrol list [--query <q>] [--json]
//! enrol render [--query <q>] [--out <file>]
//! ```
//!
//! Positions are 0-based, as printed by `enrol list`.

mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    add::AddArgs, edit::EditArgs, list::ListArgs, remove::RemoveArgs, render::RenderArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "enrol",
    version,
    about = "Register, search and render student profiles",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new student profile.
    Add(AddArgs),

    /// Update the profile at a position; omitted fields keep their values.
    Edit(EditArgs),

    /// Remove the profile at a position after confirmation.
    Remove(RemoveArgs),

    /// Show registered profiles as a table.
    List(ListArgs),

    /// Render the card grid and table as HTML.
    Render(RenderArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Add(args) => args.run(),
        Commands::Edit(args) => args.run(),
        Commands::Remove(args) => args.run(),
        Commands::List(args) => args.run(),
        Commands::Render(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
