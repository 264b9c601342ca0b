//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add::AddArgs;
use crate::commands::clear::ClearArgs;
use crate::commands::delete::DeleteArgs;
use crate::commands::edit::EditArgs;
use crate::commands::import::ImportArgs;
use crate::commands::list::ListArgs;
use crate::commands::next::NextArgs;

/// Local worklog time tracker.
///
/// Records what you worked on between two clock times on a date, and sums it up.
/// Times may be given as `5:30 PM` or `17:30`.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a finished interval.
    Add(AddArgs),

    /// Change an entry's end time and description.
    Edit(EditArgs),

    /// Delete one entry.
    Delete(DeleteArgs),

    /// Delete every entry.
    Clear(ClearArgs),

    /// List entries with their total duration.
    List(ListArgs),

    /// Show where the next entry would start.
    Next(NextArgs),

    /// Import a JSON dump saved by the old browser widgets.
    Import(ImportArgs),

    /// Show database location, settings and stored data.
    Status,
}
