//! Clear command for removing every entry.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;

use super::entries_label;
use crate::Config;
use crate::store::open_store;

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm that all entries should be deleted.
    #[arg(long)]
    pub yes: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ClearArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    if store.is_empty() {
        writeln!(writer, "No entries to clear.")?;
        return Ok(());
    }
    if !args.yes {
        bail!(
            "refusing to delete {} without --yes",
            entries_label(store.len())
        );
    }

    let removed = store.clear()?;
    tracing::info!(removed, "cleared entries");
    writeln!(writer, "Cleared {}", entries_label(removed))?;
    Ok(())
}
