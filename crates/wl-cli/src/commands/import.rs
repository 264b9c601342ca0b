//! Import command for bringing in entries saved by the old browser widgets.
//!
//! Accepts a JSON array dump in either legacy layout. Records that fail
//! validation are reported and skipped; entries whose IDs already exist are
//! left alone.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use wl_core::legacy::{LegacyImport, decode_legacy};

use super::entries_label;
use crate::Config;
use crate::store::open_store;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the JSON dump.
    pub file: PathBuf,
}

pub fn run<W: Write>(writer: &mut W, args: &ImportArgs, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut store = open_store(config)?;
    let LegacyImport { entries, skipped } = decode_legacy(&text, store.config().policy)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let offered = entries.len();
    let added = store.import(entries)?;
    let duplicates = offered - added;
    tracing::info!(added, duplicates, invalid = skipped.len(), "imported legacy entries");

    writeln!(writer, "Imported {}", entries_label(added))?;
    if duplicates > 0 {
        writeln!(writer, "Skipped {duplicates} already present")?;
    }
    for record in &skipped {
        writeln!(writer, "Skipped record {}: {}", record.index, record.reason)?;
    }
    Ok(())
}
