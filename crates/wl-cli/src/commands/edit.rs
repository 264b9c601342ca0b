//! Edit command for changing an entry's end time and description.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use wl_core::{EntryPatch, MinuteOfDay};

use super::span_summary;
use crate::Config;
use crate::store::{open_store, resolve_id};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Entry ID, or a unique prefix of one.
    pub id: String,

    /// New end time. The start time never changes.
    #[arg(long)]
    pub end: MinuteOfDay,

    /// New description. Kept as is when omitted.
    #[arg(long = "desc")]
    pub description: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let id = resolve_id(&store, &args.id)?;

    let description = match &args.description {
        Some(description) => description.clone(),
        None => store
            .get(&id)
            .map(|entry| entry.description().to_string())
            .unwrap_or_default(),
    };

    let entry = store.update(
        &id,
        EntryPatch {
            end: args.end,
            description,
        },
    )?;
    tracing::info!(id = %entry.id(), "updated entry");

    writeln!(writer, "Updated {} {}", entry.id().short(), span_summary(entry))?;
    Ok(())
}
