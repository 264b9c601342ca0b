//! Next command for showing where the next entry would start.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use wl_core::EntryDate;

use crate::Config;
use crate::store::{open_store, today};

#[derive(Debug, Args)]
pub struct NextArgs {
    /// Date to look at (`YYYY-MM-DD`). Defaults to today.
    #[arg(long)]
    pub date: Option<EntryDate>,
}

pub fn run<W: Write>(writer: &mut W, args: &NextArgs, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let date = args.date.unwrap_or_else(today);
    let start = store.next_start(date);
    writeln!(writer, "Next start for {date}: {start}")?;
    Ok(())
}
