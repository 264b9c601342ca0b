//! List command for showing entries with their total.
//!
//! Entries are shown for one date (today by default) or for every date with
//! `--all`, ordered by date then start time.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use wl_core::{Entry, EntryDate, format_duration};

use super::entries_label;
use crate::Config;
use crate::store::{open_store, today};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show entries for this date (`YYYY-MM-DD`). Defaults to today.
    #[arg(long, conflicts_with = "all")]
    pub date: Option<EntryDate>,

    /// Show entries for every date.
    #[arg(long)]
    pub all: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EntryJson<'a> {
    id: &'a str,
    date: String,
    start: String,
    end: String,
    start_minutes: u16,
    end_minutes: u16,
    duration_minutes: u32,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct ListJson<'a> {
    date: Option<String>,
    total_minutes: u64,
    total: String,
    entries: Vec<EntryJson<'a>>,
}

impl<'a> From<&'a Entry> for EntryJson<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id().as_str(),
            date: entry.date().to_string(),
            start: entry.start().to_24h_string(),
            end: entry.end().to_24h_string(),
            start_minutes: entry.start().minutes(),
            end_minutes: entry.end().minutes(),
            duration_minutes: entry.cached_duration(),
            description: entry.description(),
        }
    }
}

const ROW_INDENT: usize = 8 + 2 + 10 + 2 + 8 + 2 + 8 + 2 + 8 + 2;

pub fn run<W: Write>(writer: &mut W, args: &ListArgs, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let filter = if args.all {
        None
    } else {
        Some(args.date.unwrap_or_else(today))
    };

    let entries = store.list_filtered(filter);
    let total = store.total_minutes(entries.iter().copied());
    tracing::debug!(count = entries.len(), total, "listing entries");

    if args.json {
        let json = ListJson {
            date: filter.map(|date| date.to_string()),
            total_minutes: total,
            total: format_duration(total),
            entries: entries.iter().copied().map(EntryJson::from).collect(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    write_table(writer, &entries, total)
}

fn write_table<W: Write>(writer: &mut W, entries: &[&Entry], total: u64) -> Result<()> {
    if entries.is_empty() {
        writeln!(writer, "No entries.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<8}  {:<10}  {:<8}  {:<8}  {:<8}  DESCRIPTION",
        "ID", "DATE", "START", "END", "DURATION"
    )?;
    for entry in entries {
        let mut lines = entry.description_lines();
        let row = format!(
            "{:<8}  {:<10}  {:<8}  {:<8}  {:<8}  {}",
            entry.id().short(),
            entry.date(),
            entry.start(),
            entry.end(),
            format_duration(u64::from(entry.cached_duration())),
            lines.next().unwrap_or_default()
        );
        writeln!(writer, "{}", row.trim_end())?;
        for line in lines {
            writeln!(writer, "{:ROW_INDENT$}{}", "", line.trim_end())?;
        }
    }
    writeln!(
        writer,
        "Total: {} ({})",
        format_duration(total),
        entries_label(entries.len())
    )?;
    Ok(())
}
