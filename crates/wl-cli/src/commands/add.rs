//! Add command for recording a finished interval.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use wl_core::{EntryDate, MinuteOfDay, NewEntry};

use super::span_summary;
use crate::Config;
use crate::store::{open_store, today};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// End time (`5:30 PM` or `17:30`).
    #[arg(long)]
    pub end: MinuteOfDay,

    /// What the time was spent on.
    #[arg(long = "desc")]
    pub description: String,

    /// Date of the entry (`YYYY-MM-DD`). Defaults to today.
    #[arg(long)]
    pub date: Option<EntryDate>,

    /// Start time. Defaults to where the day's latest entry ended.
    #[arg(long)]
    pub start: Option<MinuteOfDay>,
}

pub fn run<W: Write>(writer: &mut W, args: &AddArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let date = args.date.unwrap_or_else(today);
    let start = args.start.unwrap_or_else(|| store.next_start(date));

    let entry = store.add(NewEntry {
        date,
        start,
        end: args.end,
        description: args.description.clone(),
    })?;
    tracing::info!(id = %entry.id(), "added entry");

    writeln!(writer, "Added {} {}", entry.id().short(), span_summary(entry))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::store::test_support::{config_at, redact_ids, seed};

    fn args(date: &str, start: Option<&str>, end: &str, description: &str) -> AddArgs {
        AddArgs {
            end: end.parse().unwrap(),
            description: description.to_string(),
            date: Some(date.parse().unwrap()),
            start: start.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn add_records_entry() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());

        let mut output = Vec::new();
        run(
            &mut output,
            &args("2024-01-01", Some("9:00 AM"), "10:30 AM", "  standup  "),
            &config,
        )
        .unwrap();

        let store = open_store(&config).unwrap();
        assert_eq!(store.len(), 1);
        let entry = &store.entries()[0];
        assert_eq!(entry.description(), "standup");

        let output = redact_ids(&String::from_utf8(output).unwrap(), &[entry]);
        assert_snapshot!(output, @"Added [ID] 2024-01-01 9:00 AM - 10:30 AM (1h 30m)");
    }

    #[test]
    fn add_defaults_start_to_previous_end() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        seed(&config, "2024-01-01", "09:00", "10:15", "first");

        let mut output = Vec::new();
        run(&mut output, &args("2024-01-01", None, "11:00", "second"), &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("2024-01-01 10:15 AM - 11:00 AM (0h 45m)"));
    }

    #[test]
    fn add_defaults_start_to_configured_default() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            default_start: "8:00 AM".to_string(),
            ..config_at(temp.path())
        };

        let mut output = Vec::new();
        run(&mut output, &args("2024-01-01", None, "08:45", "early"), &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("8:00 AM - 8:45 AM (0h 45m)"));
    }

    #[test]
    fn add_rejects_end_before_start() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());

        let mut output = Vec::new();
        let err = run(
            &mut output,
            &args("2024-01-01", Some("10:00"), "09:00", "backwards"),
            &config,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "end time 9:00 AM must be after start time 10:00 AM (clamped policy)"
        );
        assert!(open_store(&config).unwrap().is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn add_crosses_midnight_under_wrap_policy() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            duration_policy: wl_core::DurationPolicy::Wrap,
            ..config_at(temp.path())
        };

        let mut output = Vec::new();
        run(
            &mut output,
            &args("2024-01-01", Some("11:00 PM"), "1:00 AM", "deploy"),
            &config,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("11:00 PM - 1:00 AM (2h 00m)"));
    }

    #[test]
    fn add_rejects_blank_description() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());

        let mut output = Vec::new();
        let err = run(
            &mut output,
            &args("2024-01-01", Some("09:00"), "10:00", "   "),
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("description"));
    }
}
