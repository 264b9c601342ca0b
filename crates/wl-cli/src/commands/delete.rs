//! Delete command for removing a single entry.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::span_summary;
use crate::Config;
use crate::store::{open_store, resolve_id};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Entry ID, or a unique prefix of one.
    pub id: String,
}

pub fn run<W: Write>(writer: &mut W, args: &DeleteArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let id = resolve_id(&store, &args.id)?;
    let removed = store.delete(&id)?;
    tracing::info!(id = %removed.id(), "deleted entry");

    writeln!(writer, "Deleted {} {}", removed.id().short(), span_summary(&removed))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::store::test_support::{config_at, redact_ids, seed};

    #[test]
    fn delete_removes_entry() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        let gone = seed(&config, "2024-01-01", "09:00", "09:45", "gone");
        let kept = seed(&config, "2024-01-02", "09:00", "10:00", "kept");

        let mut output = Vec::new();
        let args = DeleteArgs {
            id: gone.id().to_string(),
        };
        run(&mut output, &args, &config).unwrap();

        let store = open_store(&config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(kept.id()).is_some());

        let output = redact_ids(&String::from_utf8(output).unwrap(), &[&gone]);
        assert_snapshot!(output, @"Deleted [ID] 2024-01-01 9:00 AM - 9:45 AM (0h 45m)");
    }

    #[test]
    fn deleting_only_entry_resets_next_start() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        let only = seed(&config, "2024-01-01", "13:00", "14:00", "only");

        let mut output = Vec::new();
        let args = DeleteArgs {
            id: only.id().to_string(),
        };
        run(&mut output, &args, &config).unwrap();

        let store = open_store(&config).unwrap();
        let next = store.next_start("2024-01-01".parse().unwrap());
        assert_eq!(next.to_string(), "9:00 AM");
    }

    #[test]
    fn delete_reports_unknown_id() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());

        let mut output = Vec::new();
        let args = DeleteArgs {
            id: "missing".to_string(),
        };
        let err = run(&mut output, &args, &config).unwrap_err();
        assert_eq!(err.to_string(), "entry not found: missing");
    }
}
