//! CLI subcommand implementations.

pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod import;
pub mod list;
pub mod next;
pub mod status;

use wl_core::{Entry, format_duration};

/// `1 entry` / `3 entries`.
pub(crate) fn entries_label(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{count} entries")
    }
}

/// One-line summary used when reporting a change: `2024-01-01 9:00 AM - 10:30 AM (1h 30m)`.
pub(crate) fn span_summary(entry: &Entry) -> String {
    format!(
        "{} {} - {} ({})",
        entry.date(),
        entry.start(),
        entry.end(),
        format_duration(u64::from(entry.cached_duration()))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_label_pluralizes() {
        assert_eq!(entries_label(0), "0 entries");
        assert_eq!(entries_label(1), "1 entry");
        assert_eq!(entries_label(12), "12 entries");
    }
}
