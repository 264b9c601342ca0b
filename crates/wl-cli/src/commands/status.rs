//! Status command for showing where and how entries are stored.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::entries_label;
use crate::store::open_store;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let store_config = store.config();
    let slots = store.slot().list_slots()?;

    writeln!(writer, "Worklog status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Duration policy: {}", store_config.policy)?;
    writeln!(writer, "Default start: {}", store_config.default_start)?;
    writeln!(writer, "Entries: {}", entries_label(store.len()))?;

    if slots.is_empty() {
        writeln!(writer, "Nothing stored yet.")?;
        return Ok(());
    }

    writeln!(writer, "Slots:")?;
    for slot in slots {
        writeln!(
            writer,
            "- {}: {} bytes, updated {}",
            slot.key, slot.bytes, slot.updated_at
        )?;
    }

    Ok(())
}
