//! Explicit import of entries saved by the earlier browser widgets.
//!
//! Two incompatible layouts exist, both a bare JSON array with camelCase keys:
//!
//! - minutes: `{"id", "date", "startMinutes", "endMinutes", "durationMinutes", "description"}`
//!   (stored under [`LEGACY_MINUTES_KEY`])
//! - clock text: `{"id", "date", "start": "HH:MM", "end": "HH:MM", "description"}`
//!
//! Nothing is migrated automatically. Stored legacy durations are ignored and
//! recomputed under the active policy.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::clock::{MinuteOfDay, TimeError, parse_clock_time_24};
use crate::duration::DurationPolicy;
use crate::entry::{Entry, NewEntry};
use crate::error::EntryError;
use crate::types::{EntryDate, EntryId};

/// Storage key the minutes layout was saved under.
pub const LEGACY_MINUTES_KEY: &str = "simple_time_tracker_entries_final_v2";

/// The dump as a whole could not be read.
#[derive(Debug, Error)]
#[error("legacy dump is not a JSON array: {0}")]
pub struct LegacyError(#[from] serde_json::Error);

/// Why a single legacy record was skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unrecognized record layout: {0}")]
    Layout(#[source] serde_json::Error),

    #[error(transparent)]
    Entry(#[from] EntryError),
}

#[derive(Debug)]
pub struct SkippedRecord {
    /// Position in the source array.
    pub index: usize,
    pub reason: RecordError,
}

/// Result of decoding a legacy dump.
#[derive(Debug, Default)]
pub struct LegacyImport {
    pub entries: Vec<Entry>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyRecord {
    Minutes {
        #[serde(default)]
        id: Option<Value>,
        date: String,
        #[serde(rename = "startMinutes")]
        start_minutes: i64,
        #[serde(rename = "endMinutes")]
        end_minutes: i64,
        #[serde(default)]
        description: String,
    },
    Clock {
        #[serde(default)]
        id: Option<Value>,
        date: String,
        start: String,
        end: String,
        #[serde(default)]
        description: String,
    },
}

fn legacy_id(id: Option<&Value>) -> EntryId {
    let text = match id {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    EntryId::new(text).unwrap_or_else(|_| EntryId::generate())
}

fn legacy_minute(minutes: i64) -> Result<MinuteOfDay, TimeError> {
    let value = u16::try_from(minutes).map_err(|_| TimeError::Malformed {
        value: minutes.to_string(),
    })?;
    MinuteOfDay::new(value)
}

fn convert(value: Value, policy: DurationPolicy) -> Result<Entry, RecordError> {
    let record: LegacyRecord = serde_json::from_value(value).map_err(RecordError::Layout)?;
    let (id, date, start, end, description) = match record {
        LegacyRecord::Minutes {
            id,
            date,
            start_minutes,
            end_minutes,
            description,
        } => (
            id,
            date,
            legacy_minute(start_minutes).map_err(EntryError::from)?,
            legacy_minute(end_minutes).map_err(EntryError::from)?,
            description,
        ),
        LegacyRecord::Clock {
            id,
            date,
            start,
            end,
            description,
        } => (
            id,
            date,
            parse_clock_time_24(&start).map_err(EntryError::from)?,
            parse_clock_time_24(&end).map_err(EntryError::from)?,
            description,
        ),
    };
    let date: EntryDate = date.parse().map_err(EntryError::from)?;

    let entry = Entry::create(
        legacy_id(id.as_ref()),
        NewEntry {
            date,
            start,
            end,
            description,
        },
        policy,
    )?;
    Ok(entry)
}

/// Decodes a legacy JSON array dump, skipping records that fail validation.
pub fn decode_legacy(text: &str, policy: DurationPolicy) -> Result<LegacyImport, LegacyError> {
    let records: Vec<Value> = serde_json::from_str(text)?;
    let mut import = LegacyImport::default();

    for (index, value) in records.into_iter().enumerate() {
        match convert(value, policy) {
            Ok(entry) => import.entries.push(entry),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping legacy record");
                import.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    Ok(import)
}
