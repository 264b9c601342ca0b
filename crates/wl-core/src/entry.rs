//! Tracked time entries.

use serde::{Deserialize, Serialize};

use crate::clock::MinuteOfDay;
use crate::duration::{DurationPolicy, compute_duration};
use crate::error::EntryError;
use crate::types::{EntryDate, EntryId, ValidationError};

/// A validated-on-creation submission for a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub date: EntryDate,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    pub description: String,
}

/// Replacement end time and description for an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPatch {
    pub end: MinuteOfDay,
    pub description: String,
}

/// One tracked interval with a description.
///
/// Fields are private so an entry can only come into existence through
/// [`Entry::create`] and only change through [`Entry::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    date: EntryDate,
    start_minutes: MinuteOfDay,
    end_minutes: MinuteOfDay,
    /// Cached; recomputed from start/end on load and on every mutation.
    #[serde(default)]
    duration_minutes: u32,
    description: String,
}

fn checked_duration(
    start: MinuteOfDay,
    end: MinuteOfDay,
    policy: DurationPolicy,
) -> Result<u32, EntryError> {
    match compute_duration(start, end, policy) {
        0 => Err(EntryError::NonPositiveDuration { start, end, policy }),
        minutes => Ok(minutes),
    }
}

impl Entry {
    /// Builds an entry from a submission.
    ///
    /// The description is trimmed and must not be empty; the interval must have a
    /// positive duration under `policy`.
    pub fn create(id: EntryId, new: NewEntry, policy: DurationPolicy) -> Result<Self, EntryError> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            }
            .into());
        }
        let duration_minutes = checked_duration(new.start, new.end, policy)?;

        Ok(Self {
            id,
            date: new.date,
            start_minutes: new.start,
            end_minutes: new.end,
            duration_minutes,
            description: description.to_string(),
        })
    }

    /// Applies an edit, leaving the entry untouched if it is rejected.
    pub fn apply(&mut self, patch: EntryPatch, policy: DurationPolicy) -> Result<(), EntryError> {
        let duration_minutes = checked_duration(self.start_minutes, patch.end, policy)?;
        self.end_minutes = patch.end;
        self.duration_minutes = duration_minutes;
        self.description = patch.description.trim().to_string();
        Ok(())
    }

    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    pub const fn date(&self) -> EntryDate {
        self.date
    }

    pub const fn start(&self) -> MinuteOfDay {
        self.start_minutes
    }

    pub const fn end(&self) -> MinuteOfDay {
        self.end_minutes
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description split into display lines.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.lines()
    }

    /// Duration recomputed from start/end; the source of truth.
    #[must_use]
    pub fn duration(&self, policy: DurationPolicy) -> u32 {
        compute_duration(self.start_minutes, self.end_minutes, policy)
    }

    /// The cached duration as last stored.
    pub const fn cached_duration(&self) -> u32 {
        self.duration_minutes
    }

    /// Recomputes the cached duration, returning the previous value if it drifted.
    pub(crate) fn refresh_duration(&mut self, policy: DurationPolicy) -> Option<u32> {
        let fresh = self.duration(policy);
        if fresh == self.duration_minutes {
            return None;
        }
        Some(std::mem::replace(&mut self.duration_minutes, fresh))
    }
}
