//! The entry store: an explicitly owned, persisted collection of entries.
//!
//! # Persistence
//!
//! The whole collection lives in a single [`KeyValueSlot`] key, [`STORAGE_KEY`],
//! as a versioned JSON envelope:
//!
//! ```json
//! {"schema_version": 1, "entries": [...]}
//! ```
//!
//! It is read once by [`EntryStore::load`] and rewritten in full after every
//! mutation. A failed write is reported to the caller and the in-memory change
//! is rolled back, so memory never runs ahead of what was last stored.
//!
//! # Concurrency
//!
//! Mutations take `&mut self`. Callers that share a slot across processes must
//! hold an exclusive lock from `load` until their last mutation returns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{DEFAULT_START, MinuteOfDay};
use crate::duration::DurationPolicy;
use crate::entry::{Entry, EntryPatch, NewEntry};
use crate::error::StoreError;
use crate::slot::KeyValueSlot;
use crate::types::{EntryDate, EntryId};

/// Slot key holding the serialized collection.
pub const STORAGE_KEY: &str = "worklog.entries";

/// Version written into the stored envelope.
pub const SCHEMA_VERSION: u32 = 1;

/// Store behaviour that is chosen by configuration rather than by data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub policy: DurationPolicy,
    /// Suggested start for a date with no entries yet.
    pub default_start: MinuteOfDay,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            policy: DurationPolicy::default(),
            default_start: DEFAULT_START,
        }
    }
}

/// Reasons stored text cannot be turned back into a collection.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("stored entries are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {found} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("duplicate entry ID in stored data: {id}")]
    DuplicateId { id: String },
}

#[derive(Serialize)]
struct Envelope<'a> {
    schema_version: u32,
    entries: &'a [Entry],
}

#[derive(Deserialize)]
struct StoredEnvelope {
    schema_version: u32,
    #[serde(default)]
    entries: Vec<Entry>,
}

/// Serializes a collection into the stored envelope.
pub fn encode(entries: &[Entry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        schema_version: SCHEMA_VERSION,
        entries,
    })
}

/// Parses the stored envelope, checking version and ID uniqueness.
pub fn decode(text: &str) -> Result<Vec<Entry>, DecodeError> {
    let stored: StoredEnvelope = serde_json::from_str(text)?;
    if stored.schema_version != SCHEMA_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: stored.schema_version,
        });
    }
    let mut seen = HashSet::new();
    for entry in &stored.entries {
        if !seen.insert(entry.id().as_str()) {
            return Err(DecodeError::DuplicateId {
                id: entry.id().to_string(),
            });
        }
    }
    Ok(stored.entries)
}

/// Sum of durations, recomputed from each entry's start and end.
pub fn total_minutes<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    policy: DurationPolicy,
) -> u64 {
    entries
        .into_iter()
        .map(|entry| u64::from(entry.duration(policy)))
        .sum()
}

/// An owned collection of entries bound to a durable slot.
#[derive(Debug)]
pub struct EntryStore<S> {
    slot: S,
    entries: Vec<Entry>,
    config: StoreConfig,
    reset: bool,
}

impl<S: KeyValueSlot> EntryStore<S> {
    /// Loads the collection from `slot`.
    ///
    /// Never fails: a missing key gives an empty store, and unreadable or corrupt
    /// data is logged and also gives an empty store (see [`Self::was_reset`]).
    pub fn load(slot: S, config: StoreConfig) -> Self {
        let mut store = Self {
            slot,
            entries: Vec::new(),
            config,
            reset: false,
        };

        match store.read() {
            Ok(entries) => store.entries = entries,
            Err(err) => {
                tracing::warn!(error = ?err, "stored entries unreadable, starting with an empty collection");
                store.reset = true;
            }
        }
        store.refresh_durations();
        tracing::debug!(count = store.entries.len(), policy = %config.policy, "loaded entries");
        store
    }

    fn read(&self) -> Result<Vec<Entry>, StoreError> {
        let raw = self
            .slot
            .get(STORAGE_KEY)
            .map_err(StoreError::storage_read)?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        decode(&raw).map_err(StoreError::storage_read)
    }

    fn refresh_durations(&mut self) {
        let policy = self.config.policy;
        for entry in &mut self.entries {
            if let Some(previous) = entry.refresh_duration(policy) {
                tracing::debug!(
                    id = %entry.id(),
                    previous,
                    current = entry.cached_duration(),
                    "refreshed stale duration cache"
                );
            }
            if entry.cached_duration() == 0 {
                tracing::warn!(
                    id = %entry.id(),
                    %policy,
                    "stored entry has no positive duration under the current policy"
                );
            }
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let text = encode(&self.entries).map_err(StoreError::storage_write)?;
        self.slot
            .set(STORAGE_KEY, &text)
            .map_err(StoreError::storage_write)?;
        tracing::debug!(count = self.entries.len(), bytes = text.len(), "persisted entries");
        Ok(())
    }

    /// Runs `change` and persists; on any failure the collection is restored.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<Entry>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.entries.clone();
        let result = change(&mut self.entries).and_then(|out| self.persist().map(|()| out));
        if result.is_err() {
            self.entries = snapshot;
        }
        result
    }

    fn position(&self, id: &EntryId) -> Result<usize, StoreError> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let id = EntryId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Validates a submission, assigns it an ID, appends it and persists.
    pub fn add(&mut self, new: NewEntry) -> Result<&Entry, StoreError> {
        let entry = Entry::create(self.fresh_id(), new, self.config.policy)?;
        tracing::debug!(id = %entry.id(), date = %entry.date(), "adding entry");
        let index = self.commit(|entries| {
            entries.push(entry);
            Ok(entries.len() - 1)
        })?;
        Ok(&self.entries[index])
    }

    /// Replaces the end time and description of an entry, recomputing its duration
    /// from its existing start.
    pub fn update(&mut self, id: &EntryId, patch: EntryPatch) -> Result<&Entry, StoreError> {
        let index = self.position(id)?;
        let mut updated = self.entries[index].clone();
        updated.apply(patch, self.config.policy)?;
        self.commit(|entries| {
            entries[index] = updated;
            Ok(())
        })?;
        tracing::debug!(%id, "updated entry");
        Ok(&self.entries[index])
    }

    /// Removes an entry and returns it.
    pub fn delete(&mut self, id: &EntryId) -> Result<Entry, StoreError> {
        let index = self.position(id)?;
        let removed = self.commit(|entries| Ok(entries.remove(index)))?;
        tracing::debug!(%id, "deleted entry");
        Ok(removed)
    }

    /// Removes every entry, returning how many there were.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.commit(|entries| Ok(std::mem::take(entries).len()))?;
        tracing::debug!(removed, "cleared entries");
        Ok(removed)
    }

    /// Adds already-built entries, skipping IDs that are already present.
    ///
    /// Returns how many entries were added. Persists once.
    pub fn import(&mut self, incoming: Vec<Entry>) -> Result<usize, StoreError> {
        let policy = self.config.policy;
        let mut known: HashSet<EntryId> = self.entries.iter().map(|e| e.id().clone()).collect();
        let mut fresh = Vec::new();
        for mut entry in incoming {
            if !known.insert(entry.id().clone()) {
                tracing::debug!(id = %entry.id(), "skipping entry with existing ID");
                continue;
            }
            entry.refresh_duration(policy);
            fresh.push(entry);
        }
        if fresh.is_empty() {
            return Ok(0);
        }
        self.commit(|entries| {
            let added = fresh.len();
            entries.extend(fresh);
            Ok(added)
        })
    }
}

impl<S> EntryStore<S> {
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Entries in storage order, which carries no meaning.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether `load` discarded unreadable stored data.
    pub const fn was_reset(&self) -> bool {
        self.reset
    }

    pub const fn slot(&self) -> &S {
        &self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Entries for one date (or all), ordered by date then start time.
    pub fn list_filtered(&self, date: Option<EntryDate>) -> Vec<&Entry> {
        let mut listed: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| date.is_none_or(|d| entry.date() == d))
            .collect();
        listed.sort_by_key(|entry| (entry.date(), entry.start()));
        listed
    }

    /// Total minutes across `entries` under this store's policy.
    pub fn total_minutes<'a>(&self, entries: impl IntoIterator<Item = &'a Entry>) -> u64 {
        total_minutes(entries, self.config.policy)
    }

    /// Suggested start for the next entry on `date`.
    ///
    /// This is the end of the entry with the latest start on that date, or the
    /// configured default start when the date has no entries.
    pub fn next_start(&self, date: EntryDate) -> MinuteOfDay {
        self.entries
            .iter()
            .filter(|entry| entry.date() == date)
            .max_by_key(|entry| entry.start())
            .map_or(self.config.default_start, Entry::end)
    }
}
