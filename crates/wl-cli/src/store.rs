//! Opening the entry store for one command invocation.

use std::ops::{Deref, DerefMut};

use anyhow::{Context, Result, bail};
use chrono::Local;
use wl_core::{EntryDate, EntryId, EntryStore};
use wl_db::Database;

use crate::Config;
use crate::lock::StoreLock;

/// The entry store plus the lock that guards it.
///
/// Field order matters: the store is dropped before the lock is released.
pub struct LockedStore {
    store: EntryStore<Database>,
    _lock: StoreLock,
}

impl Deref for LockedStore {
    type Target = EntryStore<Database>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl DerefMut for LockedStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Locks, opens and loads the configured database, ensuring its directory exists.
pub fn open_store(config: &Config) -> Result<LockedStore> {
    let store_config = config.store_config()?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let lock = StoreLock::acquire(&config.database_path)?;
    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let store = EntryStore::load(db, store_config);

    if store.was_reset() {
        eprintln!(
            "warning: stored entries in {} could not be read; starting from an empty worklog",
            config.database_path.display()
        );
    }

    Ok(LockedStore { store, _lock: lock })
}

/// Resolves a full entry ID or a unique prefix of one.
pub fn resolve_id<S>(store: &EntryStore<S>, text: &str) -> Result<EntryId> {
    let text = text.trim();
    if text.is_empty() {
        bail!("entry ID cannot be empty");
    }

    let matches: Vec<&EntryId> = store
        .entries()
        .iter()
        .map(wl_core::Entry::id)
        .filter(|id| id.as_str().starts_with(text))
        .collect();

    if let Some(exact) = matches.iter().find(|id| id.as_str() == text) {
        return Ok((*exact).clone());
    }
    match matches.as_slice() {
        [] => bail!("entry not found: {text}"),
        [only] => Ok((*only).clone()),
        _ => bail!("ambiguous entry ID {text}: matches {} entries", matches.len()),
    }
}

/// Today's local calendar date.
pub fn today() -> EntryDate {
    EntryDate::from_naive(Local::now().date_naive())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    use wl_core::{Entry, NewEntry};

    #[test]
    fn open_store_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("nested/dir/worklog.db"),
            ..Config::default()
        };

        let store = open_store(&config).unwrap();
        assert!(store.is_empty());
        assert!(config.database_path.exists());
    }

    #[test]
    fn open_store_rejects_bad_default_start() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            default_start: "noon".to_string(),
            ..config_at(temp.path())
        };
        assert!(open_store(&config).is_err());
    }

    #[test]
    fn resolve_id_accepts_unique_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        let entry = seed(&config, "2024-01-01", "09:00", "10:00", "first");

        let store = open_store(&config).unwrap();
        let prefix = &entry.id().as_str()[..6];
        assert_eq!(&resolve_id(&store, prefix).unwrap(), entry.id());
        assert_eq!(&resolve_id(&store, entry.id().as_str()).unwrap(), entry.id());
    }

    #[test]
    fn resolve_id_reports_missing_and_empty() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        seed(&config, "2024-01-01", "09:00", "10:00", "first");

        let store = open_store(&config).unwrap();
        let err = resolve_id(&store, "zzzz").unwrap_err();
        assert_eq!(err.to_string(), "entry not found: zzzz");
        assert!(resolve_id(&store, "  ").is_err());
    }

    #[test]
    fn resolve_id_rejects_ambiguous_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(temp.path());
        let mut store = open_store(&config).unwrap();

        let policy = store.config().policy;
        let entries = ["abc1", "abc2", "abc"]
            .into_iter()
            .map(|id| {
                Entry::create(
                    EntryId::new(id).unwrap(),
                    NewEntry {
                        date: "2024-01-01".parse().unwrap(),
                        start: "09:00".parse().unwrap(),
                        end: "10:00".parse().unwrap(),
                        description: id.to_string(),
                    },
                    policy,
                )
                .unwrap()
            })
            .collect();
        store.import(entries).unwrap();

        let err = resolve_id(&store, "ab").unwrap_err();
        assert_eq!(err.to_string(), "ambiguous entry ID ab: matches 3 entries");
        assert_eq!(resolve_id(&store, "abc").unwrap().as_str(), "abc");
        assert_eq!(resolve_id(&store, "abc2").unwrap().as_str(), "abc2");
    }
}
