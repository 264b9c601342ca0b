//! Error types for entry validation and the entry store.

use thiserror::Error;

use crate::clock::{MinuteOfDay, TimeError};
use crate::duration::DurationPolicy;
use crate::types::ValidationError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A submission or edit that cannot become a stored entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// End is not strictly after the effective start.
    #[error("end time {end} must be after start time {start} ({policy} policy)")]
    NonPositiveDuration {
        start: MinuteOfDay,
        end: MinuteOfDay,
        policy: DurationPolicy,
    },
}

/// Entry store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// No entry with the given ID.
    #[error("entry not found: {id}")]
    NotFound { id: String },

    /// The stored collection could not be read or decoded.
    #[error("failed to read stored entries from {key}")]
    StorageRead {
        key: String,
        #[source]
        source: BoxError,
    },

    /// The collection could not be written back; nothing was changed.
    #[error("failed to persist entries to {key}")]
    StorageWrite {
        key: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub(crate) fn storage_read(source: impl Into<BoxError>) -> Self {
        Self::StorageRead {
            key: crate::store::STORAGE_KEY.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn storage_write(source: impl Into<BoxError>) -> Self {
        Self::StorageWrite {
            key: crate::store::STORAGE_KEY.to_string(),
            source: source.into(),
        }
    }
}

impl From<TimeError> for StoreError {
    fn from(err: TimeError) -> Self {
        Self::Entry(err.into())
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Entry(err.into())
    }
}
