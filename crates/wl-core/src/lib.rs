//! Core domain logic for worklog.
//!
//! This crate contains:
//! - Clock: converting 12/24-hour clock readings to and from minutes of day
//! - Duration: the clamped/wrap duration policies and `{h}h {mm}m` formatting
//! - Store: the owned, persisted collection of entries and its queries
//! - Legacy: explicit import of the old browser widget layouts

pub mod clock;
pub mod duration;
mod entry;
mod error;
pub mod legacy;
mod slot;
pub mod store;
pub mod types;

pub use clock::{
    DEFAULT_START, MINUTES_PER_DAY, Meridiem, MinuteOfDay, TimeError, format_minutes_of_day,
    parse_clock_time, parse_clock_time_24,
};
pub use duration::{
    DurationPolicy, HoursMinutes, compute_duration, format_duration,
    minutes_to_hours_and_minutes,
};
pub use entry::{Entry, EntryPatch, NewEntry};
pub use error::{EntryError, StoreError};
pub use slot::{KeyValueSlot, MemorySlot, WriteRejected};
pub use store::{EntryStore, STORAGE_KEY, StoreConfig, total_minutes};
pub use types::{EntryDate, EntryId, ValidationError};
