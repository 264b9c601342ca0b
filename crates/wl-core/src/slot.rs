//! Durable key-value slot the entry store persists into.

use std::collections::HashMap;

use thiserror::Error;

/// A synchronous string key-value store.
///
/// Implementations must make `set` durable before returning `Ok`.
pub trait KeyValueSlot {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the stored text, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replaces the text stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueSlot + ?Sized> KeyValueSlot for &mut S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}

/// Write rejected by a [`MemorySlot`] configured to fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("write rejected for key {key}")]
pub struct WriteRejected {
    pub key: String,
}

/// In-memory slot, mainly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    reject_writes: bool,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-populated with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }

    /// Makes every subsequent `set` fail, like a full quota.
    pub const fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Returns the raw stored text for a key.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueSlot for MemorySlot {
    type Error = WriteRejected;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(WriteRejected {
                key: key.to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
