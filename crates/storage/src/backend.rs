//! Raw key-value backend abstraction.

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

/// Backend-level storage failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend refused the write (quota, readonly mode, ...).
    #[error("storage write failed for key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// The backend is not usable at all.
    #[error("storage backend unavailable")]
    Unavailable,
}

/// A flat string-to-string store, the shape browser storage exposes.
///
/// Reads are infallible by contract: a backend that cannot read reports the
/// key as missing. Only writes surface an error, and callers above this
/// boundary degrade it to a logged `false`.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str);

    /// Every key currently present. Used to enumerate namespaced keys when
    /// clearing, rather than assuming a fixed set.
    fn keys(&self) -> Vec<String>;
}

/// In-memory backend, the default for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // A poisoned map is still a map; storage must keep degrading
            // softly instead of propagating a panic.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.entries().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_delete() {
        let backend = MemoryBackend::new();
        assert!(backend.write("k", "v").is_ok());
        assert_eq!(backend.read("k").as_deref(), Some("v"));

        backend.delete("k");
        assert_eq!(backend.read("k"), None);
    }

    #[test]
    fn keys_lists_everything() {
        let backend = MemoryBackend::new();
        backend.write("a", "1").unwrap();
        backend.write("b", "2").unwrap();
        assert_eq!(backend.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
