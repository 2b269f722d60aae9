//! `zurura-storage` — obfuscated key-value persistence for the Zurura client.
//!
//! The browser's storage singleton becomes an injected [`StorageBackend`], so
//! everything above it can be exercised against an in-memory fake. Values are
//! reversibly transformed before they land in the backend; see
//! [`ObfuscatedStore`] for the (deliberately weak) details.

pub mod backend;
pub mod store;

pub use backend::{MemoryBackend, StorageBackend, StorageError};
pub use store::ObfuscatedStore;
