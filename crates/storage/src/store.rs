//! Namespaced store that obfuscates values before persisting them.
//!
//! Every value is serialized to a canonical JSON string, XORed against a
//! compiled-in key, base64-encoded, and written under `secure_<key>`.
//!
//! Known weakness, on purpose: XOR with a constant key is obfuscation, not
//! confidentiality — anyone holding the binary can reverse it. What callers
//! may rely on is only the contract: set-then-get returns the original value,
//! and missing or tampered data yields `None`/`false`, never a panic. A
//! deployment that needs real secrecy can swap the transform for authenticated
//! encryption without touching any caller.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::StorageBackend;

/// Prefix for every key this store owns. Unrelated keys in the same backend
/// are never touched, including by [`ObfuscatedStore::clear_all`].
const NAMESPACE: &str = "secure_";

/// Compiled-in obfuscation key. See the module docs before assuming anything
/// about confidentiality.
const OBFUSCATION_KEY: &[u8] = b"zurura-app-secret-key";

/// XOR against the cycled key; the transform is its own inverse.
fn transform(data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(OBFUSCATION_KEY.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

/// Obfuscating key-value store over an injected backend.
#[derive(Clone)]
pub struct ObfuscatedStore {
    backend: Arc<dyn StorageBackend>,
}

impl ObfuscatedStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn namespaced(key: &str) -> String {
        format!("{NAMESPACE}{key}")
    }

    /// Store a value. Logs and returns `false` on any failure; never panics.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        if key.is_empty() {
            tracing::error!("cannot store under an empty key");
            return false;
        }

        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to serialize value for storage");
                return false;
            }
        };

        let encoded = BASE64.encode(transform(serialized.as_bytes()));

        match self.backend.write(&Self::namespaced(key), &encoded) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "storage backend rejected write");
                false
            }
        }
    }

    /// Read a value back. `None` for a missing key or anything undecodable.
    ///
    /// If the decoded text is not valid JSON, it is offered as a bare string —
    /// so a string-shaped `T` still recovers data written raw by older code,
    /// while a structured `T` gets `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if key.is_empty() {
            tracing::error!("cannot read an empty key");
            return None;
        }

        let encoded = self.backend.read(&Self::namespaced(key))?;

        let obfuscated = match BASE64.decode(&encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value is not valid base64; dropping it");
                return None;
            }
        };

        let text = match String::from_utf8(transform(&obfuscated)) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value did not decode to text; dropping it");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(_) => T::deserialize(Value::String(text)).ok(),
        }
    }

    /// Remove one key. Missing keys are fine.
    pub fn remove(&self, key: &str) {
        if key.is_empty() {
            return;
        }
        self.backend.delete(&Self::namespaced(key));
    }

    /// Remove every key in this store's namespace, leaving the rest of the
    /// backend alone.
    pub fn clear_all(&self) {
        for key in self.backend.keys() {
            if key.starts_with(NAMESPACE) {
                self.backend.delete(&key);
            }
        }
    }
}
