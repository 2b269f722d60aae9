//! Persisted session record set.
//!
//! Exactly three records live under the obfuscated store: the bearer
//! credential, the session user, and the credential's numeric expiry (stored
//! redundantly for fast inspection). They are written together by
//! [`SessionStore::store`] and cleared together by [`SessionStore::clear`];
//! no other code writes these keys.
//!
//! Expiry is evaluated lazily, at the moment of a read. There is no
//! background sweep, so a session can look valid between two reads even
//! though the credential expired in the interim; the next read corrects it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use zurura_auth::{Operation, Resource, SessionUser, claims, role_allows};
use zurura_storage::{ObfuscatedStore, StorageBackend};

const TOKEN_KEY: &str = "auth-token";
const USER_KEY: &str = "user";
const EXP_KEY: &str = "token-exp";

/// The only reader/writer of the persisted session records.
#[derive(Clone)]
pub struct SessionStore {
    store: ObfuscatedStore,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: ObfuscatedStore::new(backend),
        }
    }

    /// Persist a session: user record, credential, and (when the credential
    /// decodes) its numeric expiry.
    ///
    /// Writes are linked but best-effort, not transactional: a failed write
    /// is logged by the storage layer and the remaining records are still
    /// attempted. Nothing is stored when either argument is empty.
    pub fn store(&self, token: &str, user: &SessionUser) {
        if token.is_empty() || user.id.is_empty() {
            tracing::error!("refusing to store session: credential and user are both required");
            return;
        }

        self.store.set(USER_KEY, user);
        self.store.set(TOKEN_KEY, &token);
        if let Some(exp) = claims::decode(token).and_then(|c| c.exp) {
            self.store.set(EXP_KEY, &exp.to_string());
        }
    }

    /// The stored credential, provided it has not expired at `now`.
    ///
    /// An expired credential is cleared on sight — along with the other two
    /// records — and `None` is returned.
    pub fn get_valid_token_at(&self, now: DateTime<Utc>) -> Option<String> {
        let token: String = self.store.get(TOKEN_KEY)?;
        if claims::is_expired_at(&token, now) {
            tracing::info!("stored credential has expired; clearing session");
            self.clear();
            return None;
        }
        Some(token)
    }

    /// The stored credential, validated against the wall clock.
    pub fn get_valid_token(&self) -> Option<String> {
        self.get_valid_token_at(Utc::now())
    }

    /// The stored user record, read directly.
    ///
    /// This does not re-check credential expiry; callers needing the strict
    /// guarantee pair it with [`SessionStore::is_authenticated`].
    pub fn current_user(&self) -> Option<SessionUser> {
        self.store.get(USER_KEY)
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.get_valid_token_at(now).is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_valid_token().is_some()
    }

    /// Whether the stored user carries exactly this raw role value.
    pub fn has_role(&self, role: &str) -> bool {
        self.current_user()
            .is_some_and(|user| user.role.as_deref() == Some(role))
    }

    pub fn is_operator(&self) -> bool {
        self.has_role("operator")
    }

    pub fn is_driver(&self) -> bool {
        self.has_role("driver")
    }

    /// Commuter is the default: an absent role, `"user"`, and `"commuter"`
    /// all count.
    pub fn is_commuter(&self) -> bool {
        self.current_user()
            .is_some_and(|user| user.effective_role() == Some(zurura_auth::Role::Commuter))
    }

    /// Permission decision for the current session at `now`.
    ///
    /// Unauthenticated callers are denied unconditionally, regardless of the
    /// table. A missing user record (partially present storage) or an
    /// unrecognized role also denies — there is no session to speak for.
    pub fn can_at(&self, operation: Operation, resource: Resource, now: DateTime<Utc>) -> bool {
        if self.get_valid_token_at(now).is_none() {
            return false;
        }
        let Some(user) = self.current_user() else {
            return false;
        };
        match user.effective_role() {
            Some(role) => role_allows(role, resource, operation),
            None => false,
        }
    }

    /// Permission decision for the current session, against the wall clock.
    pub fn can(&self, operation: Operation, resource: Resource) -> bool {
        self.can_at(operation, resource, Utc::now())
    }

    /// Remove all three session records. Idempotent.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.store.remove(EXP_KEY);
    }
}
