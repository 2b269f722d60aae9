//! Session user profile as issued by the auth endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Role;

/// The user record that travels with a credential.
///
/// `id` and `email` are the only fields the client requires; everything else
/// is optional and server-owned. Unknown fields round-trip through `extra` so
/// a newer server does not lose data on a profile re-write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Raw role as issued; fold with [`Role::effective`] before deciding
    /// anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Effective role of this user (commuter-default fold).
    pub fn effective_role(&self) -> Option<Role> {
        Role::effective(self.role.as_deref())
    }

    /// Overlay `update` on top of this record, field by field.
    ///
    /// Fields the update does not carry keep their current value; extra
    /// fields are merged key-wise with the update winning.
    pub fn merged(&self, update: &SessionUser) -> SessionUser {
        let mut extra = self.extra.clone();
        for (key, value) in &update.extra {
            extra.insert(key.clone(), value.clone());
        }

        SessionUser {
            id: if update.id.is_empty() { self.id.clone() } else { update.id.clone() },
            email: if update.email.is_empty() { self.email.clone() } else { update.email.clone() },
            first_name: update.first_name.clone().or_else(|| self.first_name.clone()),
            last_name: update.last_name.clone().or_else(|| self.last_name.clone()),
            role: update.role.clone().or_else(|| self.role.clone()),
            school_name: update.school_name.clone().or_else(|| self.school_name.clone()),
            company: update.company.clone().or_else(|| self.company.clone()),
            extra,
        }
    }
}
