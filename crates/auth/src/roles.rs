//! Effective roles recognized by the permission table.

use serde::{Deserialize, Serialize};

/// Effective role of a session user.
///
/// The wire value is an open string; this enum is what the decision table
/// keys on after folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Commuter,
    Operator,
    Driver,
    Admin,
}

impl Role {
    /// Fold a raw role claim into an effective role.
    ///
    /// An absent role, `"user"`, and `"commuter"` are all treated as
    /// `Commuter` — the issuing server uses the three interchangeably for
    /// rider accounts, and this client preserves that conflation. Any other
    /// unrecognized value folds to `None`, which denies everything.
    pub fn effective(raw: Option<&str>) -> Option<Role> {
        match raw {
            None | Some("user") | Some("commuter") => Some(Role::Commuter),
            Some("operator") => Some(Role::Operator),
            Some("driver") => Some(Role::Driver),
            Some("admin") => Some(Role::Admin),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Commuter => "commuter",
            Role::Operator => "operator",
            Role::Driver => "driver",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_user_and_commuter_fold_together() {
        assert_eq!(Role::effective(None), Some(Role::Commuter));
        assert_eq!(Role::effective(Some("user")), Some(Role::Commuter));
        assert_eq!(Role::effective(Some("commuter")), Some(Role::Commuter));
    }

    #[test]
    fn named_roles_map_exactly() {
        assert_eq!(Role::effective(Some("operator")), Some(Role::Operator));
        assert_eq!(Role::effective(Some("driver")), Some(Role::Driver));
        assert_eq!(Role::effective(Some("admin")), Some(Role::Admin));
    }

    #[test]
    fn unknown_roles_fold_to_none() {
        assert_eq!(Role::effective(Some("superuser")), None);
        assert_eq!(Role::effective(Some("")), None);
        assert_eq!(Role::effective(Some("Operator")), None);
    }
}
