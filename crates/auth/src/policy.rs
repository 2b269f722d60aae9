//! Static role × resource × operation decision table.
//!
//! The table is compiled in and never mutated at runtime. Any (role, resource,
//! operation) triple it does not name is denied — default-deny is the only
//! fallback behavior here. Whether the caller is authenticated at all is the
//! session store's concern; this module is a pure function of role.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Resources gated by the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Route,
    Booking,
    Vehicle,
    Stop,
}

/// Operations on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    View,
    Create,
    Update,
    Delete,
}

const ALL: &[Operation] = &[
    Operation::View,
    Operation::Create,
    Operation::Update,
    Operation::Delete,
];
const VIEW: &[Operation] = &[Operation::View];
const VIEW_CREATE: &[Operation] = &[Operation::View, Operation::Create];
const VIEW_UPDATE: &[Operation] = &[Operation::View, Operation::Update];

/// Operations `role` may perform on `resource`.
pub fn allowed_operations(role: Role, resource: Resource) -> &'static [Operation] {
    match (role, resource) {
        (Role::Admin, _) => ALL,

        (Role::Operator, Resource::Route) => ALL,
        (Role::Operator, Resource::Vehicle) => ALL,
        (Role::Operator, Resource::Stop) => ALL,
        (Role::Operator, Resource::Booking) => VIEW,

        (Role::Commuter, Resource::Booking) => VIEW_CREATE,
        (Role::Commuter, _) => VIEW,

        (Role::Driver, Resource::Booking) => VIEW_UPDATE,
        (Role::Driver, _) => VIEW,
    }
}

/// Whether `role` may perform `operation` on `resource`.
pub fn role_allows(role: Role, resource: Resource, operation: Operation) -> bool {
    allowed_operations(role, resource).contains(&operation)
}
