//! `zurura-auth` — pure session/authorization primitives for the Zurura client.
//!
//! This crate is intentionally decoupled from storage and transport: it knows
//! how to read a bearer credential's claims and how to answer role/permission
//! questions, nothing else. Nothing here performs IO or verifies signatures —
//! the issuing server remains the authority, this layer only avoids sending
//! requests that are doomed to fail.

pub mod claims;
pub mod policy;
pub mod roles;
pub mod user;

pub use claims::{ClaimSet, decode, is_expired, is_expired_at, remaining_lifetime,
    remaining_lifetime_at, role_of, subject_of};
pub use policy::{Operation, Resource, role_allows};
pub use roles::Role;
pub use user::SessionUser;
