//! `zurura-session` — the stateful front door of the Zurura client session
//! core.
//!
//! [`SessionStore`] owns the three persisted session records and the "valid
//! session" predicate; [`SessionService`] runs the sign-in/sign-out flows over
//! a remote [`AuthApi`] and a small state machine the UI layer renders from.
//! Route guards and screens should only ever consult `is_authenticated`,
//! `current_user`, the role predicates, and `can`.

pub mod api;
pub mod client;
pub mod service;
pub mod store;

pub use api::{
    ApiError, AuthApi, AuthResponse, FlowError, LoginRequest, OperatorRegisterRequest,
    ProfileUpdate, RegisterRequest, validate_auth_response,
};
pub use client::HttpAuthApi;
pub use service::{Destination, SessionPhase, SessionService};
pub use store::SessionStore;
