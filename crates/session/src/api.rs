//! Wire contract of the remote auth endpoints, and the seam they sit behind.
//!
//! Two failure families are kept deliberately distinct: [`ApiError`] is the
//! transport/server side (network failure, non-2xx, 401 teardown), while
//! [`FlowError::InvalidResponse`] marks a *structurally* unusable success
//! response — a body without a usable token or user must never be stored, and
//! is a hard failure even though the HTTP call succeeded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zurura_auth::SessionUser;

// ─────────────────────────────────────────────────────────────────────────────
// Requests / responses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub school_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorRegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

/// Partial profile update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Successful login/register body: `{ token, user }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

/// A token shorter than this cannot be a real three-segment credential.
const MIN_TOKEN_LEN: usize = 10;

/// Reject a structurally unusable auth response before anything is stored.
pub fn validate_auth_response(response: &AuthResponse) -> Result<(), FlowError> {
    if response.token.len() < MIN_TOKEN_LEN {
        return Err(FlowError::InvalidResponse("token missing or too short"));
    }
    if response.user.id.is_empty() || response.user.email.is_empty() {
        return Err(FlowError::InvalidResponse("user record missing id or email"));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Remote-call failure, as surfaced by an [`AuthApi`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the credential. The transport layer has already
    /// torn the local session down; the UI should head to sign-in.
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Non-2xx response with whatever message could be mined from the body.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout, ...).
    #[error("network failure: {0}")]
    Transport(String),

    /// 2xx response whose body could not be read as the expected shape.
    #[error("malformed response body: {0}")]
    InvalidBody(String),
}

/// Failure of an orchestrated auth flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The server answered success but the body is unusable; nothing was
    /// stored.
    #[error("invalid auth response: {0}")]
    InvalidResponse(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),
}

// ─────────────────────────────────────────────────────────────────────────────
// The remote seam
// ─────────────────────────────────────────────────────────────────────────────

/// Remote auth endpoints as the orchestrator sees them.
///
/// Implemented over HTTP by [`crate::HttpAuthApi`]; tests substitute a mock.
/// Methods that act on an existing session take the credential explicitly —
/// the orchestrator resolves it through the session store first.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    async fn register_operator(
        &self,
        request: &OperatorRegisterRequest,
    ) -> Result<AuthResponse, ApiError>;

    /// Revoke the credential server-side (blacklist).
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<SessionUser, ApiError>;

    async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;
}
