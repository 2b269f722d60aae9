//! Session orchestrator: sign-in/sign-out flows over a small state machine.
//!
//! `Unauthenticated → Pending → { Authenticated | Unauthenticated + error }`.
//! Logout always reaches `Unauthenticated`, even when the remote revoke call
//! fails; being signed out locally is never blocked on the network.

use zurura_auth::{Role, SessionUser};

use crate::api::{
    ApiError, AuthApi, AuthResponse, FlowError, LoginRequest, OperatorRegisterRequest,
    ProfileUpdate, RegisterRequest, validate_auth_response,
};
use crate::store::SessionStore;

/// Where the UI layer should navigate after a flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    CommuterHome,
    OperatorHome,
    DriverHome,
    SignIn,
}

/// Observable state of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Pending,
    Authenticated,
}

/// The stateful front door: runs auth flows, delegates persistence to the
/// session store, and keeps the phase/error pair the UI renders from.
pub struct SessionService<A: AuthApi> {
    api: A,
    session: SessionStore,
    phase: SessionPhase,
    error: Option<String>,
}

impl<A: AuthApi> SessionService<A> {
    /// Picks up an existing persisted session, if a valid one is present.
    pub fn new(api: A, session: SessionStore) -> Self {
        let phase = if session.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        };

        Self {
            api,
            session,
            phase,
            error: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Human-readable message of the last failed flow, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The session store this service writes through. Route guards and
    /// screens consult it directly for `is_authenticated`/`can`.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sign in. On success the session is persisted before the phase flips to
    /// `Authenticated`, and the destination follows the user's role.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<Destination, FlowError> {
        self.begin();
        let outcome = self.api.login(credentials).await.map_err(FlowError::from);
        self.finish_sign_in(outcome, Self::home_for)
    }

    /// Register a commuter account; lands on the commuter home screen.
    pub async fn register(&mut self, data: &RegisterRequest) -> Result<Destination, FlowError> {
        self.begin();
        let outcome = self.api.register(data).await.map_err(FlowError::from);
        self.finish_sign_in(outcome, |_| Destination::CommuterHome)
    }

    /// Register an operator account; lands on the operator home screen.
    pub async fn register_as_operator(
        &mut self,
        data: &OperatorRegisterRequest,
    ) -> Result<Destination, FlowError> {
        self.begin();
        let outcome = self.api.register_operator(data).await.map_err(FlowError::from);
        self.finish_sign_in(outcome, |_| Destination::OperatorHome)
    }

    /// Sign out. The remote revoke is best-effort; the local teardown is not.
    pub async fn logout(&mut self) -> Destination {
        self.begin();

        if let Some(token) = self.session.get_valid_token() {
            if let Err(err) = self.api.logout(&token).await {
                tracing::warn!(error = %err, "remote sign-out failed; clearing the local session anyway");
            }
        }

        self.session.clear();
        self.phase = SessionPhase::Unauthenticated;
        Destination::SignIn
    }

    /// Re-write the stored user record while keeping the same credential.
    ///
    /// The phase is left alone: a profile edit is not a sign-in transition.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<SessionUser, FlowError> {
        let Some(token) = self.session.get_valid_token() else {
            let err = ApiError::Unauthorized;
            self.error = Some(err.to_string());
            return Err(err.into());
        };

        match self.api.update_profile(&token, update).await {
            Ok(updated) => {
                let merged = match self.session.current_user() {
                    Some(current) => current.merged(&updated),
                    None => updated,
                };
                self.session.store(&token, &merged);
                Ok(merged)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Change the account password. No session records change.
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), FlowError> {
        let Some(token) = self.session.get_valid_token() else {
            let err = ApiError::Unauthorized;
            self.error = Some(err.to_string());
            return Err(err.into());
        };

        self.api
            .change_password(&token, current_password, new_password)
            .await
            .map_err(|err| {
                self.error = Some(err.to_string());
                FlowError::from(err)
            })
    }

    /// Reset only the error slot.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin(&mut self) {
        self.phase = SessionPhase::Pending;
        self.error = None;
    }

    /// Post-login destination: operators and drivers have their own home
    /// screens, everyone else (including admins) lands on the commuter home.
    fn home_for(user: &SessionUser) -> Destination {
        match user.effective_role() {
            Some(Role::Operator) => Destination::OperatorHome,
            Some(Role::Driver) => Destination::DriverHome,
            _ => Destination::CommuterHome,
        }
    }

    fn finish_sign_in(
        &mut self,
        outcome: Result<AuthResponse, FlowError>,
        destination: impl FnOnce(&SessionUser) -> Destination,
    ) -> Result<Destination, FlowError> {
        let response = match outcome.and_then(|response| {
            validate_auth_response(&response)?;
            Ok(response)
        }) {
            Ok(response) => response,
            Err(err) => {
                self.phase = SessionPhase::Unauthenticated;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        // Persistence completes before the phase flips.
        self.session.store(&response.token, &response.user);
        self.phase = SessionPhase::Authenticated;
        Ok(destination(&response.user))
    }
}
