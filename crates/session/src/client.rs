//! HTTP implementation of the [`AuthApi`] seam.
//!
//! Requests that act on a session attach `Authorization: Bearer <credential>`;
//! when no valid credential exists the header is omitted entirely, never sent
//! empty. A `401` from any endpoint tears the local session down through
//! [`SessionStore::clear`] — the transport boundary reacts, but the store
//! stays the only writer of the persisted records.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use zurura_auth::SessionUser;

use crate::api::{
    ApiError, AuthApi, AuthResponse, LoginRequest, OperatorRegisterRequest, ProfileUpdate,
    RegisterRequest,
};
use crate::store::SessionStore;

/// Auth API client over reqwest.
#[derive(Clone)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl HttpAuthApi {
    /// `base_url` is the API root, e.g. `https://api.zurura.app/api/v1`.
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        credential: Option<&str>,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url).json(body);
        if let Some(token) = credential {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "server rejected the credential; clearing local session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        credential: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.dispatch(method, path, body, credential).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::InvalidBody(err.to_string()))
    }

    /// Pull a human-readable message out of an error body, falling back to
    /// the status line.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let fallback = format!("request failed with status {status}");
        match response.json::<Value>().await {
            Ok(body) => body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or(fallback),
            Err(_) => fallback,
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/login", request, None).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/register", request, None).await
    }

    async fn register_operator(
        &self,
        request: &OperatorRegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/register/op", request, None).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.dispatch(Method::POST, "/auth/logout", &Value::Object(Default::default()), Some(token))
            .await
            .map(|_| ())
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<SessionUser, ApiError> {
        #[derive(serde::Deserialize)]
        struct Envelope {
            user: SessionUser,
        }

        let envelope: Envelope = self
            .request(Method::PUT, "/auth/profile", update, Some(token))
            .await?;
        Ok(envelope.user)
    }

    async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "current_password": current_password,
            "new_password": new_password,
        });
        self.dispatch(Method::POST, "/auth/password/change", &body, Some(token))
            .await
            .map(|_| ())
    }
}
