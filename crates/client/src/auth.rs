//! Sign-in, sign-out and the authenticated request path.
//!
//! The server keeps the access token in an `access_token` cookie and rotates
//! it through `POST {prefix}/auth/refresh`. [`AuthClient::auth_fetch`] retries a
//! request once after a successful refresh, and concurrent callers hitting
//! 401 at the same time share a single refresh.

use std::sync::atomic::{AtomicU64, Ordering};

use api_types::{
    auth::{AuthUser, LoginRequest, RegisterRequest},
    is_api_response,
};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{ClientError, HttpRequest, HttpResponse, Session, Transport, parse_envelope};

const AUTH_FAILED: &str = "Request failed.";

#[derive(Debug, Default)]
struct RefreshState {
    /// Number of refreshes performed so far.
    generation: u64,
    /// Outcome of the latest refresh.
    refreshed: bool,
}

#[derive(Debug)]
pub struct AuthClient<T> {
    transport: T,
    api_prefix: String,
    session: Session,
    generation: AtomicU64,
    refresh: Mutex<RefreshState>,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(transport: T, api_prefix: &str, session: Session) -> Self {
        Self {
            transport,
            api_prefix: api_prefix.trim_end_matches('/').to_string(),
            session,
            generation: AtomicU64::new(0),
            refresh: Mutex::new(RefreshState::default()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// `{prefix}/auth/{action}`.
    pub fn auth_path(&self, action: &str) -> String {
        format!("{}/auth/{}", self.api_prefix, action.trim_start_matches('/'))
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthUser, ClientError> {
        let user = self.authenticate("login", request).await?;
        tracing::info!(username = %user.username, "signed in");
        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthUser, ClientError> {
        let user = self.authenticate("register", request).await?;
        tracing::info!(username = %user.username, "registered");
        Ok(user)
    }

    /// Tells the server to drop the auth cookies and forgets the user.
    ///
    /// The server call is best effort; the local session is cleared either way.
    pub async fn sign_out(&self) {
        let request = HttpRequest::post(self.auth_path("logout"));
        match self.transport.send(&request).await {
            Ok(response) if !response.is_success() => {
                tracing::debug!(status = response.status, "logout rejected by server");
            }
            Err(err) => tracing::debug!("logout request failed: {err}"),
            Ok(_) => {}
        }
        self.session.clear().await;
        tracing::info!("signed out");
    }

    /// Rotates the auth cookies. Returns `false` (and signs out) on failure.
    pub async fn refresh(&self) -> bool {
        self.refresh_after(self.generation.load(Ordering::Acquire)).await
    }

    /// Sends `request`; on 401 refreshes once and retries once.
    ///
    /// When the refresh fails the original 401 response is returned.
    pub async fn auth_fetch(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let observed = self.generation.load(Ordering::Acquire);
        tracing::debug!(method = %request.method, path = %request.path, "request");
        let response = self.transport.send(request).await?;
        if response.status != 401 {
            return Ok(response);
        }
        if !self.refresh_after(observed).await {
            return Ok(response);
        }
        self.transport.send(request).await
    }

    /// Performs a refresh unless one already completed after the caller
    /// observed generation `observed`, in which case its outcome is reused.
    async fn refresh_after(&self, observed: u64) -> bool {
        let mut state = self.refresh.lock().await;
        if state.generation != observed {
            return state.refreshed;
        }

        let request = HttpRequest::post(self.auth_path("refresh"));
        let refreshed = match self.transport.send(&request).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                tracing::warn!(status = response.status, "token refresh rejected");
                false
            }
            Err(err) => {
                tracing::warn!("token refresh failed: {err}");
                false
            }
        };
        if !refreshed {
            self.sign_out().await;
        }

        state.generation += 1;
        state.refreshed = refreshed;
        self.generation.store(state.generation, Ordering::Release);
        refreshed
    }

    async fn authenticate<B: Serialize>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<AuthUser, ClientError> {
        let request = HttpRequest::post(self.auth_path(action)).json(body)?;
        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            return Err(ClientError::RequestFailed {
                status: response.status,
                message: auth_error_message(response.json_value().as_ref()),
            });
        }

        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        let user: AuthUser = if is_api_response(&body) {
            parse_envelope(body)?
        } else {
            serde_json::from_value(body)
                .map_err(|err| ClientError::InvalidResponse(err.to_string()))?
        };
        self.session.set(user.clone()).await;
        Ok(user)
    }
}

/// `message`, then `error`, then a generic text.
fn auth_error_message(body: Option<&Value>) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| body.and_then(|body| body.get(*key)).and_then(Value::as_str))
        .unwrap_or(AUTH_FAILED)
        .to_string()
}
