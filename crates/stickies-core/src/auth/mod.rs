//! Hosted identity service client.
//!
//! The note UI is gated behind a live session from a managed identity
//! provider. This client covers exactly what the app consumes: sign-up
//! (possibly pending email confirmation), sign-in, session restore through a
//! pluggable persistence seam, and sign-out. Session tokens are opaque to the
//! rest of the system and never appear in `Debug` output.

use std::fmt;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{compact_text, is_http_url, unix_timestamp_now};

/// Sessions within this many seconds of expiry are treated as expired.
const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// An authenticated session as issued by the identity service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Outcome of a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The service issued a session immediately
    SignedIn(AuthSession),
    /// The service requires email confirmation before sign-in
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Identity service is not configured for this build.")]
    NotConfigured,
    #[error("Invalid identity configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Identity API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Storage seam for persisting sessions between runs.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Client for the hosted identity HTTP API.
#[derive(Clone)]
pub struct IdentityClient<S: SessionPersistence> {
    base_url: String,
    client_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> IdentityClient<S> {
    pub fn new(url: impl AsRef<str>, client_key: impl Into<String>, store: S) -> AuthResult<Self> {
        let base_url = normalize_identity_url(url.as_ref())?;
        let client_key = client_key.into().trim().to_string();
        if client_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "identity client key must not be empty",
            ));
        }

        Ok(Self {
            base_url,
            client_key,
            client: Client::builder().build()?,
            store,
        })
    }

    /// Load a persisted session, refreshing it if it has expired.
    ///
    /// A session that cannot be refreshed is cleared so the user is asked to
    /// sign in again instead of looping on a dead token.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored.is_expired() {
            return Ok(Some(stored));
        }

        match self.refresh_session(&stored.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({ "email": email, "password": password });
        let response = self
            .send(self.keyed(self.client.post(self.url("signup"))).json(&payload))
            .await?;
        match response.into_session()? {
            Some(session) => {
                self.store.save_session(&session)?;
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({ "email": email, "password": password });
        let response = self
            .send(self.keyed(self.client.post(self.url("signin"))).json(&payload))
            .await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "refresh token must not be empty",
            ));
        }

        let payload = serde_json::json!({ "refresh_token": refresh_token });
        let response = self
            .send(self.keyed(self.client.post(self.url("refresh"))).json(&payload))
            .await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Revoke the session server-side and clear the persisted copy.
    ///
    /// An already-expired token (401) still counts as a successful sign-out.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let request = self
            .keyed(self.client.post(self.url("signout")))
            .bearer_auth(access_token);

        let response = request.send().await?;
        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(render_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/v1/{operation}", self.base_url)
    }

    fn keyed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("x-client-key", &self.client_key)
    }

    async fn send(&self, request: RequestBuilder) -> AuthResult<IdentityAuthResponse> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(render_api_error(status, &body)));
        }
        Ok(response.json::<IdentityAuthResponse>().await?)
    }
}

/// Validate and normalize the identity service base URL.
pub fn normalize_identity_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "identity URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(AuthError::InvalidConfiguration(
            "identity URL must include http:// or https://",
        ));
    }
    Ok(trimmed.to_string())
}

/// Resolve optional identity config; both values present or both absent.
pub fn resolve_optional_identity_config(
    url: Option<String>,
    client_key: Option<String>,
) -> AuthResult<Option<(String, String)>> {
    let url = crate::util::normalize_text_option(url);
    let client_key = crate::util::normalize_text_option(client_key);

    match (url, client_key) {
        (None, None) => Ok(None),
        (Some(url), Some(client_key)) => Ok(Some((url, client_key))),
        _ => Err(AuthError::NotConfigured),
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct IdentityAuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<IdentityUser>,
    #[serde(default)]
    confirmation_required: bool,
}

impl IdentityAuthResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        if self.confirmation_required {
            return Ok(None);
        }

        let expires_at = self.expires_at.or_else(|| {
            self.expires_in
                .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
        });

        match (self.access_token, self.refresh_token, expires_at, self.user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user: user.into(),
                }))
            }
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
    email: Option<String>,
}

impl From<IdentityUser> for AuthUser {
    fn from(value: IdentityUser) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdentityErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

fn render_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<IdentityErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_identity_url_strips_trailing_slash() {
        let normalized = normalize_identity_url("https://id.example.com/").unwrap();
        assert_eq!(normalized, "https://id.example.com");
    }

    #[test]
    fn normalize_identity_url_rejects_bare_hosts() {
        assert!(matches!(
            normalize_identity_url("id.example.com"),
            Err(AuthError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn resolve_optional_identity_config_requires_both_values() {
        assert!(resolve_optional_identity_config(None, None)
            .unwrap()
            .is_none());
        assert!(matches!(
            resolve_optional_identity_config(Some("https://id.example.com".to_string()), None),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn confirmation_required_response_yields_no_session() {
        let response = IdentityAuthResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(IdentityUser {
                id: "user".to_string(),
                email: Some("user@example.com".to_string()),
            }),
            confirmation_required: true,
        };
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn expires_in_is_converted_to_an_absolute_timestamp() {
        let response = IdentityAuthResponse {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            expires_at: None,
            expires_in: Some(3600),
            user: Some(IdentityUser {
                id: "user".to_string(),
                email: None,
            }),
            confirmation_required: false,
        };
        let session = response.into_session().unwrap().unwrap();
        assert!(session.expires_at > unix_timestamp_now());
        assert!(!session.is_expired());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
