//! Identity service wrapper with secure session storage.

use keyring::Entry;

use stickies_core::auth::{
    resolve_optional_identity_config, AuthResult, IdentityClient, SessionPersistence,
};
pub use stickies_core::auth::{AuthError, AuthSession, SignUpOutcome};

use crate::config::DesktopConfig;

const KEYRING_SERVICE_NAME: &str = "stickies";
const KEYRING_SESSION_USERNAME: &str = "identity_session";

/// Persists the session in the OS keychain between runs.
#[derive(Debug, Clone)]
struct KeyringSessionStore {
    service_name: String,
    username: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self {
            service_name: KEYRING_SERVICE_NAME.to_string(),
            username: KEYRING_SESSION_USERNAME.to_string(),
        }
    }
}

impl KeyringSessionStore {
    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(&self.service_name, &self.username)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&serialized)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }

    fn clear_session(&self) -> AuthResult<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }
}

/// Hosted identity client bound to the keychain session store.
#[derive(Clone)]
pub struct IdentityService {
    inner: IdentityClient<KeyringSessionStore>,
}

impl IdentityService {
    /// Build the service from desktop configuration.
    ///
    /// Returns `Ok(None)` when identity is not configured for this build.
    pub fn new_from_config(config: &DesktopConfig) -> AuthResult<Option<Self>> {
        let Some((url, client_key)) = resolve_optional_identity_config(
            config.identity_url.clone(),
            config.identity_client_key.clone(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(Self::new(url, client_key)?))
    }

    pub fn new(url: impl AsRef<str>, client_key: impl Into<String>) -> AuthResult<Self> {
        Ok(Self {
            inner: IdentityClient::new(url, client_key, KeyringSessionStore::default())?,
        })
    }

    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        self.inner.restore_session().await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        self.inner.sign_up(email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.inner.sign_in(email, password).await
    }

    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.inner.sign_out(access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_from_config_returns_none_when_values_missing() {
        let config = DesktopConfig::default();
        assert!(IdentityService::new_from_config(&config)
            .unwrap()
            .is_none());
    }
}
