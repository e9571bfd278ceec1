//! Desktop configuration resolved from the environment.

use stickies_core::util::normalize_text_option;

/// Endpoints and public keys needed to reach the managed backends.
///
/// These are safe-to-ship public values; secret credentials never live here.
/// The config is constructed once in the root component and passed down as a
/// value, never held in process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopConfig {
    /// GraphQL endpoint of the managed note data API
    pub data_api_url: Option<String>,
    /// Base URL of the hosted identity service
    pub identity_url: Option<String>,
    /// Public client key for the identity service
    pub identity_client_key: Option<String>,
}

impl DesktopConfig {
    /// Read the config from `STICKIES_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_api_url: normalize_text_option(std::env::var("STICKIES_DATA_API_URL").ok()),
            identity_url: normalize_text_option(std::env::var("STICKIES_IDENTITY_URL").ok()),
            identity_client_key: normalize_text_option(
                std::env::var("STICKIES_IDENTITY_CLIENT_KEY").ok(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_endpoints() {
        let config = DesktopConfig::default();
        assert_eq!(config.data_api_url, None);
        assert_eq!(config.identity_url, None);
        assert_eq!(config.identity_client_key, None);
    }
}
