//! API credentials.

use std::fmt;

use crate::config::constants::{
    ENV_LEGACY_API_ID, ENV_LEGACY_API_SECRET, ENV_NEW_API_KEY, ENV_ORG_ID,
};
use crate::error_handling::ConfigError;

/// Credentials for both search APIs.
///
/// Built once at startup and handed to the
/// [`Comparator`](crate::compare::Comparator); request code never reads the
/// environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    /// Legacy API id (basic auth user)
    pub legacy_api_id: String,
    /// Legacy API secret (basic auth password)
    pub legacy_api_secret: String,
    /// New API personal access token (bearer)
    pub new_api_key: String,
    /// Optional organization id sent to the new API
    pub organization_id: Option<String>,
}

impl ApiCredentials {
    /// Reads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` naming the first required
    /// variable that is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads credentials through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(key))
        };

        Ok(Self {
            legacy_api_id: required(ENV_LEGACY_API_ID)?,
            legacy_api_secret: required(ENV_LEGACY_API_SECRET)?,
            new_api_key: required(ENV_NEW_API_KEY)?,
            organization_id: lookup(ENV_ORG_ID)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("legacy_api_id", &self.legacy_api_id)
            .field("legacy_api_secret", &"<redacted>")
            .field("new_api_key", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .finish()
    }
}
