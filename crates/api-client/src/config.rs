//! Configuration for the Rotaly API client
//!
//! The backend is reachable only when both the project URL and the anonymous
//! key are present. Anything less is a valid configuration that selects the
//! degraded path: reads return empty lists and writes return nothing.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Project URL variable
pub const URL_VAR: &str = "SUPABASE_URL";
/// Anonymous key variable
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Public-prefixed fallbacks shared with the web front-end
const PUBLIC_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
const PUBLIC_ANON_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";
/// Optional request timeout in seconds
const TIMEOUT_VAR: &str = "ROTALY_TIMEOUT_SECS";

/// PostgREST mount point below the project URL
pub const REST_PREFIX: &str = "/rest/v1";

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Supabase project URL, e.g. `https://abc.supabase.co`
    pub url: Option<String>,
    /// Anonymous API key, sent as `apikey` and as the bearer token
    pub anon_key: Option<String>,
    /// Request timeout; `None` leaves the transport default in place
    #[serde(default, with = "secs_serde")]
    pub timeout: Option<Duration>,
}

mod secs_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SUPABASE_URL` (or `NEXT_PUBLIC_SUPABASE_URL`): project URL
    /// - `SUPABASE_ANON_KEY` (or `NEXT_PUBLIC_SUPABASE_ANON_KEY`): anonymous key
    /// - `ROTALY_TIMEOUT_SECS`: request timeout in seconds (optional)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = non_empty(URL_VAR).or_else(|| non_empty(PUBLIC_URL_VAR));
        let anon_key = non_empty(ANON_KEY_VAR).or_else(|| non_empty(PUBLIC_ANON_KEY_VAR));
        let timeout = non_empty(TIMEOUT_VAR)
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs);

        Self {
            url,
            anon_key,
            timeout,
        }
    }

    /// Configuration pointing at a specific project
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::default().with_url(url).with_anon_key(anon_key)
    }

    /// Builder-style method to set the project URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder-style method to set the anonymous key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether both the project URL and the anonymous key are present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.url) && present(&self.anon_key)
    }

    /// Base URL of the REST API, when configured
    #[must_use]
    pub fn rest_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("{}{REST_PREFIX}", u.trim_end_matches('/')))
    }

    /// Validate the configuration
    ///
    /// An absent URL or key is accepted; only values that are present but
    /// unusable are rejected.
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config("url must start with http:// or https://"));
            }
            url::Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

/// Whether the process environment carries both backend credentials
///
/// Pure apart from reading the environment; safe to call as often as needed.
#[must_use]
pub fn is_api_configured() -> bool {
    ClientConfig::from_env().is_configured()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_is_unconfigured_but_valid() {
        let config = ClientConfig::default();
        assert!(!config.is_configured());
        assert!(config.rest_url().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_values_required() {
        let only_url =
            ClientConfig::from_lookup(lookup_from(&[(URL_VAR, "https://x.supabase.co")]));
        assert!(!only_url.is_configured());

        let only_key = ClientConfig::from_lookup(lookup_from(&[(ANON_KEY_VAR, "anon")]));
        assert!(!only_key.is_configured());

        let both = ClientConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://x.supabase.co"),
            (ANON_KEY_VAR, "anon"),
        ]));
        assert!(both.is_configured());
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://x.supabase.co"),
            (ANON_KEY_VAR, "   "),
        ]));
        assert!(!config.is_configured());
    }

    #[test]
    fn test_public_fallbacks() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://pub.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "pub-anon"),
            (TIMEOUT_VAR, "15"),
        ]));
        assert!(config.is_configured());
        assert_eq!(config.url.as_deref(), Some("https://pub.supabase.co"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_rest_url_trims_trailing_slash() {
        let config = ClientConfig::new("https://x.supabase.co/", "anon");
        assert_eq!(
            config.rest_url().as_deref(),
            Some("https://x.supabase.co/rest/v1")
        );
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("ftp://x", "anon").validate().is_err());
        assert!(
            ClientConfig::new("https://x.supabase.co", "anon")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_serde_round_trip_keeps_timeout() {
        let config = ClientConfig::new("https://x.supabase.co", "anon")
            .with_timeout(Duration::from_secs(20));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"timeout\":20"));
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
