//! Source connection settings.
//!
//! Plain data only; file/env layering lives in the CLI. Credentials
//! are held as [`SecretString`] so they never land in debug output or
//! logs.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use fleetwatch_api::{Credentials, Error, RmmClient, TransportConfig};

use crate::sync::{DEFAULT_COMPONENT_WORKERS, FallbackPolicy};

/// Everything needed to reach one RMM source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: Url,
    pub api_key: Option<SecretString>,
    pub api_secret: Option<SecretString>,
    pub timeout: Duration,
    pub fallback: FallbackPolicy,
    pub component_workers: usize,
}

impl SourceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            api_secret: None,
            timeout: TransportConfig::default().timeout,
            fallback: FallbackPolicy::default(),
            component_workers: DEFAULT_COMPONENT_WORKERS,
        }
    }

    /// The credential pair, present only when both halves are set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.api_key.clone(), self.api_secret.clone())
    }

    /// Build the API client. With an incomplete credential pair the
    /// client is unconfigured and fails every call fast.
    pub fn build_client(&self) -> Result<RmmClient, Error> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        RmmClient::new(
            self.base_url.clone(),
            self.credentials().as_ref(),
            &transport,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        "https://rmm.example.net/api/v2".parse().expect("valid url")
    }

    #[test]
    fn half_configured_credentials_count_as_none() {
        let mut config = SourceConfig::new(base());
        config.api_key = Some("key".into());
        assert!(config.credentials().is_none());

        config.api_secret = Some("secret".into());
        assert!(config.credentials().is_some());
    }

    #[test]
    fn client_without_credentials_is_unconfigured() {
        let config = SourceConfig::new(base());
        let client = config.build_client().expect("client builds");
        assert!(!client.is_configured());
    }
}
