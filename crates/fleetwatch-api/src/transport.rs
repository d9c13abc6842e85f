// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("fleetwatch/", env!("CARGO_PKG_VERSION"));

/// Transport settings shared by every API call.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    ///
    /// Used by [`RmmClient`](crate::RmmClient) to inject the
    /// `Authorization` header on every request.
    pub fn build_client(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
