// RMM inventory API HTTP client
//
// Wraps `reqwest::Client` with bearer-token auth, collection URL
// construction, and `{"data": [...]}` envelope unwrapping. All methods
// return the unwrapped `data` payload -- callers never see the envelope.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::raw::{RawAlert, RawComponent, RawDevice, RawSite};
use crate::transport::TransportConfig;

/// The two credential values the hosted API requires.
///
/// Only the key travels on the wire (as a bearer token); the secret is
/// part of the account pair and both must be present before any call
/// is attempted.
#[derive(Clone)]
pub struct Credentials {
    pub key: SecretString,
    pub secret: SecretString,
}

impl Credentials {
    /// Assemble credentials from two optional values.
    ///
    /// Returns `None` unless *both* are present -- a half-configured
    /// pair is treated the same as no configuration at all.
    pub fn from_parts(key: Option<SecretString>, secret: Option<SecretString>) -> Option<Self> {
        match (key, secret) {
            (Some(key), Some(secret)) => Some(Self { key, secret }),
            _ => None,
        }
    }
}

/// Query parameters merged onto a collection GET.
pub type Params<'a> = [(&'a str, String)];

/// Async client for the RMM inventory API.
///
/// Read-only: issues single authenticated GETs and never mutates
/// anything. A client without credentials is *unconfigured* and fails
/// every call fast with [`Error::MissingCredentials`], making no
/// network attempt.
#[derive(Debug)]
pub struct RmmClient {
    /// `None` when credentials were absent at construction.
    http: Option<reqwest::Client>,
    base_url: Url,
}

impl RmmClient {
    /// Build a client for `base_url` (e.g. `https://rmm.example.net/api/v2`).
    ///
    /// With `credentials: None` the client is unconfigured -- see the
    /// type-level docs.
    pub fn new(
        base_url: Url,
        credentials: Option<&Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = match credentials {
            Some(creds) => {
                let mut headers = HeaderMap::new();
                let token = format!("Bearer {}", creds.key.expose_secret());
                let mut value =
                    HeaderValue::from_str(&token).map_err(|_| Error::InvalidApiKey)?;
                value.set_sensitive(true);
                headers.insert(reqwest::header::AUTHORIZATION, value);
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                Some(transport.build_client(headers)?)
            }
            None => None,
        };

        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: Url, http: reqwest::Client) -> Self {
        Self {
            http: Some(http),
            base_url,
        }
    }

    /// `true` when credentials were supplied at construction.
    pub fn is_configured(&self) -> bool {
        self.http.is_some()
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET {base}/sites`
    pub async fn list_sites(&self, params: &Params<'_>) -> Result<Vec<RawSite>, Error> {
        self.get_collection("sites", params).await
    }

    /// `GET {base}/devices`
    pub async fn list_devices(&self, params: &Params<'_>) -> Result<Vec<RawDevice>, Error> {
        self.get_collection("devices", params).await
    }

    /// `GET {base}/alerts`
    pub async fn list_alerts(&self, params: &Params<'_>) -> Result<Vec<RawAlert>, Error> {
        self.get_collection("alerts", params).await
    }

    /// `GET {base}/devices/{uid}/components`
    ///
    /// The component payload does not carry the owning device uid; the
    /// normalizer injects it from context.
    pub async fn list_device_components(
        &self,
        device_uid: &str,
    ) -> Result<Vec<RawComponent>, Error> {
        self.get_collection(&format!("devices/{device_uid}/components"), &[])
            .await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Build a full URL for a collection path under the base.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Single authenticated GET, envelope unwrapped.
    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params<'_>,
    ) -> Result<Vec<T>, Error> {
        let Some(http) = self.http.as_ref() else {
            return Err(Error::MissingCredentials);
        };

        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = http.get(url).query(params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Collection<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        Ok(envelope.data)
    }
}

/// Standard response envelope: `{"data": [...]}`.
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Collection<T> {
    #[serde(default)]
    data: Vec<T>,
}
