//! Identity collaborator boundary.
//!
//! The core never authenticates anyone itself; a hosting layer brings
//! its own [`IdentityProvider`]. Provider responses are normalized to
//! one shape here — [`SignInOutcome`] — regardless of how the backing
//! service structures success and failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::error::CoreError;

/// An authenticated principal.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Tokens issued on a successful sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Normalized sign-in result. Invalid credentials are a `Denied`
/// value, not an error; [`CoreError`] is reserved for the provider
/// being unreachable.
#[derive(Debug)]
pub enum SignInOutcome {
    Authenticated {
        identity: Identity,
        session: Session,
    },
    Denied {
        message: String,
    },
}

impl SignInOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// External identity service contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Check a bearer token. `Ok(None)` means the token is invalid or
    /// expired; an error means the provider could not be asked.
    async fn verify_token(&self, token: &str) -> Result<Option<Identity>, CoreError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome, CoreError>;
}
