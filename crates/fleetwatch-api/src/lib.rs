//! Async client for the hosted RMM inventory API.
//!
//! The API exposes read-only collections (`sites`, `devices`, `alerts`,
//! `devices/{uid}/components`) behind bearer-token auth, every response
//! wrapped in a `{"data": [...]}` envelope. [`RmmClient`] unwraps the
//! envelope and returns raw records; `fleetwatch-core` normalizes them
//! into canonical domain types.
//!
//! A client built without both credential values is *unconfigured*:
//! every call fails fast with [`Error::MissingCredentials`] and no
//! network attempt is made. The [`sample`] module holds the documented
//! fallback dataset callers may substitute in that case.

pub mod client;
pub mod error;
pub mod raw;
pub mod sample;
pub mod transport;

pub use client::{Credentials, RmmClient};
pub use error::Error;
pub use raw::{RawAlert, RawComponent, RawDevice, RawSite};
pub use transport::TransportConfig;
