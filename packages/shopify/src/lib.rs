//! Typed bindings for the Shopify Admin REST API.
//!
//! This library provides type definitions for API resources and a thin typed
//! facade over each resource family. The facades perform no I/O themselves;
//! they delegate every request to a [`Transport`]. Types are always
//! available, while the HTTP implementation of [`Transport`] is gated behind
//! the `client` feature.
//!
//! ## Use of `#[non_exhaustive]`
//!
//! We use `#[non_exhaustive]` on structs to prevent users manually
//! constructing the types while still allowing their fields to be `pub` for
//! reading and modification. Construct the types either by:
//! - Using builder methods
//! - Using `Default`
//! - Using deserialization

use derive_more::Debug;
use serde::{Deserialize, Serialize};

pub mod carrier;
pub mod transport;

mod de;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::Client;
pub use transport::Transport;

/// An Admin API access token.
///
/// The token is redacted from `Debug` output; use [`AccessToken::expose`]
/// when it actually needs to be sent.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
#[debug("AccessToken(..)")]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// View the raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl<S: Into<String>> From<S> for AccessToken {
    fn from(token: S) -> Self {
        Self::new(token)
    }
}
