//! # Spotify Integration Module
//!
//! Blocking client for the parts of the Spotify Web API this tool needs:
//!
//! ```text
//! CLI / CatalogFetcher
//!          ↓
//! TokenProvider  (client-credentials grant, accounts service)
//! CatalogClient  (artist search, artist top tracks)
//!          ↓
//! reqwest::blocking
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the client-credentials grant: the client id and secret are
//! sent base64-encoded in a `Basic` authorization header and exchanged for a
//! short-lived bearer token. No user is involved and no refresh token exists,
//! so a new token is simply requested whenever one is needed.
//!
//! ## Catalog
//!
//! [`artists`] resolves a free-text artist name through the search endpoint
//! (`limit=1`, the top hit wins) and lists the top tracks of an artist for a
//! market.
//!
//! ## Errors
//!
//! The Web API does not always signal a rejected token through the status
//! line alone; it embeds `{"error": {"status": 401, ...}}` in the body. Every
//! response body is therefore classified by [`parse_api_response`]:
//! - `401`/`403` in the status or the embedded error → [`Error::Auth`]
//! - any other error status or an unparsable body → [`Error::Transport`]
//!
//! Nothing is retried. A request that fails is final for that call.
//!
//! ## Seams
//!
//! The orchestration layer only depends on the [`TokenProvider`] and
//! [`CatalogClient`] traits, so it can be driven by in-memory fakes in tests.

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use serde::de::DeserializeOwned;

use crate::{
    error::{Error, Result},
    types::{ApiErrorResponse, ArtistSummary, Credentials, Token, TrackSummary},
};

pub mod artists;
pub mod auth;

pub use artists::SpotifyCatalog;
pub use auth::SpotifyAuth;

/// Exchanges client credentials for a bearer token.
pub trait TokenProvider {
    /// Performs one round trip to the token endpoint. Never cached.
    fn acquire_token(&self, credentials: &Credentials) -> Result<Token>;
}

/// Read access to the artist catalog.
pub trait CatalogClient {
    /// Resolves `name` to the top-ranked artist, `None` when the search is empty.
    fn find_artist(&self, token: &Token, name: &str) -> Result<Option<ArtistSummary>>;

    /// Lists the artist's top tracks available in `market`, in the order the
    /// API ranks them.
    fn top_tracks(
        &self,
        token: &Token,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TrackSummary>>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for &T {
    fn acquire_token(&self, credentials: &Credentials) -> Result<Token> {
        (**self).acquire_token(credentials)
    }
}

impl<T: CatalogClient + ?Sized> CatalogClient for &T {
    fn find_artist(&self, token: &Token, name: &str) -> Result<Option<ArtistSummary>> {
        (**self).find_artist(token, name)
    }

    fn top_tracks(
        &self,
        token: &Token,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TrackSummary>> {
        (**self).top_tracks(token, artist_id, market)
    }
}

/// Builds the blocking HTTP client shared by the auth and catalog clients.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::from)
}

/// Classifies a Web API response and deserializes the success payload.
pub fn parse_api_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(body) {
        return Err(classify(
            api_error.error.status,
            format!(
                "API returned {}: {}",
                api_error.error.status, api_error.error.message
            ),
        ));
    }

    if !status.is_success() {
        return Err(classify(status.as_u16(), format!("API returned {status}")));
    }

    serde_json::from_str::<T>(body).map_err(Error::from)
}

fn classify(status: u16, message: String) -> Error {
    match status {
        401 | 403 => Error::Auth(message),
        _ => Error::Transport(message),
    }
}
