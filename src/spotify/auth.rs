use chrono::Utc;
use reqwest::{StatusCode, blocking::Client, header::AUTHORIZATION};

use crate::{
    error::{Error, Result},
    spotify::TokenProvider,
    types::{AuthErrorResponse, Credentials, Token, TokenResponse},
    utils,
};

/// Client-credentials token provider backed by the Spotify accounts service.
pub struct SpotifyAuth {
    client: Client,
    token_url: String,
}

impl SpotifyAuth {
    pub fn new(client: Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }
}

impl TokenProvider for SpotifyAuth {
    /// Requests a new access token using the client-credentials grant.
    ///
    /// The client id and secret are joined with a colon, base64-encoded and sent
    /// as a `Basic` authorization header. The form body only carries
    /// `grant_type=client_credentials`.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the request itself fails (connection, timeout)
    /// - [`Error::Auth`] if the credentials are rejected or the response is not
    ///   a token payload
    fn acquire_token(&self, credentials: &Credentials) -> Result<Token> {
        log::debug!("Requesting client-credentials token from {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, utils::basic_auth_header(credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let token = parse_token_response(status, &body, Utc::now().timestamp() as u64)?;

        log::debug!(
            "Obtained {} token valid for {}s",
            token.token_type,
            token.expires_in
        );
        Ok(token)
    }
}

/// Turns the token endpoint response into a [`Token`] stamped with `obtained_at`.
pub fn parse_token_response(status: StatusCode, body: &str, obtained_at: u64) -> Result<Token> {
    if let Ok(err) = serde_json::from_str::<AuthErrorResponse>(body) {
        let reason = match err.error_description {
            Some(description) => format!("{}: {}", err.error, description),
            None => err.error,
        };
        return Err(Error::Auth(format!("token request rejected ({status}): {reason}")));
    }

    if !status.is_success() {
        return Err(Error::Auth(format!("token request rejected ({status})")));
    }

    let payload: TokenResponse = serde_json::from_str(body)
        .map_err(|e| Error::Auth(format!("unexpected token payload: {e}")))?;

    if payload.access_token.is_empty() {
        return Err(Error::Auth("token payload without access_token".to_string()));
    }

    Ok(Token {
        access_token: payload.access_token,
        token_type: payload.token_type,
        expires_in: payload.expires_in,
        obtained_at,
    })
}
