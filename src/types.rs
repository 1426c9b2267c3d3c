use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

// keeps the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub popularity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub duration_ms: u64,
}

/// One track joined with the artist it was fetched for.
///
/// Artist fields are repeated on every row of the same artist, the table this
/// ends up in is a single flat table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_popularity: u32,
    pub song_id: String,
    pub song_name: String,
    pub song_popularity: u32,
    pub duration_min_sec: String,
}

/// Rows in API response order unless a caller re-sorts them.
pub type ResultSet = Vec<FlatRow>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub artists: Option<ArtistsContainer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    #[serde(default)]
    pub items: Vec<ArtistSummary>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<TrackSummary>,
}

/// Error object the Web API embeds in a response body,
/// e.g. `{"error": {"status": 401, "message": "The access token expired"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

/// Error body of the accounts service,
/// e.g. `{"error": "invalid_client", "error_description": "Invalid client"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub song: String,
    pub popularity: u32,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct ArtistLengthRow {
    pub artist: String,
    pub popularity: u32,
    #[tabled(rename = "avg song length (s)", display = "display_seconds")]
    pub avg_song_length_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct ArtistPopularityRow {
    pub artist: String,
    #[tabled(display = "display_popularity")]
    pub popularity: f64,
    #[tabled(rename = "")]
    pub bar: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SongPopularityRow {
    pub artist: String,
    #[tabled(rename = "avg song popularity", display = "display_popularity")]
    pub avg_song_popularity: f64,
    #[tabled(rename = "")]
    pub bar: String,
}

fn display_seconds(value: &f64) -> String {
    format!("{value:.0}")
}

fn display_popularity(value: &f64) -> String {
    format!("{value:.1}")
}
