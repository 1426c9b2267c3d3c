//! Configuration management for the popularity fetcher.
//!
//! Configuration values come from environment variables, optionally seeded from
//! a `.env` file. All values are collected once into an explicit [`Config`]
//! which is handed to the constructors that need it; nothing reads the
//! environment after start-up.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::{Error, Result},
    types::Credentials,
};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_TABLE: &str = "artist_popularity";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Artists fetched by `sporpcli fetch` when no names are given.
pub const DEFAULT_ARTISTS: &[&str] = &[
    "Asake",
    "Burna-Boy",
    "Jungle",
    "Kendrick-Lamar",
    "SZA",
    "Dua-Lipa",
    "JID",
    "Teddy-Swims",
    "Bruno-Mars",
    "Lady-Gaga",
    "Coldplay",
    "Taylor-Swift",
    "Bad-Bunny",
    "The-Weeknd",
    "Billie-Eilish",
    "Ariana-Grande",
    "Drake",
    "Rihanna",
    "Ed-Sheeran",
    "Sabrina-Carpenter",
    "Justin-Bieber",
    "Eminem",
    "Kanye-West",
    "Post-Malone",
    "BTS",
    "Travis-Scott",
    "Doechii",
    "Imagine-Dragons",
    "J-Balvin",
    "Green-Day",
    "GloRilla",
    "Childish-Gambino",
    "Whitney-Houston",
    "Linkin-Park",
    "Donna-Summer",
];

/// Loads environment variables from a `.env` file.
///
/// Looks for `sporpcli/.env` inside the platform-specific local data directory
/// first and falls back to a `.env` in the working directory. Variables that are
/// already set in the process environment are never overwritten. A missing
/// file is not an error since every value can also be supplied directly.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporpcli/.env`
/// - macOS: `~/Library/Application Support/sporpcli/.env`
/// - Windows: `%LOCALAPPDATA%/sporpcli/.env`
///
/// # Returns
///
/// The path of the file that was loaded, if any.
pub fn load_env() -> Option<PathBuf> {
    let path = data_dir().join(".env");
    if path.is_file() {
        match dotenv::from_path(&path) {
            Ok(()) => {
                log::debug!("Loaded environment from {}", path.display());
                return Some(path);
            }
            Err(e) => log::warn!("Cannot read {}: {}", path.display(), e),
        }
    }

    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

/// Returns the application data directory (`<data_local_dir>/sporpcli`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporpcli");
    path
}

/// Runtime configuration for fetching and storing popularity data.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    pub token_url: String,
    /// Market code the top tracks are restricted to.
    pub market: String,
    pub database: PathBuf,
    pub table: String,
    /// Upper bound for every HTTP request.
    pub http_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the client id or secret is missing or blank,
    /// or if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this function applied to `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            value(key).ok_or_else(|| Error::Config(format!("{key} must be set and non-empty")))
        };

        let credentials = Credentials {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
        };

        let http_timeout = match value("SPORPCLI_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "SPORPCLI_HTTP_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            credentials,
            api_url: value("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: value("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            market: value("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            database: value("SPORPCLI_DATABASE")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir().join("popularity.db")),
            table: value("SPORPCLI_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            http_timeout,
        })
    }
}
