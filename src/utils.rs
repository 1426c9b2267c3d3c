use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::{ArtistSummary, Credentials, FlatRow, TrackSummary};

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Flattens one track of an artist into a table row.
///
/// Pure function: the inputs are only borrowed and identical inputs always
/// yield identical rows. The duration is rendered as `M:SS` and the raw
/// millisecond value does not survive into the row.
pub fn to_row(artist: &ArtistSummary, track: &TrackSummary) -> FlatRow {
    FlatRow {
        artist_id: artist.id.clone(),
        artist_name: artist.name.clone(),
        artist_popularity: artist.popularity,
        song_id: track.id.clone(),
        song_name: track.name.clone(),
        song_popularity: track.popularity,
        duration_min_sec: format_duration(track.duration_ms),
    }
}

/// Formats milliseconds as `minutes:seconds`.
///
/// Uses floor division and never rounds up; minutes are not rolled over into
/// hours, so one hour renders as `60:00`.
///
/// ```
/// assert_eq!(format_duration(125_000), "2:05");
/// ```
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / MS_PER_MINUTE;
    let seconds = (duration_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{minutes}:{seconds:02}")
}

/// Parses a `M:SS` duration back into whole seconds.
pub fn duration_to_seconds(duration: &str) -> Option<u64> {
    let (minutes, seconds) = duration.split_once(':')?;
    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds: u64 = seconds.trim().parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(minutes * 60 + seconds)
}

/// Value of the `Authorization` header for the client-credentials grant.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair.as_bytes()))
}

/// Horizontal bar for a 0-100 popularity value, one block per 4 points.
pub fn popularity_bar(popularity: f64) -> String {
    let blocks = (popularity.clamp(0.0, 100.0) / 4.0).round() as usize;
    "█".repeat(blocks)
}

/// Sorts rows by song popularity, most popular first. Ties keep API order.
pub fn sort_by_song_popularity(rows: &mut [FlatRow]) {
    rows.sort_by(|a, b| b.song_popularity.cmp(&a.song_popularity));
}
