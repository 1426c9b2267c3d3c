use reqwest::{StatusCode, blocking::Client};

use crate::{
    error::Result,
    spotify::{CatalogClient, parse_api_response},
    types::{ArtistSummary, SearchResponse, Token, TopTracksResponse, TrackSummary},
};

/// Catalog client for the artist search and top-tracks endpoints.
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
}

impl SpotifyCatalog {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

impl CatalogClient for SpotifyCatalog {
    /// Searches for an artist by free-text name.
    ///
    /// Sends `GET {api}/search?q={name}&type=artist&limit=1`. Spelling does not
    /// have to be exact, the search is performed remotely and the top-ranked hit
    /// is accepted as is.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(artist))` - the first search hit
    /// - `Ok(None)` - the search matched nothing
    ///
    /// # Errors
    ///
    /// [`crate::Error::Auth`] for a rejected token, [`crate::Error::Transport`]
    /// for network failures and unparsable bodies.
    fn find_artist(&self, token: &Token, name: &str) -> Result<Option<ArtistSummary>> {
        let api_url = format!("{uri}/search", uri = self.api_url);
        log::debug!("Searching artist '{name}'");

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&token.access_token)
            .query(&[("q", name), ("type", "artist"), ("limit", "1")])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        parse_search_response(status, &body)
    }

    /// Lists the top tracks of an artist.
    ///
    /// Sends `GET {api}/artists/{id}/top-tracks?market={market}` and returns the
    /// tracks in the order the API ranked them.
    fn top_tracks(
        &self,
        token: &Token,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TrackSummary>> {
        let api_url = format!(
            "{uri}/artists/{id}/top-tracks",
            uri = self.api_url,
            id = artist_id
        );
        log::debug!("Fetching top tracks of {artist_id} in market {market}");

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&token.access_token)
            .query(&[("market", market)])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        parse_top_tracks_response(status, &body)
    }
}

/// Extracts the first artist of a search response, if any.
pub fn parse_search_response(status: StatusCode, body: &str) -> Result<Option<ArtistSummary>> {
    let res: SearchResponse = parse_api_response(status, body)?;
    Ok(res.artists.and_then(|a| a.items.into_iter().next()))
}

pub fn parse_top_tracks_response(status: StatusCode, body: &str) -> Result<Vec<TrackSummary>> {
    let res: TopTracksResponse = parse_api_response(status, body)?;
    Ok(res.tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn search_takes_first_item() {
        let body = r#"{
            "artists": {
                "href": "https://api.spotify.com/v1/search?query=jungle&type=artist&offset=0&limit=1",
                "items": [
                    {
                        "id": "59oA5WbbQvomJz2BuRG071",
                        "name": "Jungle",
                        "popularity": 71,
                        "genres": ["neo soul"],
                        "type": "artist"
                    }
                ],
                "limit": 1,
                "total": 812
            }
        }"#;

        let artist = parse_search_response(StatusCode::OK, body).unwrap().unwrap();
        assert_eq!(artist.id, "59oA5WbbQvomJz2BuRG071");
        assert_eq!(artist.name, "Jungle");
        assert_eq!(artist.popularity, 71);
    }

    #[test]
    fn empty_search_is_none() {
        let body = r#"{"artists": {"items": [], "total": 0}}"#;
        assert_eq!(parse_search_response(StatusCode::OK, body).unwrap(), None);
    }

    #[test]
    fn search_without_artists_key_is_none() {
        assert_eq!(parse_search_response(StatusCode::OK, "{}").unwrap(), None);
    }

    #[test]
    fn search_with_expired_token_is_auth_error() {
        let body = r#"{"error": {"status": 401, "message": "Invalid access token"}}"#;
        let res = parse_search_response(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(res, Err(Error::Auth(_))));
    }

    #[test]
    fn top_tracks_keep_response_order() {
        let body = r#"{
            "tracks": [
                {"id": "t1", "name": "Back On 74", "popularity": 80, "duration_ms": 217000, "explicit": false},
                {"id": "t2", "name": "Casio", "popularity": 65, "duration_ms": 125000},
                {"id": "t3", "name": "Busy Earnin'", "popularity": 70, "duration_ms": 189500}
            ]
        }"#;

        let tracks = parse_top_tracks_response(StatusCode::OK, body).unwrap();
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(tracks[1].duration_ms, 125000);
    }

    #[test]
    fn top_tracks_missing_field_is_transport_error() {
        let body = r#"{"tracks": [{"id": "t1", "name": "No popularity"}]}"#;
        let res = parse_top_tracks_response(StatusCode::OK, body);
        assert!(matches!(res, Err(Error::Transport(_))));
    }
}
