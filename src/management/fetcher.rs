use crate::{
    config::Config,
    error::{Error, Result},
    spotify::{self, CatalogClient, SpotifyAuth, SpotifyCatalog, TokenProvider},
    types::{ArtistSummary, Credentials, ResultSet},
    utils,
};

/// What happened to one name of a batch fetch.
#[derive(Debug)]
pub enum ArtistOutcome {
    /// The name resolved to `artist` and `tracks` rows were added.
    Fetched { artist: String, tracks: usize },
    /// The search matched no artist; nothing was added.
    NotFound,
    /// Token, search or top-tracks request failed; nothing was added.
    Failed(Error),
}

impl ArtistOutcome {
    pub fn is_fetched(&self) -> bool {
        matches!(self, ArtistOutcome::Fetched { .. })
    }
}

/// Result of a batch fetch: the aggregated rows plus one outcome per input name.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: ResultSet,
    pub outcomes: Vec<(String, ArtistOutcome)>,
}

impl BatchReport {
    pub fn fetched(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_fetched()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.fetched()
    }

    /// True when at least one name was attempted and every attempt failed
    /// with [`Error::Auth`], i.e. the credentials themselves are unusable.
    pub fn all_rejected(&self) -> bool {
        !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|(_, o)| matches!(o, ArtistOutcome::Failed(Error::Auth(_))))
    }
}

/// Drives token acquisition, artist lookup and normalization.
///
/// Holds the credentials and market explicitly; there is no process-wide
/// state. A fresh token is requested for every [`fetch_one`](Self::fetch_one),
/// which keeps expiry handling out of the picture at the price of one extra
/// round trip per artist.
pub struct CatalogFetcher<A = SpotifyAuth, C = SpotifyCatalog> {
    auth: A,
    catalog: C,
    credentials: Credentials,
    market: String,
}

impl CatalogFetcher {
    /// Builds a fetcher talking to the Spotify endpoints named in `config`.
    ///
    /// Both clients share one HTTP client configured with the request timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = spotify::http_client(config.http_timeout)?;
        Ok(Self::new(
            SpotifyAuth::new(client.clone(), config.token_url.clone()),
            SpotifyCatalog::new(client, config.api_url.clone()),
            config.credentials.clone(),
            config.market.clone(),
        ))
    }
}

impl<A: TokenProvider, C: CatalogClient> CatalogFetcher<A, C> {
    pub fn new(auth: A, catalog: C, credentials: Credentials, market: impl Into<String>) -> Self {
        Self {
            auth,
            catalog,
            credentials,
            market: market.into(),
        }
    }

    /// Fetches the top tracks of one artist as flat rows.
    ///
    /// The name is resolved through the catalog search and the top hit is used.
    /// Rows keep the order in which the API ranked the tracks.
    ///
    /// # Returns
    ///
    /// An empty result set when no artist matches `name` (or `name` is blank).
    ///
    /// # Errors
    ///
    /// Auth and transport errors of any of the three requests are propagated.
    pub fn fetch_one(&self, name: &str) -> Result<ResultSet> {
        Ok(self
            .lookup(name)?
            .map(|(_, rows)| rows)
            .unwrap_or_default())
    }

    /// Fetches several artists one after another and concatenates their rows.
    ///
    /// Never fails: a name that cannot be resolved or fetched is logged and
    /// skipped, the remaining names are still attempted. Rows of earlier names
    /// precede rows of later names.
    pub fn fetch_many<S: AsRef<str>>(&self, names: &[S]) -> ResultSet {
        self.fetch_many_report(names, |_, _| {}).rows
    }

    /// Like [`fetch_many`](Self::fetch_many) but keeps the per-name outcomes.
    ///
    /// `on_outcome` is called after each name, in input order.
    pub fn fetch_many_report<S, F>(&self, names: &[S], mut on_outcome: F) -> BatchReport
    where
        S: AsRef<str>,
        F: FnMut(&str, &ArtistOutcome),
    {
        let mut report = BatchReport::default();

        for name in names {
            let name = name.as_ref();
            let outcome = match self.lookup(name) {
                Ok(Some((artist, rows))) => {
                    let outcome = ArtistOutcome::Fetched {
                        artist: artist.name,
                        tracks: rows.len(),
                    };
                    report.rows.extend(rows);
                    outcome
                }
                Ok(None) => {
                    log::warn!("No artist with this name exists: {name}");
                    ArtistOutcome::NotFound
                }
                Err(e) => {
                    log::warn!("Skipping artist {name}: {e}");
                    ArtistOutcome::Failed(e)
                }
            };

            on_outcome(name, &outcome);
            report.outcomes.push((name.to_string(), outcome));
        }

        log::info!(
            "Fetched {} of {} artists, {} rows",
            report.fetched(),
            report.outcomes.len(),
            report.rows.len()
        );
        report
    }

    fn lookup(&self, name: &str) -> Result<Option<(ArtistSummary, ResultSet)>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let token = self.auth.acquire_token(&self.credentials)?;
        let artist = match self.catalog.find_artist(&token, name)? {
            Some(artist) => artist,
            None => return Ok(None),
        };
        log::debug!("Resolved '{name}' to {} ({})", artist.name, artist.id);

        let tracks = self.catalog.top_tracks(&token, &artist.id, &self.market)?;
        let rows = tracks
            .iter()
            .map(|track| utils::to_row(&artist, track))
            .collect();

        Ok(Some((artist, rows)))
    }
}
