use crate::{
    cli::spinner,
    config::{Config, DEFAULT_ARTISTS},
    error,
    management::{ArtistOutcome, CatalogFetcher, TableStore, WriteMode},
    success, warning,
};

/// Fetches the top tracks of a list of artists and stores them in the table.
///
/// Artists are fetched strictly one after another in the given order. When no
/// names are passed the built-in artist list is used. A name that cannot be
/// fetched is reported and skipped; it never aborts the run.
///
/// # Arguments
///
/// * `config` - Loaded configuration (credentials, database, table)
/// * `names` - Artist names as typed by the user
/// * `append` - Append to the table instead of replacing it
///
/// # Storage
///
/// With the default replace mode the table is dropped and recreated with the
/// rows of this run only. When every artist failed because the credentials
/// were rejected, the table is left untouched.
pub fn fetch(config: &Config, names: Vec<String>, append: bool) {
    let names: Vec<String> = if names.is_empty() {
        DEFAULT_ARTISTS.iter().map(|n| n.to_string()).collect()
    } else {
        names
    };

    let fetcher = match CatalogFetcher::from_config(config) {
        Ok(f) => f,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let pb = spinner(&format!("Fetching {} artists...", names.len()));
    let total = names.len();
    let mut done = 0;
    let report = fetcher.fetch_many_report(&names, |name, outcome| {
        done += 1;
        match outcome {
            ArtistOutcome::Fetched { artist, tracks } => pb.set_message(format!(
                "[{done}/{total}] {artist}: {tracks} tracks"
            )),
            _ => pb.set_message(format!("[{done}/{total}] {name}: skipped")),
        }
    });
    pb.finish_and_clear();

    for (name, outcome) in &report.outcomes {
        match outcome {
            ArtistOutcome::Fetched { .. } => {}
            ArtistOutcome::NotFound => warning!("No artist with this name exists: {}", name),
            ArtistOutcome::Failed(e) => warning!("An error occurred for artist {}: {}", name, e),
        }
    }

    if report.rows.is_empty() {
        warning!("No rows were retrieved.");
    }

    let mode = if append {
        WriteMode::Append
    } else {
        WriteMode::Replace
    };

    if mode == WriteMode::Replace && report.all_rejected() {
        warning!(
            "Spotify rejected the credentials for every artist, {} was left unchanged.",
            config.table
        );
        return;
    }

    let mut store = match TableStore::open(&config.database) {
        Ok(s) => s,
        Err(e) => error!("Cannot open database {}. Err: {}", config.database.display(), e),
    };

    match store.write(&report.rows, &config.table, mode) {
        Ok(count) => success!(
            "Fetched {}/{} artists, stored {} rows in {}.",
            report.fetched(),
            report.outcomes.len(),
            count,
            config.table
        ),
        Err(e) => error!("Failed to store rows in {}. Err: {}", config.table, e),
    }
}
