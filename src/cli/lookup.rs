use colored::Colorize;
use tabled::Table;

use crate::{
    cli::spinner,
    config::Config,
    error, info,
    management::CatalogFetcher,
    types::{FlatRow, TrackTableRow},
    utils, warning,
};

/// Shows the top tracks of a single artist, most popular first.
///
/// The name goes through the catalog search, so the heading shows the artist
/// name as Spotify spells it. No match is an informational message, and any
/// fetch error is printed without terminating the program.
pub fn lookup(config: &Config, name: &str) {
    if name.trim().is_empty() {
        info!("Please enter an artist's name to see their most popular songs.");
        return;
    }

    let fetcher = match CatalogFetcher::from_config(config) {
        Ok(f) => f,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let pb = spinner(&format!("Looking up {name}..."));
    let result = fetcher.fetch_one(name);
    pb.finish_and_clear();

    let mut rows = match result {
        Ok(rows) => rows,
        Err(e) => {
            warning!("An error occurred: {}", e);
            return;
        }
    };

    if rows.is_empty() {
        info!("No data found for the given artist.");
        return;
    }

    utils::sort_by_song_popularity(&mut rows);
    let artist_name = rows[0].artist_name.clone();

    println!("{}", format!("Top Songs by {artist_name}").green().bold());
    println!("{}", Table::new(table_rows(rows)));
}

fn table_rows(rows: Vec<FlatRow>) -> Vec<TrackTableRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, r)| TrackTableRow {
            rank: i + 1,
            song: r.song_name,
            popularity: r.song_popularity,
            duration: r.duration_min_sec,
        })
        .collect()
}
