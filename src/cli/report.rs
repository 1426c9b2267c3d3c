use clap::ValueEnum;
use colored::Colorize;
use tabled::Table;

use crate::{config::Config, error, info, management::TableStore, warning};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Artist popularity vs. average song length
    Length,
    /// Artist popularity
    Artists,
    /// Average song popularity by artist
    Songs,
}

/// Renders one aggregate view of the stored popularity table.
///
/// # Views
///
/// - `length` - every artist with its popularity and the average length of its
///   top tracks in seconds, most popular artist first
/// - `artists` - mean artist popularity per artist with a bar
/// - `songs` - mean song popularity per artist, alphabetical
///
/// Needs a table written by `sporpcli fetch`; a missing table is reported as a
/// warning.
pub fn report(config: &Config, view: ReportView) {
    let store = match TableStore::open(&config.database) {
        Ok(s) => s,
        Err(e) => error!("Cannot open database {}. Err: {}", config.database.display(), e),
    };

    match store.table_exists(&config.table) {
        Ok(true) => {}
        Ok(false) => {
            warning!(
                "No table {} found in {}. Run sporpcli fetch first.",
                config.table,
                config.database.display()
            );
            return;
        }
        Err(e) => error!("Cannot read {}. Err: {}", config.table, e),
    }

    let (title, table) = match view {
        ReportView::Length => (
            "Artist Popularity vs. Average Song Length",
            store.artist_song_length(&config.table).map(|r| (r.len(), Table::new(r))),
        ),
        ReportView::Artists => (
            "Artist Popularity",
            store.artist_popularity(&config.table).map(|r| (r.len(), Table::new(r))),
        ),
        ReportView::Songs => (
            "Average Song Popularity by Artist",
            store
                .song_popularity_by_artist(&config.table)
                .map(|r| (r.len(), Table::new(r))),
        ),
    };

    match table {
        Ok((0, _)) => info!("Table {} is empty.", config.table),
        Ok((_, table)) => {
            println!("{}", title.green().bold());
            println!("{}", table);
        }
        Err(e) => error!("Cannot build report. Err: {}", e),
    }
}
