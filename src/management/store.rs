use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    error::{Error, Result},
    types::{ArtistLengthRow, ArtistPopularityRow, FlatRow, ResultSet, SongPopularityRow},
    utils,
};

/// How [`TableStore::write`] treats an existing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Drop the table and recreate it with only the new rows.
    #[default]
    Replace,
    /// Keep existing rows and add the new ones after them.
    Append,
}

/// Seconds of a `M:SS` duration column, computed in SQL.
const DURATION_SECONDS: &str = "CAST(substr(duration_min_sec, 1, instr(duration_min_sec, ':') - 1) AS INTEGER) * 60 \
     + CAST(substr(duration_min_sec, instr(duration_min_sec, ':') + 1) AS INTEGER)";

/// SQLite-backed sink for flat popularity rows.
///
/// One flat table per dataset, no foreign keys. Writes are wholesale: a
/// replace drops the previous table, an append adds rows; rows are never
/// updated or deleted by key.
pub struct TableStore {
    conn: Connection,
}

impl TableStore {
    /// Opens (or creates) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        log::debug!("Opened popularity database at {}", path.display());
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Writes `rows` into `table` inside a single transaction.
    ///
    /// # Returns
    ///
    /// The number of rows inserted.
    pub fn write(&mut self, rows: &[FlatRow], table: &str, mode: WriteMode) -> Result<usize> {
        let table = checked_table_name(table)?;
        let tx = self.conn.transaction()?;

        if mode == WriteMode::Replace {
            tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\";"))?;
        }

        tx.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{table}\" (
                artist_id TEXT NOT NULL,
                artist_name TEXT NOT NULL,
                artist_popularity INTEGER NOT NULL,
                song_id TEXT NOT NULL,
                song_name TEXT NOT NULL,
                song_popularity INTEGER NOT NULL,
                duration_min_sec TEXT NOT NULL
            );"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO \"{table}\" (artist_id, artist_name, artist_popularity, song_id, song_name, song_popularity, duration_min_sec)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ))?;
            for row in rows {
                stmt.execute(params![
                    row.artist_id,
                    row.artist_name,
                    row.artist_popularity,
                    row.song_id,
                    row.song_name,
                    row.song_popularity,
                    row.duration_min_sec,
                ])?;
            }
        }

        tx.commit()?;
        log::debug!("Wrote {} rows to {table} ({mode:?})", rows.len());
        Ok(rows.len())
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let table = checked_table_name(table)?;
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Reads every row back in insertion order.
    pub fn read_all(&self, table: &str) -> Result<ResultSet> {
        let table = checked_table_name(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT artist_id, artist_name, artist_popularity, song_id, song_name, song_popularity, duration_min_sec
             FROM \"{table}\" ORDER BY rowid"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(FlatRow {
                    artist_id: row.get(0)?,
                    artist_name: row.get(1)?,
                    artist_popularity: row.get(2)?,
                    song_id: row.get(3)?,
                    song_name: row.get(4)?,
                    song_popularity: row.get(5)?,
                    duration_min_sec: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Average song length per artist, most popular artist first.
    pub fn artist_song_length(&self, table: &str) -> Result<Vec<ArtistLengthRow>> {
        let table = checked_table_name(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT artist_name, artist_popularity, AVG({DURATION_SECONDS}) AS avg_song_length_seconds
             FROM \"{table}\"
             GROUP BY artist_name, artist_popularity
             ORDER BY artist_popularity DESC, artist_name"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ArtistLengthRow {
                    artist: row.get(0)?,
                    popularity: row.get(1)?,
                    avg_song_length_seconds: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Mean artist popularity per artist name, most popular first.
    pub fn artist_popularity(&self, table: &str) -> Result<Vec<ArtistPopularityRow>> {
        let table = checked_table_name(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT artist_name, AVG(artist_popularity) AS popularity
             FROM \"{table}\"
             GROUP BY artist_name
             ORDER BY popularity DESC, artist_name"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let popularity: f64 = row.get(1)?;
                Ok(ArtistPopularityRow {
                    artist: row.get(0)?,
                    popularity,
                    bar: utils::popularity_bar(popularity),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Mean song popularity per artist name, ordered by name.
    pub fn song_popularity_by_artist(&self, table: &str) -> Result<Vec<SongPopularityRow>> {
        let table = checked_table_name(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT artist_name, AVG(song_popularity) AS avg_song_popularity
             FROM \"{table}\"
             GROUP BY artist_name
             ORDER BY artist_name"
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let avg: f64 = row.get(1)?;
                Ok(SongPopularityRow {
                    artist: row.get(0)?,
                    avg_song_popularity: avg,
                    bar: utils::popularity_bar(avg),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

// table names are interpolated (quoted) into SQL, so only plain identifiers
// pass; the sqlite_ prefix is reserved for internal tables
fn checked_table_name(table: &str) -> Result<&str> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    let reserved = table
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("sqlite_"));

    if valid && !reserved {
        Ok(table)
    } else {
        Err(Error::Config(format!("invalid table name '{table}'")))
    }
}
