use sporpcli::{
    Error,
    management::{TableStore, WriteMode},
    types::FlatRow,
};

// Helper function to create a test row
fn create_test_row(
    artist: &str,
    artist_popularity: u32,
    song: &str,
    song_popularity: u32,
    duration: &str,
) -> FlatRow {
    FlatRow {
        artist_id: format!("{}_id", artist.to_lowercase()),
        artist_name: artist.to_string(),
        artist_popularity,
        song_id: format!("{}_id", song.to_lowercase()),
        song_name: song.to_string(),
        song_popularity,
        duration_min_sec: duration.to_string(),
    }
}

fn sample_rows() -> Vec<FlatRow> {
    vec![
        create_test_row("SZA", 90, "Saturn", 88, "3:06"),
        create_test_row("SZA", 90, "Snooze", 86, "3:21"),
        create_test_row("Jungle", 71, "Casio", 65, "3:07"),
        create_test_row("Jungle", 71, "Back On 74", 81, "3:37"),
        create_test_row("Jungle", 71, "Busy Earnin'", 70, "3:00"),
    ]
}

#[test]
fn test_write_and_read_back_in_order() {
    let mut store = TableStore::in_memory().unwrap();
    let rows = sample_rows();

    let written = store.write(&rows, "popularity", WriteMode::Replace).unwrap();

    assert_eq!(written, 5);
    assert_eq!(store.read_all("popularity").unwrap(), rows);
}

#[test]
fn test_replace_discards_previous_rows() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    let new_rows = vec![create_test_row("Drake", 95, "One Dance", 85, "2:54")];
    store.write(&new_rows, "popularity", WriteMode::Replace).unwrap();

    assert_eq!(store.read_all("popularity").unwrap(), new_rows);
}

#[test]
fn test_replace_with_empty_result_leaves_empty_table() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    store.write(&[], "popularity", WriteMode::Replace).unwrap();

    assert!(store.table_exists("popularity").unwrap());
    assert!(store.read_all("popularity").unwrap().is_empty());
}

#[test]
fn test_append_keeps_previous_rows() {
    let mut store = TableStore::in_memory().unwrap();
    let first = sample_rows();
    let second = vec![create_test_row("Drake", 95, "One Dance", 85, "2:54")];

    store.write(&first, "popularity", WriteMode::Append).unwrap();
    store.write(&second, "popularity", WriteMode::Append).unwrap();

    let all = store.read_all("popularity").unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[..5], first[..]);
    assert_eq!(all[5], second[0]);
}

#[test]
fn test_table_exists() {
    let mut store = TableStore::in_memory().unwrap();
    assert!(!store.table_exists("popularity").unwrap());

    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    assert!(store.table_exists("popularity").unwrap());
    assert!(!store.table_exists("other").unwrap());
}

#[test]
fn test_invalid_table_name_is_rejected() {
    let mut store = TableStore::in_memory().unwrap();

    for name in [
        "",
        "1table",
        "drop table x;--",
        "student.ak_spotify",
        "a b",
        "sqlite_stat1",
        "SQLite_master",
    ] {
        let res = store.write(&sample_rows(), name, WriteMode::Replace);
        assert!(matches!(res, Err(Error::Config(_))), "accepted '{name}'");
    }
}

#[test]
fn test_keyword_table_names_are_usable() {
    let mut store = TableStore::in_memory().unwrap();

    for name in ["order", "select", "table"] {
        store.write(&sample_rows(), name, WriteMode::Replace).unwrap();
        store.write(&sample_rows(), name, WriteMode::Append).unwrap();

        assert!(store.table_exists(name).unwrap());
        assert_eq!(store.read_all(name).unwrap().len(), 10);
        assert_eq!(store.artist_popularity(name).unwrap().len(), 2);
    }
}

#[test]
fn test_artist_song_length() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    let rows = store.artist_song_length("popularity").unwrap();

    assert_eq!(rows.len(), 2);
    // Most popular artist first
    assert_eq!(rows[0].artist, "SZA");
    assert_eq!(rows[0].popularity, 90);
    // (186 + 201) / 2
    assert!((rows[0].avg_song_length_seconds - 193.5).abs() < 1e-9);
    assert_eq!(rows[1].artist, "Jungle");
    // (187 + 217 + 180) / 3
    assert!((rows[1].avg_song_length_seconds - 194.666_666_666).abs() < 1e-6);
}

#[test]
fn test_artist_popularity() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    let rows = store.artist_popularity("popularity").unwrap();

    let artists: Vec<&str> = rows.iter().map(|r| r.artist.as_str()).collect();
    assert_eq!(artists, vec!["SZA", "Jungle"]);
    assert!((rows[0].popularity - 90.0).abs() < 1e-9);
    assert!(!rows[0].bar.is_empty());
}

#[test]
fn test_song_popularity_by_artist() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&sample_rows(), "popularity", WriteMode::Replace).unwrap();

    let rows = store.song_popularity_by_artist("popularity").unwrap();

    // Ordered by artist name
    let artists: Vec<&str> = rows.iter().map(|r| r.artist.as_str()).collect();
    assert_eq!(artists, vec!["Jungle", "SZA"]);
    // (65 + 81 + 70) / 3
    assert!((rows[0].avg_song_popularity - 72.0).abs() < 1e-9);
    assert!((rows[1].avg_song_popularity - 87.0).abs() < 1e-9);
}

#[test]
fn test_aggregates_on_empty_table() {
    let mut store = TableStore::in_memory().unwrap();
    store.write(&[], "popularity", WriteMode::Replace).unwrap();

    assert!(store.artist_song_length("popularity").unwrap().is_empty());
    assert!(store.artist_popularity("popularity").unwrap().is_empty());
    assert!(store.song_popularity_by_artist("popularity").unwrap().is_empty());
}
