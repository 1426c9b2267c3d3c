//! Spotify Artist Popularity CLI Library
//!
//! This library fetches artist and top-track popularity from the Spotify Web API,
//! flattens the records into one denormalized row per track, persists them into a
//! SQLite table and renders aggregate views of the stored data.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Crate error type and result alias
//! - `management` - Fetch orchestration and table persistence
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Record normalization and other helpers
//!
//! # Example
//!
//! ```
//! use sporpcli::{config::{self, Config}, management::CatalogFetcher};
//!
//! fn main() -> sporpcli::Result<()> {
//!     config::load_env();
//!     let config = Config::from_env()?;
//!     let fetcher = CatalogFetcher::from_config(&config)?;
//!     let rows = fetcher.fetch_one("Jungle")?;
//!     println!("{} tracks", rows.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Fetching {} artists...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Stored {} rows", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 after printing. Only used by the
/// CLI layer for errors where nothing useful can be done anymore, such as a
/// missing client secret or an unreadable database.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. an artist that could not be fetched
/// during a batch run.
///
/// # Example
///
/// ```
/// warning!("Skipped {} artists", skipped);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
