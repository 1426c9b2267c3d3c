//! # CLI Module
//!
//! User-facing commands of sporpcli. Each command takes the loaded
//! [`Config`](crate::config::Config), delegates to the management and Spotify
//! layers, and renders results or problems on the terminal.
//!
//! ## Commands
//!
//! - [`fetch`] - Fetches top tracks for a list of artists and writes them to the
//!   popularity table (replace or append)
//! - [`lookup`] - Shows the top tracks of a single artist, most popular first
//! - [`report`] - Renders aggregate views of the stored table
//!
//! ## Layers
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Fetch orchestration, SQLite table)
//!     ↓
//! Spotify Layer (Token, search, top tracks)
//!     ↓
//! Network Layer (blocking HTTP)
//! ```
//!
//! ## Error Handling
//!
//! - Problems with a single artist are warnings; a batch always finishes
//! - A failing lookup prints the error and returns normally
//! - Missing configuration or an unusable database terminates with `error!`
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporpcli fetch                          # Fetch built-in artist list, replace table
//! sporpcli fetch SZA Jungle --append      # Add two artists to the table
//! sporpcli lookup "kendrick lamar"        # Top tracks of one artist
//! sporpcli report length                  # Popularity vs. song length
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod fetch;
mod lookup;
mod report;

pub use fetch::fetch;
pub use lookup::lookup;
pub use report::ReportView;
pub use report::report;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
