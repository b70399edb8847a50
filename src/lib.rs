//! Chat Link Playlist Sync Library
//!
//! This library provides functionality for collecting streaming links from
//! exported chat logs and reconciling them against a remote playlist. It
//! includes the link scanner, the playlist reader and writer, the reconciling
//! and batching steps, and the driver that chains them together.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `batch` - Fixed-size batching of link lists
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The error type shared by every stage
//! - `management` - Token caching
//! - `pipeline` - The scan, read, diff, batch and submit driver
//! - `reconcile` - Set difference between scanned links and playlist members
//! - `remote` - The playlist backend seam and the paginated member reader
//! - `scanner` - Link extraction and normalization
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `transcript` - Sources for the chat log text
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `youtube` - Anonymous YouTube playlists from scanned video ids
//!
//! # Example
//!
//! ```
//! use splinkcli::{config, scanner::{MatchStrategy, Scanner}};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await;
//!     let scanner = Scanner::new(MatchStrategy::spotify_tracks());
//!     let links = scanner.scan("https://open.spotify.com/track/abc?si=1");
//!     assert_eq!(links, vec!["https://open.spotify.com/track/abc"]);
//! }
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod reconcile;
pub mod remote;
pub mod scanner;
pub mod server;
pub mod spotify;
pub mod transcript;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Every stage of the sync pipeline reports failures through
/// [`error::SyncError`], so the CLI layer can print one consistent message
/// and exit with a non-zero status.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use splinkcli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::SyncError>;

/// Prints a status line with a blue `o` marker.
///
/// Used for progress through the pipeline stages, e.g. how many links were
/// scanned or how many tracks the playlist already holds.
///
/// # Example
///
/// ```
/// info!("{} track links scanned", links.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a confirmation line with a green check mark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks to playlist {}", added, playlist_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a fatal message with a red `!` marker to stderr and exits with code 1.
///
/// Only the CLI layer calls this. Library code returns a
/// [`error::SyncError`] instead, so a failed run is always reported once and
/// always ends with a non-zero status.
///
/// # Example
///
/// ```
/// error!("{}", err);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem with a yellow `!` marker.
///
/// # Example
///
/// ```
/// warning!("Cannot find transcript at {}", path.display());
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
