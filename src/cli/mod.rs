//! # CLI Module
//!
//! User-facing commands. Each function here is called from `main` with the
//! parsed arguments. It reports progress with the `info!`/`success!`/`warning!`
//! macros and ends the process through `error!` on any fatal
//! [`crate::error::SyncError`].
//!
//! - [`auth`] - Authorize with Spotify and cache the token
//! - [`sync`] - Add the Spotify tracks of a chat export that are missing from a playlist
//! - [`scan`] - Print the links a chat export contains, without touching any remote
//! - [`youtube`] - Open anonymous YouTube playlists for the videos of a chat export
//!
//! ## Usage
//!
//! ```bash
//! splinkcli auth
//! splinkcli scan --transcript ~/Downloads/chat.txt
//! splinkcli sync --transcript ~/Downloads/chat.txt --dry-run
//! splinkcli sync --transcript ~/Downloads/chat.txt --playlist 0Bb0r2yj7JrooH2nxxplgM
//! splinkcli youtube --transcript ~/Downloads/chat.txt
//! ```

mod auth;
mod scan;
mod sync;
mod youtube;

pub use auth::auth;
pub use scan::scan;
pub use sync::sync;
pub use youtube::youtube;

use std::path::PathBuf;

use tokio::io::{self, BufReader, Stdin, Stdout};

use crate::transcript::PromptTranscript;

/// Buffered terminal input. One per command, so no typed-ahead line is lost
/// between prompts.
fn terminal_input() -> BufReader<Stdin> {
    BufReader::new(io::stdin())
}

/// A transcript source reading paths from the terminal, trying `initial` first.
fn terminal_transcript(initial: Option<PathBuf>) -> PromptTranscript<BufReader<Stdin>, Stdout> {
    PromptTranscript::new(terminal_input(), io::stdout(), initial)
}
