//! Error types for the link sync pipeline.
//!
//! Every failure that can end a run is represented by a [`SyncError`] variant.
//! The CLI layer turns these into a red `[!]` line and a non-zero exit code,
//! so the messages here are written for the user, not for a log parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The transcript could not be obtained from its source.
    #[error("transcript unavailable: {0}")]
    Input(String),

    /// No usable access token. Raised before any remote read or write.
    #[error("authorization failed: {0}\nPlease run splinkcli auth")]
    Auth(String),

    /// Paging through the playlist failed, so the membership is incomplete.
    #[error("failed to read playlist {playlist_id} at offset {offset}: {reason}")]
    RemoteRead {
        playlist_id: String,
        offset: usize,
        reason: String,
    },

    /// A batch could not be added. Earlier batches stay applied.
    #[error(
        "failed to add tracks to playlist {playlist_id} after {batches_submitted} successful batch(es) ({tracks_submitted} tracks added): {reason}"
    )]
    RemoteWrite {
        playlist_id: String,
        batches_submitted: usize,
        tracks_submitted: usize,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    /// The YouTube lookup did not redirect to a playlist.
    #[error("playlist lookup failed: {0}")]
    Lookup(String),
}
