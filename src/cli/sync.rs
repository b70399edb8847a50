use std::path::PathBuf;

use tabled::Table;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

use crate::{
    Res,
    config::PlaylistConfig,
    error,
    error::SyncError,
    info,
    pipeline::{self, SyncOptions},
    scanner::{MatchStrategy, Scanner},
    spotify::playlist::SpotifyPlaylists,
    transcript::PromptTranscript,
};

pub async fn sync(
    transcript: Option<PathBuf>,
    playlist: Option<String>,
    prefix: Option<String>,
    dry_run: bool,
    dedupe: bool,
) {
    let scanner = match MatchStrategy::track_prefix(prefix) {
        Ok(strategy) => Scanner::new(strategy),
        Err(e) => error!("{}", e),
    };

    let mut input = super::terminal_input();
    let playlist_config = PlaylistConfig::from_env().with_override(playlist);
    let playlist_id = match resolve_playlist(&playlist_config, &mut input).await {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };
    info!("Target playlist: {}", playlist_id);

    let remote = match SpotifyPlaylists::from_cache().await {
        Ok(remote) => remote,
        Err(e) => error!("{}", e),
    };

    if let MatchStrategy::Prefix(prefix) = scanner.strategy() {
        info!("Collecting links starting with {}", prefix);
    }

    let mut options = SyncOptions::new(playlist_id);
    options.dry_run = dry_run;
    options.dedupe = dedupe;

    let mut source = PromptTranscript::new(input, io::stdout(), transcript);
    match pipeline::run(&mut source, &scanner, &remote, &options).await {
        Ok(report) => println!("{}", Table::new(report.table_rows())),
        Err(e) => error!("{}", e),
    }
}

/// Asks for a playlist id unless one is configured. An empty answer takes the
/// default playlist.
async fn resolve_playlist<R>(config: &PlaylistConfig, input: &mut R) -> Res<String>
where
    R: AsyncBufRead + Unpin,
{
    if config.playlist_id.is_some() {
        return config.resolve(None);
    }

    match &config.default_playlist_id {
        Some(default) => println!("Enter the Spotify playlist ID to add to (default {}):", default),
        None => println!("Enter the Spotify playlist ID to add to:"),
    }

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .await
        .map_err(|e| SyncError::Input(e.to_string()))?;

    config.resolve(Some(&answer))
}
