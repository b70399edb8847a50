use std::path::PathBuf;

use crate::{
    batch::{self, YOUTUBE_LOOKUP_BATCH_SIZE},
    error, info,
    scanner::{Scanner, Service},
    success,
    transcript::TranscriptSource,
    utils, warning, youtube,
};

pub async fn youtube(transcript: Option<PathBuf>, no_browser: bool) {
    let mut source = super::terminal_transcript(transcript);
    let text = match source.read_transcript().await {
        Ok(text) => text,
        Err(e) => error!("{}", e),
    };

    let video_ids = Scanner::new(Service::Youtube.strategy(None)).scan(&text);
    info!("Got {} video IDs from the transcript", video_ids.len());

    if video_ids.is_empty() {
        warning!("No YouTube links found, nothing to open");
        return;
    }

    let total = batch::batch_count(video_ids.len(), YOUTUBE_LOOKUP_BATCH_SIZE);
    for (index, chunk) in batch::batch(&video_ids, YOUTUBE_LOOKUP_BATCH_SIZE).enumerate() {
        info!(
            "Creating playlist {}/{} for {}",
            index + 1,
            total,
            utils::preview(chunk, 3)
        );

        let playlist = match youtube::create_anonymous_playlist(chunk).await {
            Ok(playlist) => playlist,
            Err(e) => error!("{}", e),
        };
        success!("Playlist {} created: {}", playlist.id, playlist.url);

        if !no_browser && webbrowser::open(&playlist.url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                playlist.url
            );
        }
    }
}
