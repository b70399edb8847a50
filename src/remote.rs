//! The playlist backend seam.
//!
//! [`PlaylistRemote`] is what the pipeline needs from a music service: one
//! page of members at an offset, and an append of a batch of links. The
//! Spotify client implements it over HTTP; tests implement it in memory.

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{Res, error::SyncError, types::MemberPage};

#[async_trait]
pub trait PlaylistRemote: Send + Sync {
    /// Fetches the members starting at `offset`, in the provider's default
    /// page size.
    async fn fetch_page(&self, playlist_id: &str, offset: usize) -> Res<MemberPage>;

    /// Whether `link` can be passed to [`PlaylistRemote::add_links`]. The
    /// driver checks every new link before the first write.
    fn accepts(&self, _link: &str) -> bool {
        true
    }

    /// Appends `links` to the playlist. Callers never pass more than the
    /// provider's per-request limit.
    async fn add_links(&self, playlist_id: &str, links: &[String]) -> Res<()>;
}

/// Reads the complete membership of a playlist.
///
/// Pages are requested one after another because each offset depends on the
/// previous page's item count. The read ends at the first empty page. Any
/// failure aborts the read: a partial membership would make tracks that are
/// already present look new.
pub async fn read_all_members<R>(remote: &R, playlist_id: &str) -> Res<HashSet<String>>
where
    R: PlaylistRemote + ?Sized,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Reading playlist {}...", playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut members = HashSet::new();
    let mut offset = 0;

    loop {
        let page = match remote.fetch_page(playlist_id, offset).await {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(into_read_error(e, playlist_id, offset));
            }
        };

        if page.returned == 0 {
            break;
        }

        offset += page.returned;
        members.extend(page.links);
        pb.set_message(format!(
            "Reading playlist {}... ({} tracks so far)",
            playlist_id, offset
        ));
    }

    pb.finish_and_clear();
    Ok(members)
}

fn into_read_error(err: SyncError, playlist_id: &str, offset: usize) -> SyncError {
    match err {
        SyncError::RemoteRead { .. } | SyncError::Auth(_) | SyncError::Config(_) => err,
        other => SyncError::RemoteRead {
            playlist_id: playlist_id.to_string(),
            offset,
            reason: other.to_string(),
        },
    }
}
