//! Anonymous YouTube playlists.
//!
//! YouTube answers `GET /watch_videos?video_ids=a,b,c` with a redirect to the
//! first video, playing inside a new temporary playlist. The playlist id is in
//! the `list` query parameter of the redirect target. There is no account and
//! no playlist to reconcile against, so this path stops at opening the page.

use reqwest::{Client, StatusCode, Url, header::LOCATION, redirect::Policy};

use crate::{Res, config, error::SyncError, types::AnonymousPlaylist};

/// The lookup URL for a batch of video ids.
pub fn lookup_url(base: &str, video_ids: &[String]) -> Res<Url> {
    let mut url = Url::parse(base)
        .and_then(|base| base.join("watch_videos"))
        .map_err(|e| SyncError::Config(format!("invalid YOUTUBE_URL {}: {}", base, e)))?;
    url.query_pairs_mut()
        .append_pair("video_ids", &video_ids.join(","));
    Ok(url)
}

/// Reads the playlist from a `Location` header value.
///
/// Relative targets are resolved against `base`.
pub fn playlist_from_location(base: &Url, location: &str) -> Res<AnonymousPlaylist> {
    let target = base
        .join(location)
        .map_err(|e| SyncError::Lookup(format!("invalid redirect target {}: {}", location, e)))?;

    let id = target
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            SyncError::Lookup(format!("redirect target {} carries no playlist id", target))
        })?;

    Ok(AnonymousPlaylist {
        id,
        url: target.to_string(),
    })
}

/// Creates an anonymous playlist for `video_ids`.
///
/// At most 50 ids are accepted per call; split larger lists with
/// [`crate::batch::batch`] and [`crate::batch::YOUTUBE_LOOKUP_BATCH_SIZE`].
pub async fn create_anonymous_playlist(video_ids: &[String]) -> Res<AnonymousPlaylist> {
    if video_ids.is_empty() {
        return Err(SyncError::Lookup("no video ids to look up".to_string()));
    }

    let url = lookup_url(&config::youtube_url(), video_ids)?;

    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(|e| SyncError::Lookup(e.to_string()))?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| SyncError::Lookup(e.to_string()))?;

    let status = response.status();
    if !status.is_redirection() {
        let hint = if status == StatusCode::OK {
            " (no redirect, are the video ids valid?)"
        } else {
            ""
        };
        return Err(SyncError::Lookup(format!(
            "{} answered {}{}",
            url, status, hint
        )));
    }

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SyncError::Lookup(format!("{} redirected without a target", url)))?;

    playlist_from_location(&url, location)
}
