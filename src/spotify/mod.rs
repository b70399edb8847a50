//! # Spotify Integration Module
//!
//! This module is the HTTP layer between splinkcli and the Spotify Web API.
//!
//! ```text
//! Pipeline (scan, diff, batch)
//!          ↓
//! PlaylistRemote trait
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, token refresh)
//!     └── Playlist Operations (read pages, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - PKCE authorization, code exchange and token refresh
//! - [`playlist`] - [`playlist::SpotifyPlaylists`], the [`crate::remote::PlaylistRemote`]
//!   implementation used by `splinkcli sync`
//!
//! ## Endpoints
//!
//! - `GET /playlists/{playlist_id}/tracks` - playlist members, offset paginated
//! - `POST /playlists/{playlist_id}/tracks` - append up to 100 track URIs
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Rate Limiting
//!
//! Requests go through [`send`] with [`RetryPolicy::READ`] or
//! [`RetryPolicy::WRITE`]. A 429 is retried after the `Retry-After`
//! delay when that delay is 120 seconds or less. Reads are also retried after
//! a 502. Writes are not, since a 502 does not say whether the tracks were
//! added. Every other failure is returned to the caller and ends the run.

pub mod auth;
pub mod playlist;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{utils, warning};

/// When [`send`] repeats a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    /// Longest `Retry-After` that is waited out. Longer ones fail at once.
    pub max_retry_after: Duration,
    /// Pause before repeating a request that got a 502. `None` never repeats.
    pub bad_gateway_delay: Option<Duration>,
}

impl RetryPolicy {
    pub const READ: Self = Self {
        max_retries: 3,
        max_retry_after: Duration::from_secs(120),
        bad_gateway_delay: Some(Duration::from_secs(10)),
    };

    /// Repeats on rate limits only.
    pub const WRITE: Self = Self {
        bad_gateway_delay: None,
        ..Self::READ
    };
}

/// Sends `request`, repeating it as `policy` allows. Non-success statuses
/// become errors.
pub async fn send(
    request: RequestBuilder,
    policy: RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut retries = 0;

    loop {
        let Some(attempt) = request.try_clone() else {
            return request.send().await?.error_for_status();
        };

        let response = attempt.send().await?;
        let status = response.status();
        let may_retry = retries < policy.max_retries;

        if may_retry && status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = utils::retry_after_secs(response.headers());
            if Duration::from_secs(retry_after) > policy.max_retry_after {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
                return response.error_for_status();
            }
            sleep(Duration::from_secs(retry_after.max(1))).await;
        } else if let (true, Some(delay), StatusCode::BAD_GATEWAY) =
            (may_retry, policy.bad_gateway_delay, status)
        {
            sleep(delay).await;
        } else {
            return response.error_for_status();
        }

        retries += 1;
    }
}
