//! Configuration management for splinkcli.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for the public Spotify and YouTube endpoints
//!
//! Only the client id has no default. Playlist selection is collected into a
//! [`PlaylistConfig`] once, at the CLI boundary, and handed down from there.

use std::{env, path::PathBuf};

use crate::{Res, error::SyncError, warning};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-read-private playlist-modify-private playlist-modify-public";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_YOUTUBE_URL: &str = "https://www.youtube.com";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/splinkcli/.env`
/// - macOS: `~/Library/Application Support/splinkcli/.env`
/// - Windows: `%LOCALAPPDATA%/splinkcli/.env`
///
/// A missing or unreadable file is not fatal. Settings may come from the
/// process environment alone, so only a warning is printed.
pub async fn load_env() {
    let path = env_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            warning!("Cannot create {}: {}", parent.display(), e);
        }
    }

    if let Err(e) = dotenv::from_path(&path) {
        warning!("No environment file loaded from {}: {}", path.display(), e);
    }
}

/// Path of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("splinkcli/.env");
    path
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify application client id (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Returns [`SyncError::Config`] when the variable is unset. Spotify cannot
/// issue or refresh a token without it.
pub fn spotify_client_id() -> Res<String> {
    optional("SPOTIFY_API_AUTH_CLIENT_ID").ok_or_else(|| {
        SyncError::Config(format!(
            "SPOTIFY_API_AUTH_CLIENT_ID must be set (see {})",
            env_path().display()
        ))
    })
}

/// OAuth redirect URI registered with the Spotify application.
///
/// Defaults to the callback route of the local server at [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    match optional("SPOTIFY_API_REDIRECT_URI") {
        Some(uri) => uri,
        None => format!("http://{}/callback", server_addr()),
    }
}

/// Space separated OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Base URL of the YouTube site used for anonymous playlists (`YOUTUBE_URL`).
pub fn youtube_url() -> String {
    var_or("YOUTUBE_URL", DEFAULT_YOUTUBE_URL)
}

/// Which playlist a sync run targets.
///
/// `playlist_id` is the explicit target. `default_playlist_id` is only used
/// when nothing else names a playlist. In the interactive flow that means the
/// user pressed enter on an empty prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistConfig {
    pub playlist_id: Option<String>,
    pub default_playlist_id: Option<String>,
}

impl PlaylistConfig {
    /// Reads `SPLINK_PLAYLIST_ID` and `SPLINK_DEFAULT_PLAYLIST_ID`.
    pub fn from_env() -> Self {
        Self {
            playlist_id: optional("SPLINK_PLAYLIST_ID"),
            default_playlist_id: optional("SPLINK_DEFAULT_PLAYLIST_ID"),
        }
    }

    /// Replaces the target with a value given on the command line.
    pub fn with_override(mut self, playlist_id: Option<String>) -> Self {
        if let Some(id) = playlist_id.map(|id| id.trim().to_string()) {
            if !id.is_empty() {
                self.playlist_id = Some(id);
            }
        }
        self
    }

    /// Picks the playlist for an answer given at the prompt.
    ///
    /// An explicit target wins over the answer. An empty answer falls back to
    /// the default.
    pub fn resolve(&self, answer: Option<&str>) -> Res<String> {
        if let Some(id) = &self.playlist_id {
            return Ok(id.clone());
        }

        match answer.map(str::trim).filter(|a| !a.is_empty()) {
            Some(id) => Ok(id.to_string()),
            None => self.default_playlist_id.clone().ok_or_else(|| {
                SyncError::Config(
                    "no playlist id given and SPLINK_DEFAULT_PLAYLIST_ID is not set".to_string(),
                )
            }),
        }
    }
}
