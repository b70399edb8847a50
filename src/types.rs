use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    // null for tracks that were removed from the catalogue
    #[serde(default)]
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    // local files have no spotify url
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// A page of playlist members as seen by the reader.
///
/// `returned` is the raw item count used to move the offset cursor. It can be
/// larger than `links.len()` when some items carry no canonical URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPage {
    pub returned: usize,
    pub links: Vec<String>,
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    pub stage: String,
    pub count: usize,
}

#[derive(Tabled)]
pub struct LinkTableRow {
    pub position: usize,
    pub link: String,
}

/// An anonymous YouTube playlist created from a list of video ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousPlaylist {
    pub id: String,
    pub url: String,
}
