use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use super::RetryPolicy;

use crate::{
    Res, config,
    error::SyncError,
    management::TokenManager,
    remote::PlaylistRemote,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, MemberPage, PlaylistTracksResponse,
    },
    utils,
};

/// The Spotify Web API behind [`PlaylistRemote`].
///
/// Holds the token manager so that an expiring token is refreshed between
/// pages of a long read.
pub struct SpotifyPlaylists {
    client: Client,
    api_url: String,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyPlaylists {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            client: Client::new(),
            api_url: config::spotify_apiurl(),
            token_mgr: Mutex::new(token_mgr),
        }
    }

    /// Loads the cached token. Fails with [`SyncError::Auth`] when there is
    /// none, before any playlist request is made.
    pub async fn from_cache() -> Res<Self> {
        let mut token_mgr = TokenManager::load().await?;
        // refresh now so a dead token is reported before scanning starts
        token_mgr.get_valid_token().await?;
        Ok(Self::new(token_mgr))
    }

    async fn token(&self) -> Res<String> {
        self.token_mgr.lock().await.get_valid_token().await
    }
}

/// Canonical links of one page plus the raw item count.
pub fn member_page(response: PlaylistTracksResponse) -> MemberPage {
    let returned = response.items.len();
    let links = response
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(|track| track.external_urls.spotify)
        .collect();

    MemberPage { returned, links }
}

#[async_trait]
impl PlaylistRemote for SpotifyPlaylists {
    async fn fetch_page(&self, playlist_id: &str, offset: usize) -> Res<MemberPage> {
        let token = self.token().await?;
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?offset={offset}&fields=items(track(id,external_urls))",
            uri = self.api_url,
            id = playlist_id,
            offset = offset
        );

        let read_error = |reason: String| SyncError::RemoteRead {
            playlist_id: playlist_id.to_string(),
            offset,
            reason,
        };

        let response = super::send(
            self.client.get(&api_url).bearer_auth(token),
            RetryPolicy::READ,
        )
            .await
            .map_err(|e| read_error(e.to_string()))?;
        let page = response
            .json::<PlaylistTracksResponse>()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        Ok(member_page(page))
    }

    fn accepts(&self, link: &str) -> bool {
        utils::spotify_track_uri(link).is_some()
    }

    async fn add_links(&self, playlist_id: &str, links: &[String]) -> Res<()> {
        let write_error = |reason: String| SyncError::RemoteWrite {
            playlist_id: playlist_id.to_string(),
            batches_submitted: 0,
            tracks_submitted: 0,
            reason,
        };

        let uris = links
            .iter()
            .map(|link| {
                utils::spotify_track_uri(link)
                    .ok_or_else(|| write_error(format!("{} is not a track link", link)))
            })
            .collect::<Res<Vec<String>>>()?;

        let token = self.token().await?;
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        );

        let request = self
            .client
            .post(&api_url)
            .bearer_auth(token)
            .json(&AddTrackToPlaylistRequest { uris });

        let response = super::send(request, RetryPolicy::WRITE)
            .await
            .map_err(|e| write_error(e.to_string()))?;
        response
            .json::<AddTrackToPlaylistResponse>()
            .await
            .map_err(|e| write_error(e.to_string()))?;

        Ok(())
    }
}
