use std::path::PathBuf;

use chrono::Utc;

use crate::{Res, error::SyncError, spotify, types::Token};

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Loads the cached token written by `splinkcli auth`.
    pub async fn load() -> Res<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            SyncError::Auth(format!("no cached token at {}: {}", path.display(), e))
        })?;
        let token: Token = serde_json::from_str(&content)
            .map_err(|e| SyncError::Auth(format!("cached token is unreadable: {}", e)))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-caching it first when it is
    /// about to expire.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() {
            let mut new_token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            // Spotify may omit the refresh token when it does not rotate it
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            if let Err(e) = self.persist().await {
                crate::warning!("Failed to save refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + 240 >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("splinkcli/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
