use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    error::SyncError,
    management::TokenManager,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// Runs the OAuth 2.0 PKCE flow and caches the resulting token.
///
/// 1. Generates a code verifier and its SHA256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits up to 60 seconds for the callback to store a token
/// 5. Persists the token for later runs
///
/// # Errors
///
/// Returns [`SyncError::Auth`] when no token arrives in time or it cannot be
/// saved, and [`SyncError::Config`] when the client id is not configured.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<TokenManager> {
    let client_id = config::spotify_client_id()?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = config::spotify_scope().replace(' ', "%20")
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or_else(|| SyncError::Auth("authentication failed or timed out".to_string()))?;

    let token_manager = TokenManager::new(token);
    token_manager
        .persist()
        .await
        .map_err(|e| SyncError::Auth(format!("failed to save token to cache: {}", e)))?;

    Ok(token_manager)
}

/// Polls the shared state once a second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SyncError::Auth(format!("token refresh failed: {}", e)))?;

    let json: Value = res
        .json()
        .await
        .map_err(|e| SyncError::Auth(format!("token refresh failed: {}", e)))?;

    token_from_json(&json)
}

/// Exchanges the authorization code from the callback for a token.
///
/// The verifier must be the one whose challenge was sent in the
/// authorization request.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SyncError::Auth(format!("code exchange failed: {}", e)))?;

    let json: Value = res
        .json()
        .await
        .map_err(|e| SyncError::Auth(format!("code exchange failed: {}", e)))?;

    token_from_json(&json)
}

/// Builds a [`Token`] from a token endpoint response.
///
/// The access token is required. A missing refresh token is left empty so
/// the caller can keep the previous one.
pub fn token_from_json(json: &Value) -> Res<Token> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SyncError::Auth("token response has no access_token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
