use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config, error::SyncError, types::PkceToken};

/// Serves `/callback` and `/health` on [`config::server_addr`] until the
/// process exits.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let server_addr = config::server_addr();
    let addr = SocketAddr::from_str(&server_addr).map_err(|e| {
        SyncError::Config(format!("invalid SERVER_ADDRESS {}: {}", server_addr, e))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SyncError::Auth(format!("cannot listen on {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| SyncError::Auth(format!("callback server failed: {}", e)))
}
