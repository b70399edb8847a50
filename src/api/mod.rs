//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs during
//! `splinkcli auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify, exchanges
//!   it for a token using the PKCE verifier kept in shared state, and stores
//!   the token there for the waiting auth flow.
//! - [`health`] - Reports that the server is up, with the crate version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use splinkcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
