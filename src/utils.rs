use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::header::HeaderMap;
use sha2::{Digest, Sha256};

use crate::scanner::{self, SPOTIFY_TRACK_PREFIX};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Converts a track link into the `spotify:track:<id>` form the add endpoint
/// takes. Links that already are URIs pass through.
pub fn spotify_track_uri(link: &str) -> Option<String> {
    if link.starts_with("spotify:track:") {
        return Some(link.to_string());
    }

    let id = scanner::strip_query(link)
        .strip_prefix(SPOTIFY_TRACK_PREFIX)?
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();

    if id.is_empty() {
        None
    } else {
        Some(format!("spotify:track:{}", id))
    }
}

/// Seconds from a `Retry-After` header, 0 when missing or unparsable.
pub fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// A short human readable form of a list of links for log lines.
pub fn preview(links: &[String], max: usize) -> String {
    let shown: Vec<&str> = links.iter().take(max).map(String::as_str).collect();
    let rest = links.len().saturating_sub(max);
    if rest == 0 {
        shown.join(", ")
    } else {
        format!("{} (+{} more)", shown.join(", "), rest)
    }
}
