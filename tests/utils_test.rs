use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};
use splinkcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be 128 alphanumeric characters
    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Should differ between calls
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
    assert_eq!(challenge, expected);

    // URL safe, no padding
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
}

#[test]
fn test_spotify_track_uri() {
    assert_eq!(
        spotify_track_uri("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"),
        Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string())
    );

    // Query strings are ignored
    assert_eq!(
        spotify_track_uri("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=abc"),
        Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string())
    );

    // URIs pass through
    assert_eq!(
        spotify_track_uri("spotify:track:4uLU6hMCjMI75M1A2tKUQC"),
        Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string())
    );
}

#[test]
fn test_spotify_track_uri_rejects_other_links() {
    assert_eq!(spotify_track_uri("https://open.spotify.com/album/abc"), None);
    assert_eq!(spotify_track_uri("https://open.spotify.com/track/"), None);
    assert_eq!(spotify_track_uri("https://example.com/track/abc"), None);
}

#[test]
fn test_retry_after_secs() {
    let mut headers = HeaderMap::new();
    assert_eq!(retry_after_secs(&headers), 0);

    headers.insert("retry-after", HeaderValue::from_static("7"));
    assert_eq!(retry_after_secs(&headers), 7);

    headers.insert("retry-after", HeaderValue::from_static("soon"));
    assert_eq!(retry_after_secs(&headers), 0);
}

#[test]
fn test_preview() {
    let links: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

    assert_eq!(preview(&links, 4), "a, b, c, d");
    assert_eq!(preview(&links, 2), "a, b (+2 more)");
    assert_eq!(preview(&[], 3), "");
}
