use splinkcli::scanner::*;

const TRACK_A: &str = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC";
const TRACK_B: &str = "https://open.spotify.com/track/7GhIk7Il098yCjg4BQjzvb";

fn spotify() -> Scanner {
    Scanner::new(MatchStrategy::spotify_tracks())
}

fn youtube() -> Scanner {
    Scanner::new(MatchStrategy::youtube_videos())
}

#[test]
fn test_scan_strips_tracking_parameters() {
    let text = format!("12/03/2023, 21:14 - Sam: listen {}?si=1a2b3c4d", TRACK_A);
    assert_eq!(spotify().scan(&text), vec![TRACK_A]);
}

#[test]
fn test_scan_keeps_order_and_duplicates() {
    let text = format!("{a} then {a} and finally {b}", a = TRACK_A, b = TRACK_B);
    assert_eq!(spotify().scan(&text), vec![TRACK_A, TRACK_A, TRACK_B]);
}

#[test]
fn test_scan_drops_other_services_and_paths() {
    let text = "\
        album https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3\n\
        playlist https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=x\n\
        site https://example.com/track/123\n\
        video https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    assert!(spotify().scan(text).is_empty());
}

#[test]
fn test_scan_ignores_text_without_links() {
    assert!(spotify().scan("").is_empty());
    assert!(spotify().scan("open.spotify.com/track/abc without scheme").is_empty());
    assert!(spotify().scan("https:// broken").is_empty());
}

#[test]
fn test_scan_trims_sentence_punctuation() {
    let text = format!("Have you heard ({})? Also {}.", TRACK_A, TRACK_B);
    assert_eq!(spotify().scan(&text), vec![TRACK_A, TRACK_B]);
}

#[test]
fn test_scan_results_have_prefix_and_no_query() {
    let text = format!(
        "{}?si=1 https://open.spotify.com/track/x?si=2&utm_source=copy {} https://open.spotify.com/trackless",
        TRACK_A, TRACK_B
    );
    let links = spotify().scan(&text);

    assert_eq!(links.len(), 4);
    for link in &links {
        assert!(link.starts_with(SPOTIFY_TRACK_PREFIX));
        assert!(!link.contains('?'));
    }
}

#[test]
fn test_scan_custom_prefix() {
    let scanner = Scanner::new(Service::Spotify.strategy(Some(
        "https://open.spotify.com/album".to_string(),
    )));
    let text = format!("{} https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3?si=q", TRACK_A);

    assert_eq!(
        scanner.scan(&text),
        vec!["https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3"]
    );
}

#[test]
fn test_candidates_in_order_of_appearance() {
    let text = "first https://a.example/x then www.b.example/y and http://c.example";
    let candidates: Vec<&str> = spotify().candidates(text).collect();
    assert_eq!(
        candidates,
        vec!["https://a.example/x", "www.b.example/y", "http://c.example"]
    );
}

#[test]
fn test_youtube_scan_extracts_video_ids() {
    let text = "\
        https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s\n\
        https://youtu.be/9bZkp7q19f0?si=abc\n\
        https://youtube.com/shorts/aqz-KE-bpKQ\n\
        https://m.youtube.com/watch?v=kJQP7kiw5Fk#comments";

    assert_eq!(
        youtube().scan(text),
        vec!["dQw4w9WgXcQ", "9bZkp7q19f0", "aqz-KE-bpKQ", "kJQP7kiw5Fk"]
    );
}

#[test]
fn test_youtube_scan_drops_links_without_token() {
    let text = format!(
        "{} https://www.youtube.com/@channel https://www.youtube.com/watch?v= https://youtu.be/",
        TRACK_A
    );
    assert!(youtube().scan(&text).is_empty());
}

#[test]
fn test_strip_query() {
    assert_eq!(strip_query("https://x/y?a=1?b=2"), "https://x/y");
    assert_eq!(strip_query("https://x/y"), "https://x/y");
    assert_eq!(strip_query("?"), "");
}

#[test]
fn test_service_strategy() {
    assert_eq!(Service::Spotify.strategy(None), MatchStrategy::spotify_tracks());
    assert_eq!(Service::Youtube.strategy(Some("ignored".into())), MatchStrategy::youtube_videos());
}

#[test]
fn test_youtube_scan_share_and_embed_links() {
    let text = "\
        https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ\n\
        https://www.youtube.com/watch?app=desktop&v=aqz-KE-bpKQ&t=5\n\
        https://www.youtube.com/embed/9bZkp7q19f0?start=30\n\
        https://www.youtube-nocookie.com/embed/kJQP7kiw5Fk";

    assert_eq!(
        youtube().scan(text),
        vec!["dQw4w9WgXcQ", "aqz-KE-bpKQ", "9bZkp7q19f0", "kJQP7kiw5Fk"]
    );
}

#[test]
fn test_track_prefix_accepts_track_links_only() {
    assert_eq!(
        MatchStrategy::track_prefix(None).unwrap(),
        MatchStrategy::spotify_tracks()
    );

    let narrowed = format!("{}/4uLU", SPOTIFY_TRACK_PREFIX);
    assert_eq!(
        MatchStrategy::track_prefix(Some(narrowed.clone())).unwrap(),
        MatchStrategy::Prefix(narrowed)
    );

    for prefix in [
        "https://open.spotify.com/album",
        "https://open.spotify.com/",
        "http://open.spotify.com/track",
    ] {
        assert!(
            matches!(
                MatchStrategy::track_prefix(Some(prefix.to_string())),
                Err(splinkcli::error::SyncError::Config(_))
            ),
            "{} should be rejected",
            prefix
        );
    }
}
