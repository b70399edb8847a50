//! Link extraction from chat transcripts.
//!
//! A [`Scanner`] runs one general URL pattern over the text and hands every
//! candidate to its [`MatchStrategy`]. The strategy decides whether the link
//! belongs to the target service and what its canonical form is.
//!
//! Canonical forms are compared as plain strings by the rest of the pipeline,
//! so two links to the same resource must normalize to identical bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Res, error::SyncError};

pub const SPOTIFY_TRACK_PREFIX: &str = "https://open.spotify.com/track";
pub const YOUTUBE_MARKER: &str = "youtu";
pub const YOUTUBE_SPLITTERS: [&str; 5] = ["watch?v=", "&v=", "youtu.be/", "shorts/", "embed/"];

// Scheme or bare `www.` host, then anything up to whitespace or a quote/bracket.
// The final character may not be trailing sentence punctuation.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:https?://|www\.)[^\s<>"'`]*[^\s<>"'`.,;:!?)\]}]"#)
        .expect("URL pattern is a valid regex")
});

/// How candidate links are filtered and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Cut the link at its first `?`, then keep it only when it starts with
    /// the prefix.
    Prefix(String),

    /// Keep links containing `marker` and reduce them to the token that
    /// follows the first splitter found in the link.
    Marker {
        marker: String,
        splitters: Vec<String>,
    },
}

impl MatchStrategy {
    /// Spotify track links, e.g. `https://open.spotify.com/track/<id>`.
    pub fn spotify_tracks() -> Self {
        MatchStrategy::Prefix(SPOTIFY_TRACK_PREFIX.to_string())
    }

    /// Spotify track links under `prefix`, or all of them without one.
    ///
    /// Fails with [`SyncError::Config`] for a prefix outside
    /// [`SPOTIFY_TRACK_PREFIX`], whose links could never be added to a
    /// playlist.
    pub fn track_prefix(prefix: Option<String>) -> Res<Self> {
        match prefix {
            Some(prefix) if prefix.starts_with(SPOTIFY_TRACK_PREFIX) => {
                Ok(MatchStrategy::Prefix(prefix))
            }
            Some(prefix) => Err(SyncError::Config(format!(
                "--prefix {} does not start with {}",
                prefix, SPOTIFY_TRACK_PREFIX
            ))),
            None => Ok(MatchStrategy::spotify_tracks()),
        }
    }

    /// YouTube video ids from `watch?v=`, `youtu.be/`, `shorts/` and
    /// `embed/` links, including share links where `v=` is not the first
    /// parameter.
    pub fn youtube_videos() -> Self {
        MatchStrategy::Marker {
            marker: YOUTUBE_MARKER.to_string(),
            splitters: YOUTUBE_SPLITTERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the canonical form of `candidate`, or `None` when the link
    /// does not belong to this strategy's service.
    pub fn normalize(&self, candidate: &str) -> Option<String> {
        match self {
            MatchStrategy::Prefix(prefix) => {
                let link = strip_query(candidate);
                link.starts_with(prefix.as_str()).then(|| link.to_string())
            }
            MatchStrategy::Marker { marker, splitters } => {
                if !candidate.contains(marker.as_str()) {
                    return None;
                }

                let rest = splitters
                    .iter()
                    .find_map(|s| candidate.split_once(s.as_str()).map(|(_, rest)| rest))?;
                let token = rest
                    .split(['&', '?', '#', '/'])
                    .next()
                    .unwrap_or_default();

                (!token.is_empty()).then(|| token.to_string())
            }
        }
    }
}

/// Drops everything from the first `?` onward.
pub fn strip_query(link: &str) -> &str {
    match link.split_once('?') {
        Some((head, _)) => head,
        None => link,
    }
}

/// Extracts canonical links from free text.
#[derive(Debug, Clone)]
pub struct Scanner {
    strategy: MatchStrategy,
}

impl Scanner {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Every URL-shaped substring of `text`, in order of appearance.
    pub fn candidates<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        URL_PATTERN.find_iter(text).map(|m| m.as_str())
    }

    /// Canonical links in first-seen order.
    ///
    /// Repeated links are kept; deciding what to do with them is left to the
    /// reconciler.
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.candidates(text)
            .filter_map(|candidate| self.strategy.normalize(candidate))
            .collect()
    }
}

/// The services a transcript can be scanned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Service {
    Spotify,
    Youtube,
}

impl Service {
    /// The match strategy for this service. `prefix` replaces the Spotify
    /// track prefix, e.g. to collect album links instead.
    pub fn strategy(self, prefix: Option<String>) -> MatchStrategy {
        match self {
            Service::Spotify => match prefix {
                Some(prefix) => MatchStrategy::Prefix(prefix),
                None => MatchStrategy::spotify_tracks(),
            },
            Service::Youtube => MatchStrategy::youtube_videos(),
        }
    }
}
