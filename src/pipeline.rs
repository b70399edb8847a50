//! The submission driver.
//!
//! One run goes transcript → scan → read playlist → diff → batch → write,
//! printing the count at every stage. Nothing is kept between runs.

use std::num::NonZeroUsize;

use crate::{
    Res,
    batch::{self, SPOTIFY_ADD_BATCH_SIZE},
    error::SyncError,
    info, reconcile,
    remote::{self, PlaylistRemote},
    scanner::Scanner,
    success,
    transcript::TranscriptSource,
    types::SummaryTableRow,
    utils,
};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub playlist_id: String,
    /// Compute and report every batch without sending any of them.
    pub dry_run: bool,
    /// Submit each new link once even if the transcript repeats it.
    pub dedupe: bool,
    pub batch_size: NonZeroUsize,
}

impl SyncOptions {
    pub fn new(playlist_id: impl Into<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            dry_run: false,
            dedupe: false,
            batch_size: SPOTIFY_ADD_BATCH_SIZE,
        }
    }
}

/// Counts gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub scanned: usize,
    pub playlist_size: usize,
    pub already_present: usize,
    pub to_add: usize,
    pub batches: usize,
    pub batches_submitted: usize,
    pub added: usize,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn table_rows(&self) -> Vec<SummaryTableRow> {
        let added_label = if self.dry_run {
            "Added (dry run)"
        } else {
            "Added"
        };

        [
            ("Links scanned", self.scanned),
            ("Tracks in playlist", self.playlist_size),
            ("Scanned links already present", self.already_present),
            ("New tracks to add", self.to_add),
            ("Batches", self.batches),
            (added_label, self.added),
        ]
        .into_iter()
        .map(|(stage, count)| SummaryTableRow {
            stage: stage.to_string(),
            count,
        })
        .collect()
    }
}

/// Runs the whole sync against `remote`.
///
/// Every new link is checked with [`PlaylistRemote::accepts`] before anything
/// is written. Batches are sent one at a time. If one fails, the error says how many
/// batches and tracks went through before it. Those stay in the playlist.
pub async fn run<S, R>(
    source: &mut S,
    scanner: &Scanner,
    remote: &R,
    options: &SyncOptions,
) -> Res<SyncReport>
where
    S: TranscriptSource + ?Sized,
    R: PlaylistRemote + ?Sized,
{
    let text = source.read_transcript().await?;

    let scanned = scanner.scan(&text);
    info!("Got {} track links from the transcript", scanned.len());

    let existing = remote::read_all_members(remote, &options.playlist_id).await?;
    info!("{} tracks already in the playlist", existing.len());

    let already_present = reconcile::count_present(&scanned, &existing);
    let mut to_add = reconcile::diff(&scanned, &existing);
    if options.dedupe {
        to_add = reconcile::dedupe(to_add);
    }
    info!("{} new tracks to add", to_add.len());

    let rejected: Vec<String> = to_add
        .iter()
        .filter(|link| !remote.accepts(link))
        .cloned()
        .collect();
    if !rejected.is_empty() {
        return Err(SyncError::Input(format!(
            "{} links cannot be added to playlist {}: {}",
            rejected.len(),
            options.playlist_id,
            utils::preview(&rejected, 3)
        )));
    }

    let mut report = SyncReport {
        scanned: scanned.len(),
        playlist_size: existing.len(),
        already_present,
        to_add: to_add.len(),
        batches: batch::batch_count(to_add.len(), options.batch_size),
        dry_run: options.dry_run,
        ..Default::default()
    };

    for (index, chunk) in batch::batch(&to_add, options.batch_size).enumerate() {
        if options.dry_run {
            info!(
                "Dry run: batch {}/{} would add {} tracks",
                index + 1,
                report.batches,
                chunk.len()
            );
            for link in chunk {
                println!("    {}", link);
            }
            continue;
        }

        remote
            .add_links(&options.playlist_id, chunk)
            .await
            .map_err(|e| write_failure(e, options, &report))?;

        report.batches_submitted += 1;
        report.added += chunk.len();
        info!(
            "Batch {}/{} added ({} tracks)",
            index + 1,
            report.batches,
            chunk.len()
        );
    }

    if options.dry_run {
        success!(
            "Dry run finished: {} tracks would be added to playlist {}",
            report.to_add,
            options.playlist_id
        );
    } else {
        success!(
            "Added {} tracks to playlist {}",
            report.added,
            options.playlist_id
        );
    }

    Ok(report)
}

/// Restates a failed batch with the totals that did go through.
fn write_failure(err: SyncError, options: &SyncOptions, report: &SyncReport) -> SyncError {
    let reason = match err {
        SyncError::RemoteWrite { reason, .. } => reason,
        other => other.to_string(),
    };

    SyncError::RemoteWrite {
        playlist_id: options.playlist_id.clone(),
        batches_submitted: report.batches_submitted,
        tracks_submitted: report.added,
        reason,
    }
}
