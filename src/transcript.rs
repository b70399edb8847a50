//! Where the chat log text comes from.
//!
//! The pipeline only asks a [`TranscriptSource`] for text. Checking paths and
//! asking the user again after a bad path both happen here, outside the
//! pipeline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Res, error::SyncError, warning};

#[async_trait]
pub trait TranscriptSource: Send {
    async fn read_transcript(&mut self) -> Res<String>;
}

/// Text that is already in memory.
pub struct InlineTranscript(pub String);

#[async_trait]
impl TranscriptSource for InlineTranscript {
    async fn read_transcript(&mut self) -> Res<String> {
        Ok(self.0.clone())
    }
}

/// Checks that `path` names an existing `.txt` file.
pub fn validate_path(path: &Path) -> Res<()> {
    if !path.is_file() {
        return Err(SyncError::Input(format!(
            "Cannot find transcript at {}",
            path.display()
        )));
    }

    let is_txt = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if !is_txt {
        return Err(SyncError::Input(format!(
            "{} is not a .txt chat export",
            path.display()
        )));
    }

    Ok(())
}

/// A transcript file given up front. Invalid paths are an error.
pub struct FileTranscript {
    path: PathBuf,
}

impl FileTranscript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TranscriptSource for FileTranscript {
    async fn read_transcript(&mut self) -> Res<String> {
        validate_path(&self.path)?;
        read_file(&self.path).await
    }
}

/// Asks for a transcript path until a readable `.txt` file is given.
///
/// A path supplied on the command line is tried first. Bad paths only print a
/// warning and ask again. The source gives up only when the input stream ends.
pub struct PromptTranscript<R, W> {
    input: R,
    output: W,
    initial: Option<PathBuf>,
}

impl<R, W> PromptTranscript<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W, initial: Option<PathBuf>) -> Self {
        Self {
            input,
            output,
            initial,
        }
    }

    async fn ask(&mut self, question: &str) -> Res<PathBuf> {
        let _ = self.output.write_all(question.as_bytes()).await;
        let _ = self.output.flush().await;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .map_err(|e| SyncError::Input(e.to_string()))?;
        if read == 0 {
            return Err(SyncError::Input("no transcript path provided".to_string()));
        }

        Ok(PathBuf::from(clean_path(&line)))
    }
}

#[async_trait]
impl<R, W> TranscriptSource for PromptTranscript<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_transcript(&mut self) -> Res<String> {
        let mut path = match self.initial.take() {
            Some(path) => path,
            None => self.ask("Paste the full path of the chat export (.txt file):\n").await?,
        };

        loop {
            let attempt = match validate_path(&path) {
                Ok(()) => read_file(&path).await,
                Err(e) => Err(e),
            };

            match attempt {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warning!("{}", e);
                    path = self.ask("Please try again:\n").await?;
                }
            }
        }
    }
}

/// Trims whitespace and the quotes a terminal adds when a file is dropped in.
fn clean_path(line: &str) -> &str {
    line.trim().trim_matches(|c| c == '"' || c == '\'')
}

async fn read_file(path: &Path) -> Res<String> {
    async_fs::read_to_string(path)
        .await
        .map_err(|e| SyncError::Input(format!("Cannot read {}: {}", path.display(), e)))
}
