use crate::model::scan::RawUid;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("reader io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of badge taps. `Ok(None)` means the underlying stream ended and no
/// further tags will come.
#[async_trait]
pub trait TagReader {
    async fn next_tag(&mut self) -> Result<Option<RawUid>, ReaderError>;
}

/// Line-oriented badge reader device (keyboard-wedge or serial readers that
/// emit one uid per line). Blocks until a tag is presented; lines that carry
/// no hex payload are skipped.
pub struct HidReader {
    lines: Lines<BufReader<File>>,
}

impl HidReader {
    /// Opening the device is the one fatal hardware step: without a reader
    /// the terminal has no purpose.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let file = File::open(path).await?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

#[async_trait]
impl TagReader for HidReader {
    async fn next_tag(&mut self) -> Result<Option<RawUid>, ReaderError> {
        loop {
            match self.lines.next_line().await? {
                None => return Ok(None),
                Some(line) => match RawUid::parse(&line) {
                    Some(uid) => return Ok(Some(uid)),
                    None => debug!(?line, "ignoring non-uid line from reader"),
                },
            }
        }
    }
}

/// Scripted reader for tests: yields the queued uids, then ends.
#[cfg(test)]
pub struct ScriptedReader(pub std::collections::VecDeque<RawUid>);

#[cfg(test)]
#[async_trait]
impl TagReader for ScriptedReader {
    async fn next_tag(&mut self) -> Result<Option<RawUid>, ReaderError> {
        Ok(self.0.pop_front())
    }
}
