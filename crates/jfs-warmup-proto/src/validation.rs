// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation of fill-cache frames and their entries

use crate::{ENTRY_SEPARATOR, MAX_BATCH_ENTRIES};
use thiserror::Error;

/// Frame construction or decoding error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("a fill-cache batch must contain at least one path")]
    EmptyBatch,
    #[error("batch holds {0} paths, the limit is {MAX_BATCH_ENTRIES}")]
    TooManyEntries(usize),
    #[error("path #{index} is empty")]
    EmptyEntry { index: usize },
    #[error("path #{index} contains a newline: {entry:?}")]
    EmbeddedNewline { index: usize, entry: String },
    #[error("path block of {0} bytes does not fit in a frame")]
    PathBlockTooLarge(usize),
    #[error("frame truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unexpected command code {0}")]
    UnknownCommand(u32),
    #[error("payload length {declared} does not match {actual} bytes on the wire")]
    PayloadLengthMismatch { declared: usize, actual: usize },
    #[error("path block length {declared} disagrees with payload length {payload}")]
    PathBlockLengthMismatch { declared: usize, payload: usize },
    #[error("path block is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid background flag {0}")]
    InvalidBackgroundFlag(u8),
}

/// Check that a single entry can travel inside a path block.
///
/// Entries are joined with `'\n'`, so an entry containing one would be split
/// in two by the receiver.
pub fn validate_entry(index: usize, entry: &str) -> Result<(), FrameError> {
    if entry.is_empty() {
        return Err(FrameError::EmptyEntry { index });
    }
    if entry.contains(ENTRY_SEPARATOR) {
        return Err(FrameError::EmbeddedNewline {
            index,
            entry: entry.to_string(),
        });
    }
    Ok(())
}

/// Validate a whole batch before it is framed.
pub fn validate_batch<S: AsRef<str>>(paths: &[S]) -> Result<(), FrameError> {
    if paths.is_empty() {
        return Err(FrameError::EmptyBatch);
    }
    if paths.len() > MAX_BATCH_ENTRIES {
        return Err(FrameError::TooManyEntries(paths.len()));
    }
    for (index, entry) in paths.iter().enumerate() {
        validate_entry(index, entry.as_ref())?;
    }
    Ok(())
}
