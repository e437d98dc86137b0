// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the warm-up driver

use jfs_warmup_proto::FrameError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum WarmupError {
    #[error("failed to resolve path {path:?}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to look up inode for {path:?}")]
    InodeLookup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("path {0:?} is not inside JuiceFS")]
    NotMounted(PathBuf),
    #[error("no control file found under {0:?}")]
    ControlFileMissing(PathBuf),
    #[error("failed to open control file {path:?}")]
    ControlFileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("control channel {op} failed")]
    ChannelIo {
        op: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("short write on control channel: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    #[error("expected 1 status byte from control channel, got {0}")]
    ShortRead(usize),
    #[error("warm up failed with status {0}")]
    RemoteFailure(u8),
    #[error("failed to read path list {path:?}")]
    PathList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid fill-cache frame")]
    Frame(#[from] FrameError),
}

pub type WarmupResult<T> = Result<T, WarmupError>;

/// Why an input path was left out of the run. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("not under mount point {0:?}")]
    OutsideMount(PathBuf),
    #[error("cannot be sent: {0}")]
    InvalidEntry(FrameError),
    #[error("{0:?} is not valid UTF-8")]
    NonUtf8(PathBuf),
}
