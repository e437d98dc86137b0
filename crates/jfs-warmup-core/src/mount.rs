// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Discovery of the JuiceFS mount that owns a path
//!
//! The root directory of a JuiceFS mount always reports inode 1. Walking up
//! from the starting directory until that inode shows up gives the mount
//! point without consulting the mount table.

use crate::error::{WarmupError, WarmupResult};
use crate::paths::absolutize_from;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Inode number of the root directory of every JuiceFS instance.
pub const ROOT_INODE: u64 = 1;

#[cfg_attr(test, mockall::automock)]
pub trait InodeLookup {
    fn inode(&self, path: &Path) -> io::Result<u64>;
}

/// `stat(2)` through nix.
#[derive(Debug, Default, Clone, Copy)]
pub struct NixInodeLookup;

impl InodeLookup for NixInodeLookup {
    #[allow(clippy::unnecessary_cast)]
    fn inode(&self, path: &Path) -> io::Result<u64> {
        let stat = nix::sys::stat::stat(path).map_err(io::Error::from)?;
        Ok(stat.st_ino as u64)
    }
}

/// Find the mount root above `start`.
///
/// `start` may be relative; it is resolved against the current directory.
/// A directory is its own first candidate, a file starts at its parent.
/// The filesystem root itself is never a candidate.
pub fn resolve_mount_root(start: &Path, lookup: &dyn InodeLookup) -> WarmupResult<PathBuf> {
    let cwd = std::env::current_dir().map_err(|source| WarmupError::PathResolution {
        path: start.to_path_buf(),
        source,
    })?;
    let absolute = absolutize_from(&cwd, start);
    let metadata = fs::metadata(&absolute).map_err(|source| WarmupError::PathResolution {
        path: absolute.clone(),
        source,
    })?;

    let mut candidate = if metadata.is_dir() {
        absolute.clone()
    } else {
        absolute.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("/"))
    };

    while candidate.parent().is_some() {
        let inode = lookup.inode(&candidate).map_err(|source| WarmupError::InodeLookup {
            path: candidate.clone(),
            source,
        })?;
        trace!(path = %candidate.display(), inode, "checked mount candidate");
        if inode == ROOT_INODE {
            debug!(mount_root = %candidate.display(), "found JuiceFS mount root");
            return Ok(candidate);
        }
        candidate.pop();
    }

    Err(WarmupError::NotMounted(absolute))
}
