// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Control file access: one fill-cache frame out, one status byte back.

use crate::error::{WarmupError, WarmupResult};
use jfs_warmup_proto::{FillCacheRequest, Status};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Control file names under a mount root, newest first.
pub const CONTROL_FILE_NAMES: [&str; 2] = [".control", ".jfs.control"];

pub fn control_file_path(mount_root: &Path) -> Option<PathBuf> {
    CONTROL_FILE_NAMES
        .iter()
        .map(|name| mount_root.join(name))
        .find(|path| path.exists())
}

/// Open the control file read-write. It is closed when the handle drops.
pub fn open_control_file(mount_root: &Path) -> WarmupResult<File> {
    let path = control_file_path(mount_root)
        .ok_or_else(|| WarmupError::ControlFileMissing(mount_root.to_path_buf()))?;
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(&path)
        .map_err(|source| WarmupError::ControlFileOpen { path, source })
}

/// Send one request and, unless it runs in the background, wait for its status.
///
/// The service parses each `write` as a whole message and has no way to
/// resynchronize, so the frame goes out in exactly one call and anything
/// short of that is fatal.
pub fn send_fill_cache<C>(channel: &mut C, request: &FillCacheRequest) -> WarmupResult<()>
where
    C: Read + Write + ?Sized,
{
    let frame = request.encode()?;
    let written = channel
        .write(&frame)
        .map_err(|source| WarmupError::ChannelIo { op: "write", source })?;
    if written != frame.len() {
        return Err(WarmupError::ShortWrite {
            written,
            expected: frame.len(),
        });
    }
    debug!(entries = request.len(), bytes = frame.len(), "fill-cache frame written");

    if request.background() {
        info!("Warm-up cache for {} paths in background", request.len());
        return Ok(());
    }

    let mut status = [0u8; 1];
    let read = channel
        .read(&mut status)
        .map_err(|source| WarmupError::ChannelIo { op: "read", source })?;
    if read != 1 {
        return Err(WarmupError::ShortRead(read));
    }

    match Status::from_byte(status[0]) {
        Status::Ok => Ok(()),
        Status::Failed(code) => Err(WarmupError::RemoteFailure(code)),
    }
}
