// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Groups input paths into fill-cache requests and sends them in order.

use crate::control::send_fill_cache;
use crate::error::{WarmupError, WarmupResult};
use crate::options::{WarmupOptions, WarmupReport};
use crate::paths::{absolutize_from, relative_entry};
use jfs_warmup_proto::FillCacheRequest;
use std::io::{Read, Write};
use std::mem;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Receives the number of entries in every batch the service accepted.
pub trait ProgressSink {
    fn advance(&self, entries: u64);
}

impl<F: Fn(u64)> ProgressSink for F {
    fn advance(&self, entries: u64) {
        self(entries)
    }
}

/// Accumulates entries and flushes a request whenever the batch is full.
pub struct Batcher<'a, C: Read + Write + ?Sized> {
    mount_root: &'a Path,
    base_dir: PathBuf,
    options: &'a WarmupOptions,
    channel: &'a mut C,
    progress: &'a dyn ProgressSink,
    pending: Vec<String>,
    report: WarmupReport,
}

impl<'a, C: Read + Write + ?Sized> Batcher<'a, C> {
    /// Relative input paths are resolved against the current directory.
    pub fn new(
        mount_root: &'a Path,
        options: &'a WarmupOptions,
        channel: &'a mut C,
        progress: &'a dyn ProgressSink,
    ) -> WarmupResult<Self> {
        let base_dir = std::env::current_dir().map_err(|source| WarmupError::PathResolution {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self {
            mount_root,
            base_dir,
            options,
            channel,
            progress,
            pending: Vec::new(),
            report: WarmupReport {
                mount_root: Some(mount_root.to_path_buf()),
                background: options.background,
                ..Default::default()
            },
        })
    }

    /// Queue one input path, sending the batch if it is now full.
    ///
    /// Paths outside the mount root, or that cannot be framed, are logged and
    /// skipped.
    pub fn push(&mut self, path: &str) -> WarmupResult<()> {
        let absolute = absolutize_from(&self.base_dir, Path::new(path));
        match relative_entry(self.mount_root, &absolute) {
            Ok(entry) => self.pending.push(entry),
            Err(reason) => {
                warn!("Path {} is skipped: {}", path, reason);
                self.report.skipped += 1;
                return Ok(());
            }
        }

        if self.pending.len() >= self.options.effective_capacity() {
            self.flush()?;
        }
        Ok(())
    }

    /// Send whatever is left and return the totals.
    pub fn finish(mut self) -> WarmupResult<WarmupReport> {
        self.flush()?;
        Ok(self.report)
    }

    fn flush(&mut self) -> WarmupResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let entries = mem::take(&mut self.pending);
        let count = entries.len() as u64;
        let request = FillCacheRequest::new(entries, self.options.threads, self.options.background)?;
        send_fill_cache(&mut *self.channel, &request)?;

        self.report.batches += 1;
        self.report.warmed += count;
        self.progress.advance(count);
        Ok(())
    }
}

/// Send every path in `paths` under `mount_root` through `channel`.
///
/// Batches go out strictly in input order; in synchronous mode each reply is
/// read before the next batch is written. The first fatal error stops the run.
pub fn run<C>(
    paths: &[String],
    mount_root: &Path,
    options: &WarmupOptions,
    channel: &mut C,
    progress: &dyn ProgressSink,
) -> WarmupResult<WarmupReport>
where
    C: Read + Write + ?Sized,
{
    let mut batcher = Batcher::new(mount_root, options, channel, progress)?;
    for path in paths {
        batcher.push(path)?;
    }
    batcher.finish()
}
