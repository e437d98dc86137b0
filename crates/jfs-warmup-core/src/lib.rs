// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client side of JuiceFS cache warm-up
//!
//! Finds the mount that owns the requested paths, opens its control file and
//! streams the paths to the JuiceFS client as fill-cache requests.

pub mod batcher;
pub mod control;
pub mod error;
pub mod mount;
pub mod options;
pub mod paths;

pub use batcher::{run, Batcher, ProgressSink};
pub use control::{open_control_file, send_fill_cache, CONTROL_FILE_NAMES};
pub use error::{SkipReason, WarmupError, WarmupResult};
pub use mount::{resolve_mount_root, InodeLookup, NixInodeLookup, ROOT_INODE};
pub use options::{WarmupOptions, WarmupReport, DEFAULT_THREADS};
pub use paths::collect_paths;

use std::path::Path;
use tracing::info;

/// Warm up `paths` on the JuiceFS mount containing the first of them.
pub fn warm_up(
    paths: &[String],
    options: &WarmupOptions,
    progress: &dyn ProgressSink,
) -> WarmupResult<WarmupReport> {
    warm_up_with(&NixInodeLookup, paths, options, progress)
}

pub fn warm_up_with(
    lookup: &dyn InodeLookup,
    paths: &[String],
    options: &WarmupOptions,
    progress: &dyn ProgressSink,
) -> WarmupResult<WarmupReport> {
    let Some(first) = paths.first() else {
        info!("Nothing to warm up");
        return Ok(WarmupReport::default());
    };

    let mount_root = resolve_mount_root(Path::new(first), lookup)?;
    let mut controller = open_control_file(&mount_root)?;
    let report = run(paths, &mount_root, options, &mut controller, progress)?;

    if report.is_noop() {
        info!("Nothing to warm up under {}", mount_root.display());
    } else {
        info!(
            mount_root = %mount_root.display(),
            batches = report.batches,
            skipped = report.skipped,
            "Warmed up {} paths",
            report.warmed
        );
    }
    Ok(report)
}
