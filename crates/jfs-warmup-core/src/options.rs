// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use jfs_warmup_proto::MAX_BATCH_ENTRIES;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_THREADS: u16 = 50;

/// Execution parameters passed to the service with every batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupOptions {
    /// Worker count the service should use internally.
    pub threads: u16,
    /// Fire-and-forget: do not wait for a status byte.
    pub background: bool,
    /// Entries per request; clamped to `1..=MAX_BATCH_ENTRIES`.
    pub batch_capacity: usize,
}

impl Default for WarmupOptions {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            background: false,
            batch_capacity: MAX_BATCH_ENTRIES,
        }
    }
}

impl WarmupOptions {
    pub fn effective_capacity(&self) -> usize {
        self.batch_capacity.clamp(1, MAX_BATCH_ENTRIES)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    pub mount_root: Option<PathBuf>,
    pub batches: usize,
    pub warmed: u64,
    pub skipped: u64,
    pub background: bool,
}

impl WarmupReport {
    pub fn is_noop(&self) -> bool {
        self.batches == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped_to_protocol_limit() {
        let mut options = WarmupOptions::default();
        assert_eq!(options.effective_capacity(), MAX_BATCH_ENTRIES);

        options.batch_capacity = 0;
        assert_eq!(options.effective_capacity(), 1);

        options.batch_capacity = MAX_BATCH_ENTRIES * 2;
        assert_eq!(options.effective_capacity(), MAX_BATCH_ENTRIES);
    }
}
