// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use indicatif::{ProgressBar, ProgressStyle};
use jfs_warmup_core::ProgressSink;

/// "Warmed up paths" counter on stderr.
pub struct WarmupProgress {
    bar: ProgressBar,
}

impl WarmupProgress {
    pub fn new(total: u64, quiet: bool) -> Self {
        if quiet {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(
            "Warmed up paths: {pos}/{len} [{elapsed_precise}] {bar:40.cyan/blue} {percent}%",
        ) {
            bar.set_style(style.progress_chars("##-"));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for WarmupProgress {
    fn advance(&self, entries: u64) {
        self.bar.inc(entries);
    }
}
