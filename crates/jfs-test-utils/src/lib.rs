// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Test logging helpers for the jfs-warmup workspace
//!
//! Every test wrapped in [`logged_test`] writes its diagnostics to a unique
//! file under `target/test-logs/<date>/`. Passing tests print a single line;
//! failing tests print the log path and size.

extern crate self as jfs_test_utils;

pub mod guard;
pub mod logging;

pub use guard::TestLoggerGuard;
pub use jfs_test_utils_macros::logged_test;
pub use logging::{create_unique_test_log, TestLogError, TestLogger};
