// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JuiceFS warm-up protocol — fill-cache request frames and status replies
//!
//! This crate defines the binary message a client writes into the control file
//! of a mounted JuiceFS instance to request cache pre-warming, and the single
//! status byte the service answers with.

pub mod messages;
pub mod validation;

pub use messages::{FillCacheRequest, Status};
pub use validation::*;

/// Command code of a fill-cache request.
pub const FILL_CACHE: u32 = 1004;

/// Upper bound on the number of paths carried by one request.
pub const MAX_BATCH_ENTRIES: usize = 10_240;

/// Command code plus outer payload length.
pub const HEADER_LEN: usize = 8;

/// Inner path-block length field.
pub const PATH_BLOCK_LEN_FIELD: usize = 4;

/// Thread count (u16) plus background flag (u8).
pub const TRAILER_LEN: usize = 3;

/// Separator between entries in the path block.
pub const ENTRY_SEPARATOR: char = '\n';
