// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Fill-cache request frame and status reply
//!
//! A request frame is laid out as follows, all integers little-endian:
//!
//! ```text
//! [u32] command code      FILL_CACHE
//! [u32] payload length    4 + 3 + len(path block)
//! [u32] path-block length len(path block)
//! [..]  path block        entries joined by '\n'
//! [u16] thread count
//! [u8]  background flag   1 = fire-and-forget
//! ```
//!
//! The inner path-block length repeats what the payload length already
//! implies. The service checks both, so it stays on the wire.

use crate::validation::{validate_batch, FrameError};
use crate::{
    ENTRY_SEPARATOR, FILL_CACHE, HEADER_LEN, PATH_BLOCK_LEN_FIELD, TRAILER_LEN,
};

/// One batch of paths to warm, plus execution parameters for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillCacheRequest {
    paths: Vec<String>,
    threads: u16,
    background: bool,
}

impl FillCacheRequest {
    /// Build a request, validating every entry.
    pub fn new(paths: Vec<String>, threads: u16, background: bool) -> Result<Self, FrameError> {
        validate_batch(&paths)?;
        Ok(Self {
            paths,
            threads,
            background,
        })
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn threads(&self) -> u16 {
        self.threads
    }

    pub fn background(&self) -> bool {
        self.background
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path block as sent on the wire.
    pub fn path_block(&self) -> String {
        let mut block = String::with_capacity(self.paths.iter().map(|p| p.len() + 1).sum());
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                block.push(ENTRY_SEPARATOR);
            }
            block.push_str(path);
        }
        block
    }

    /// Serialize into a complete frame, ready for a single write.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        let block = self.path_block();
        let payload_len = PATH_BLOCK_LEN_FIELD + TRAILER_LEN + block.len();
        let payload_len_u32 =
            u32::try_from(payload_len).map_err(|_| FrameError::PathBlockTooLarge(block.len()))?;

        let mut buffer = Vec::with_capacity(HEADER_LEN + payload_len);
        buffer.extend_from_slice(&FILL_CACHE.to_le_bytes());
        buffer.extend_from_slice(&payload_len_u32.to_le_bytes());
        // Fits: it is smaller than payload_len.
        buffer.extend_from_slice(&(block.len() as u32).to_le_bytes());
        buffer.extend_from_slice(block.as_bytes());
        buffer.extend_from_slice(&self.threads.to_le_bytes());
        buffer.push(u8::from(self.background));
        Ok(buffer)
    }

    /// Parse and re-validate a frame the way the receiving service does.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let minimum = HEADER_LEN + PATH_BLOCK_LEN_FIELD + TRAILER_LEN;
        if bytes.len() < minimum {
            return Err(FrameError::Truncated {
                expected: minimum,
                actual: bytes.len(),
            });
        }

        let command = read_u32(bytes, 0);
        if command != FILL_CACHE {
            return Err(FrameError::UnknownCommand(command));
        }

        let payload = read_u32(bytes, 4) as usize;
        let actual = bytes.len() - HEADER_LEN;
        if payload != actual {
            return Err(FrameError::PayloadLengthMismatch {
                declared: payload,
                actual,
            });
        }

        let block_len = read_u32(bytes, HEADER_LEN) as usize;
        if block_len + PATH_BLOCK_LEN_FIELD + TRAILER_LEN != payload {
            return Err(FrameError::PathBlockLengthMismatch {
                declared: block_len,
                payload,
            });
        }

        let block_start = HEADER_LEN + PATH_BLOCK_LEN_FIELD;
        let block_end = block_start + block_len;
        let block =
            std::str::from_utf8(&bytes[block_start..block_end]).map_err(|_| FrameError::InvalidUtf8)?;

        let mut threads_bytes = [0u8; 2];
        threads_bytes.copy_from_slice(&bytes[block_end..block_end + 2]);
        let threads = u16::from_le_bytes(threads_bytes);

        let background = match bytes[block_end + 2] {
            0 => false,
            1 => true,
            other => return Err(FrameError::InvalidBackgroundFlag(other)),
        };

        let paths = block.split(ENTRY_SEPARATOR).map(str::to_string).collect();
        Self::new(paths, threads, background)
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Status byte returned by the service for a synchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed(u8),
}

impl Status {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Status::Ok,
            code => Status::Failed(code),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Failed(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}
