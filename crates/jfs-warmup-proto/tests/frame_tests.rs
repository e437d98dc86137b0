// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use jfs_warmup_proto::*;
use proptest::prelude::*;

#[jfs_test_utils::logged_test]
fn test_rejects_entry_with_newline() {
    let result = FillCacheRequest::new(vec!["ok".into(), "bad\nname".into()], 50, false);

    assert!(matches!(result, Err(FrameError::EmbeddedNewline { index: 1, .. })));
}

#[jfs_test_utils::logged_test]
fn test_rejects_empty_batch() {
    let result = FillCacheRequest::new(Vec::new(), 50, false);

    assert_eq!(result, Err(FrameError::EmptyBatch));
}

#[jfs_test_utils::logged_test]
fn test_full_batch_round_trips() {
    let paths: Vec<String> = (0..MAX_BATCH_ENTRIES).map(|i| format!("dir{}/file{}", i % 17, i)).collect();
    let request = FillCacheRequest::new(paths.clone(), 50, false).unwrap();
    let frame = request.encode().unwrap();
    logger.log(&format!("encoded {} entries into {} bytes", paths.len(), frame.len())).unwrap();

    let decoded = FillCacheRequest::decode(&frame).unwrap();
    assert_eq!(decoded.paths(), paths.as_slice());
    assert_eq!(decoded.threads(), 50);
    assert!(!decoded.background());
}

#[jfs_test_utils::logged_test]
fn test_single_root_entry() {
    let request = FillCacheRequest::new(vec!["/".into()], 8, true).unwrap();
    let frame = request.encode().unwrap();

    assert_eq!(frame.len(), HEADER_LEN + PATH_BLOCK_LEN_FIELD + 1 + TRAILER_LEN);
    assert_eq!(FillCacheRequest::decode(&frame).unwrap(), request);
}

fn entry() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./ -]{1,40}"
}

proptest! {
    #[test]
    fn proptest_payload_length_matches_block(
        paths in proptest::collection::vec(entry(), 1..64),
        threads in any::<u16>(),
        background in any::<bool>(),
    ) {
        let request = FillCacheRequest::new(paths.clone(), threads, background).unwrap();
        let frame = request.encode().unwrap();
        let block = paths.join("\n");

        let mut word = [0u8; 4];
        word.copy_from_slice(&frame[4..8]);
        prop_assert_eq!(u32::from_le_bytes(word) as usize, 4 + 3 + block.len());
        word.copy_from_slice(&frame[8..12]);
        prop_assert_eq!(u32::from_le_bytes(word) as usize, block.len());
        prop_assert_eq!(&frame[12..12 + block.len()], block.as_bytes());
    }

    #[test]
    fn proptest_decode_recovers_batch(
        paths in proptest::collection::vec(entry(), 1..64),
        threads in any::<u16>(),
        background in any::<bool>(),
    ) {
        let request = FillCacheRequest::new(paths.clone(), threads, background).unwrap();
        let decoded = FillCacheRequest::decode(&request.encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.paths(), paths.as_slice());
        prop_assert_eq!(decoded.threads(), threads);
        prop_assert_eq!(decoded.background(), background);
    }
}
