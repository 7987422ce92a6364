//! Size-based rotation against a real file.

use crate::prelude::*;

fn untruncated(max_file_size_mb: u64, rotation_count: u32) -> LoggingConfig {
    LoggingConfig {
        max_file_size_mb,
        rotation_count,
        format_config: LogFormatConfig {
            max_message_length: None,
            ..LogFormatConfig::default()
        },
        ..LoggingConfig::default()
    }
}

#[test]
fn many_large_entries_rotate_once_without_losing_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let config = untruncated(1, 2);
    let (writer, fallback) = writer_in(&dir, config.clone());
    let message = "x".repeat(10 * 1024);
    let entry = info_entry(&message);
    let line_len = format_entry(&entry, &config.format_config).unwrap().len() as u64 + 1;

    for _ in 0..150 {
        writer.write_entry(&entry);
    }

    let active = writer.path();
    let first = backup_path(&active, 1);
    assert!(active.exists());
    assert!(first.exists());
    assert!(!backup_path(&active, 2).exists());
    assert!(file_size(&first) > 1024 * 1024);
    assert_eq!(file_size(&active) + file_size(&first), 150 * line_len);
    assert!(fallback.is_empty(), "{:?}", fallback.messages());
}

#[test]
fn backups_never_exceed_rotation_count() {
    let dir = tempfile::tempdir().unwrap();
    let (writer, _) = writer_in(&dir, untruncated(1, 2));
    let entry = info_entry(&"y".repeat(100 * 1024));

    for _ in 0..60 {
        writer.write_entry(&entry);
    }

    let active = writer.path();
    assert!(backup_path(&active, 1).exists());
    assert!(backup_path(&active, 2).exists());
    assert!(!backup_path(&active, 3).exists());
    assert!(file_size(&active) <= 1024 * 1024 + 100 * 1024 + 64);
}

#[test]
fn zero_rotation_count_discards_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let (writer, _) = writer_in(&dir, untruncated(1, 0));
    let entry = info_entry(&"z".repeat(100 * 1024));

    for _ in 0..11 {
        writer.write_entry(&entry);
    }

    let active = writer.path();
    assert!(!active.exists());
    assert!(!backup_path(&active, 1).exists());

    writer.write_entry(&info_entry("fresh start"));
    assert!(std::fs::read_to_string(&active)
        .unwrap()
        .ends_with("[INFO] [FRONTEND] fresh start\n"));
}
