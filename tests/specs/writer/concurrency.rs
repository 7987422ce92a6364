//! Concurrent writers sharing one log file.

use crate::prelude::*;

#[test]
fn concurrent_writes_keep_lines_whole() {
    let dir = tempfile::tempdir().unwrap();
    let (writer, fallback) = writer_in(&dir, LoggingConfig::default());

    let handles: Vec<_> = (0..10)
        .map(|thread| {
            let writer = std::sync::Arc::clone(&writer);
            std::thread::spawn(move || {
                for i in 0..50 {
                    writer.write_entry(&info_entry(&format!("thread {thread} entry {i}")));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = std::fs::read_to_string(writer.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 500);
    for line in &lines {
        assert!(line.starts_with("[2025-01-14T10:30:00.000Z] [INFO] [FRONTEND] thread "));
    }
    for thread in 0..10 {
        let prefix = format!("thread {thread} entry ");
        let order: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.split_once(&prefix).map(|(_, i)| i.parse().unwrap()))
            .collect();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }
    assert!(fallback.is_empty());
}

#[test]
fn concurrent_batches_are_not_interleaved() {
    let dir = tempfile::tempdir().unwrap();
    let (writer, _) = writer_in(&dir, LoggingConfig::default());

    let handles: Vec<_> = (0..10)
        .map(|thread| {
            let writer = std::sync::Arc::clone(&writer);
            std::thread::spawn(move || {
                let batch: Vec<LogEntry> = (0..20)
                    .map(|i| info_entry(&format!("batch {thread} line {i}")))
                    .collect();
                writer.write_batch(&batch).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = std::fs::read_to_string(writer.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 200);
    for chunk in lines.chunks(20) {
        let owner = chunk[0].split("batch ").nth(1).unwrap().split(' ').next().unwrap();
        for (i, line) in chunk.iter().enumerate() {
            assert!(line.ends_with(&format!("batch {owner} line {i}")), "{}", line);
        }
    }
}
