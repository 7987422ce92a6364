//! End-to-end ingestion through a running daemon.

use crate::prelude::*;

const TWO_ENTRIES: &str = r#"{"entries":[
    {"timestamp":"2025-01-14T10:30:00.000Z","level":"info","message":"User clicked button","source":"frontend","component":"popup","context":{"buttonId":"submit"}},
    {"timestamp":"2025-01-14T10:30:01.000Z","level":"error","message":"Exception occurred","source":"frontend","stackTrace":"Error: boom\n    at popup.js:10:5"}
]}"#;

#[test]
fn health_and_root_respond() {
    let daemon = Daemon::start();

    let health = daemon.get("/health");
    assert_eq!(health.status, 200);
    assert_eq!(health.body["status"], "healthy");
    assert_eq!(health.body["service"], "unified-logging-api");

    let root = daemon.get("/");
    assert_eq!(root.status, 200);
    assert_eq!(root.body["message"], "Unified Logging API");
}

#[test]
fn startup_is_recorded_as_backend_entry() {
    let daemon = Daemon::start();

    assert!(wait_for(|| daemon
        .log_contents()
        .contains("[INFO] [BACKEND] [STARTUP] Loading Unified Logging API")));
}

#[test]
fn posted_batch_lands_in_log_file() {
    let daemon = Daemon::start();

    let response = daemon.post_json("/api/logs", TWO_ENTRIES);

    assert_eq!(response.status, 200);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["processed_count"], 2);

    let contents = daemon.log_contents();
    assert!(contents.contains(
        r#"[2025-01-14T10:30:00.000Z] [INFO] [FRONTEND] [POPUP] User clicked button {"buttonId":"submit"}"#
    ));
    assert!(contents.contains(
        "[2025-01-14T10:30:01.000Z] [ERROR] [FRONTEND] Exception occurred\nError: boom\n    at popup.js:10:5\n"
    ));
}

#[test]
fn rejected_batches_are_not_written() {
    let daemon = Daemon::start();

    let empty = daemon.post_json("/api/logs", r#"{"entries":[]}"#);
    assert_eq!(empty.status, 400);
    assert_eq!(empty.body["message"], "No log entries provided");

    let bad_level = daemon.post_json(
        "/api/logs",
        r#"{"entries":[{"timestamp":"t","level":"loud","message":"m","source":"frontend"}]}"#,
    );
    assert_eq!(bad_level.status, 422);

    let no_timestamp = daemon.post_json(
        "/api/logs",
        r#"{"entries":[{"level":"info","message":"m","source":"frontend"}]}"#,
    );
    assert_eq!(no_timestamp.status, 400);
    assert_eq!(no_timestamp.body["message"], "Entry 0: timestamp is required");

    assert!(!daemon.log_contents().contains("[FRONTEND]"));
}

#[test]
fn log_level_gates_backend_diagnostics_only() {
    let daemon = Daemon::start_with(&[("LOG_LEVEL", "ERROR")]);

    let response = daemon.post_json(
        "/api/logs",
        r#"{"entries":[{"timestamp":"t","level":"debug","message":"still kept","source":"frontend"}]}"#,
    );

    assert_eq!(response.status, 200);
    let contents = daemon.log_contents();
    assert!(contents.contains("[DEBUG] [FRONTEND] still kept"), "{}", contents);
    assert!(!contents.contains("[STARTUP]"), "{}", contents);
}
