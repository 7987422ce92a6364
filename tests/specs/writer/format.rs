//! Line format as seen in the file.

use crate::prelude::*;
use unilog_core::Context;

fn written_lines(config: LoggingConfig, entries: &[LogEntry]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let (writer, _) = writer_in(&dir, config);
    writer.write_batch(entries).unwrap();
    std::fs::read_to_string(writer.path()).unwrap()
}

#[test]
fn default_format_matches_reference() {
    let mut context = Context::new();
    context.insert("key", "value");
    let entry = frontend_entry(Level::Debug, "Debug message")
        .with_component("logger")
        .with_context(context);

    similar_asserts::assert_eq!(
        written_lines(LoggingConfig::default(), &[entry]),
        "[2025-01-14T10:30:00.000Z] [DEBUG] [FRONTEND] [LOGGER] Debug message {\"key\":\"value\"}\n"
    );
}

#[test]
fn stripped_format_keeps_level_and_message() {
    let config = LoggingConfig {
        format_config: LogFormatConfig {
            include_timestamp: false,
            include_source: false,
            include_context: false,
            ..LogFormatConfig::default()
        },
        ..LoggingConfig::default()
    };
    let entry = info_entry("plain")
        .with_component("popup")
        .with_context_value("ignored", true);

    similar_asserts::assert_eq!(written_lines(config, &[entry]), "[INFO] [POPUP] plain\n");
}

#[test]
fn long_messages_are_truncated_by_default() {
    let entry = info_entry(&"a".repeat(1500));
    let contents = written_lines(LoggingConfig::default(), &[entry]);
    let expected = format!(
        "[2025-01-14T10:30:00.000Z] [INFO] [FRONTEND] {}...\n",
        "a".repeat(1000)
    );
    similar_asserts::assert_eq!(contents, expected);
}
