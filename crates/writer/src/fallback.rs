// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band channel for failures of the unified log itself.
//!
//! Nothing reported here may be written back into the unified file, or a
//! failing disk would feed on its own diagnostics.

use std::io::Write;

/// Tracing target for fallback diagnostics. Lives under the crate's own
/// target prefix, which layers forwarding into the unified file skip.
pub const FALLBACK_TARGET: &str = "unilog_writer::fallback";

/// Sink for writer failures.
pub trait Fallback: Send + Sync {
    fn report(&self, message: &str);
}

/// Writes each report as one line on the process stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrFallback;

impl Fallback for StderrFallback {
    fn report(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "unilog: {}", message);
    }
}

/// Emits each report as a tracing error under [`FALLBACK_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFallback;

impl Fallback for TracingFallback {
    fn report(&self, message: &str) {
        tracing::error!(target: FALLBACK_TARGET, "{}", message);
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingFallback;

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::Fallback;
    use parking_lot::Mutex;

    /// Captures reports for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingFallback {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingFallback {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().clone()
        }

        pub fn is_empty(&self) -> bool {
            self.messages.lock().is_empty()
        }
    }

    impl Fallback for RecordingFallback {
        fn report(&self, message: &str) {
            self.messages.lock().push(message.to_string());
        }
    }
}
