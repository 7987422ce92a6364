//! Test helpers for behavioral specifications.
//!
//! Provides a managed `unilogd` process driven over HTTP with a blocking
//! reqwest client.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

pub use tempfile::TempDir;
pub use unilog_core::test_support::{frontend_entry, info_entry, TEST_TIMESTAMP};
pub use unilog_core::{Level, LogEntry, LogFormatConfig, LoggingConfig, Source};
pub use unilog_writer::{backup_path, format_entry, LogWriter, RecordingFallback};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Path to `unilogd`, building it once if no prior build left one behind.
fn unilogd_binary() -> PathBuf {
    static BINARY: OnceLock<PathBuf> = OnceLock::new();
    BINARY
        .get_or_init(|| {
            let path = binary_path("unilogd");
            if !path.exists() {
                let status = Command::new(env!("CARGO"))
                    .args(["build", "-p", "unilog-daemon", "--bin", "unilogd"])
                    .current_dir(env!("CARGO_MANIFEST_DIR"))
                    .status()
                    .unwrap();
                assert!(status.success(), "failed to build unilogd");
            }
            binary_path("unilogd")
        })
        .clone()
}

/// Returns a Command for the daemon with a scrubbed environment.
pub fn unilogd_cmd() -> Command {
    let mut cmd = Command::new(unilogd_binary());
    cmd.env_clear();
    cmd
}

/// Run `unilogd` with `args` and capture its output.
pub fn run_unilogd(args: &[&str]) -> Output {
    unilogd_cmd().args(args).output().unwrap()
}

/// Writer on `<dir>/unified.log` with a recording fallback.
pub fn writer_in(dir: &TempDir, config: LoggingConfig) -> (Arc<LogWriter>, Arc<RecordingFallback>) {
    let fallback = Arc::new(RecordingFallback::new());
    let config = LoggingConfig {
        log_file_path: dir.path().join("unified.log"),
        ..config
    };
    (
        Arc::new(LogWriter::with_fallback(config, fallback.clone())),
        fallback,
    )
}

pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Poll `condition` until it holds or the spec deadline passes.
pub fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(SPEC_WAIT_MAX_MS);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(SPEC_POLL_INTERVAL_MS));
    }
    condition()
}

/// Reserve an unused loopback port.
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A running daemon bound to a loopback port, killed on drop.
pub struct Daemon {
    child: Child,
    client: reqwest::blocking::Client,
    addr: SocketAddr,
    log_path: PathBuf,
    _dir: TempDir,
}

impl Daemon {
    /// Start the daemon with its log file and config inside a temp dir.
    pub fn start() -> Self {
        Self::start_with(&[])
    }

    /// Start with extra environment variables.
    pub fn start_with(env: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let port = free_port();
        let log_path = dir.path().join("logs").join("unified.log");

        let mut cmd = unilogd_cmd();
        cmd.env("UNILOG_CONFIG", dir.path().join("logging.json"))
            .env("LOG_FILE_PATH", &log_path)
            .env("API_HOST", "127.0.0.1")
            .env("API_PORT", port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        for (key, value) in env {
            cmd.env(key, value);
        }
        let child = cmd.spawn().unwrap();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(SPEC_WAIT_MAX_MS))
            .build()
            .unwrap();
        let daemon = Self {
            child,
            client,
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            log_path,
            _dir: dir,
        };
        assert!(
            wait_for(|| daemon.try_get("/health").is_some()),
            "daemon did not become healthy"
        );
        daemon
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    pub fn get(&self, path: &str) -> HttpResponse {
        self.try_get(path).unwrap()
    }

    pub fn post_json(&self, path: &str, body: &str) -> HttpResponse {
        let response = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .unwrap();
        HttpResponse::read(response).unwrap()
    }

    fn try_get(&self, path: &str) -> Option<HttpResponse> {
        let response = self.client.get(self.url(path)).send().ok()?;
        HttpResponse::read(response).ok()
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Status and JSON body of a response.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl HttpResponse {
    fn read(response: reqwest::blocking::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        let body = response.json()?;
        Ok(Self { status, body })
    }
}
