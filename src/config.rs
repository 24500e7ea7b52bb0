// src/config.rs
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-request timeout applied to every outbound HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default size of the scan worker pool.
pub const DEFAULT_WORKERS: usize = 5;

/// Browser-like user agent; some hosts serve different content (or nothing)
/// to requests that identify as tooling.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Scan tunables, fixed at startup and shared read-only across workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of targets scanned concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Keep probing after the first confirmed exposure and report them all.
    #[serde(default)]
    pub exhaustive: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workers: DEFAULT_WORKERS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            exhaustive: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults; CLI flags are merged on top by the caller.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
