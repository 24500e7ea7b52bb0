// src/target.rs
use std::path::Path;

use serde::Serialize;

use crate::error::ScanError;

/// Probe scheme, tried HTTPS-first with a one-way fallback to HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// A single scannable host, normalized from one line of caller input.
///
/// Normalization strips surrounding whitespace, wildcard scope prefixes
/// (`*.example.com` collapses to `example.com`), any explicit scheme, and
/// any path component. The scanner decides schemes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
}

impl Target {
    /// Parse one raw input line. Blank lines, comments and lines with no
    /// usable hostname yield `None` and are silently skipped.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().to_ascii_lowercase();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let mut host = trimmed.replace("*.", "");
        for scheme in ["https://", "http://"] {
            if let Some(rest) = host.strip_prefix(scheme) {
                host = rest.to_string();
                break;
            }
        }
        let host = host.split('/').next().unwrap_or_default().to_string();

        if host.is_empty() {
            None
        } else {
            Some(Self { host })
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Base URL for this target under the given scheme.
    pub fn url_for(&self, scheme: Scheme) -> String {
        format!("{}://{}", scheme.as_str(), self.host)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.host)
    }
}

/// Load a newline-delimited target list. Unusable lines are dropped, not
/// errors; only a missing or unreadable file is fatal.
pub fn load_targets(path: &Path) -> Result<Vec<Target>, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::TargetFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().filter_map(Target::parse).collect())
}
