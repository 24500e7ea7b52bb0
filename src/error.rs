// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failure kind for a single network fetch.
///
/// Unreachable hosts are an expected, common outcome across a large target
/// list, so fetch failures are carried as values and mapped to negative
/// probe results at stage boundaries. They never abort a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("TLS handshake failed")]
    Tls,

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        // reqwest folds TLS handshake errors into the connect kind, so the
        // error chain is the only place the distinction survives.
        let detail = err.to_string().to_lowercase();
        if detail.contains("certificate") || detail.contains("tls") || detail.contains("ssl") {
            return FetchError::Tls;
        }
        if err.is_connect() {
            return FetchError::Connect;
        }
        FetchError::Other(err.to_string())
    }
}

/// Errors that can surface to the user before or around a scan. Per-target
/// failures are not represented here: they are local to the target and
/// reported through its scan outcome instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no target supplied: provide a URL (-u) or a target file (-f)")]
    NoInput,

    #[error("failed to read target file {path}: {source}")]
    TargetFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}
