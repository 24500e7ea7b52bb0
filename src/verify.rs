// src/verify.rs
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::probe::HttpClient;

/// The well-known repository metadata files probed under each candidate base
/// path. Each carries the content check that separates the genuine file from
/// a soft-404 page served with status 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GitArtifact {
    Head,
    Config,
    Index,
    Description,
}

/// Probe order within a base path.
pub const GIT_ARTIFACTS: [GitArtifact; 4] = [
    GitArtifact::Head,
    GitArtifact::Config,
    GitArtifact::Index,
    GitArtifact::Description,
];

impl GitArtifact {
    pub fn file_name(&self) -> &'static str {
        match self {
            GitArtifact::Head => "HEAD",
            GitArtifact::Config => "config",
            GitArtifact::Index => "index",
            GitArtifact::Description => "description",
        }
    }

    /// Content signature check. Status 200 alone means nothing on servers
    /// with custom error handlers; only a matching body confirms exposure.
    pub fn matches(&self, body: &[u8]) -> bool {
        match self {
            GitArtifact::Head => String::from_utf8_lossy(body).contains("ref:"),
            GitArtifact::Config => String::from_utf8_lossy(body).contains("[core]"),
            GitArtifact::Description => {
                String::from_utf8_lossy(body).contains("Unnamed repository")
            }
            GitArtifact::Index => body.starts_with(b"DIRC"),
        }
    }
}

/// A confirmed exposure: the URL that served a genuine metadata file and the
/// artifact whose signature matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposureFinding {
    pub url: String,
    pub artifact: GitArtifact,
}

/// Candidate `.git/` base paths for a target, most specific first. Theme
/// paths only exist when fingerprinting produced a theme; the root path is
/// always probed.
pub fn candidate_paths(theme: Option<&str>) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(theme) = theme {
        paths.push(format!("/wp-content/themes/{}/.git/", theme));
        paths.push(format!("/themes/{}/.git/", theme));
    }
    paths.push("/.git/".to_string());
    paths
}

/// Probe every (base path, artifact) combination under `base_url`, with
/// redirects disabled. The first confirmed hit ends the search unless
/// `exhaustive` is set, in which case every confirmed exposure is returned.
/// Transport errors on one candidate skip to the next.
pub async fn verify_exposure(
    client: &HttpClient,
    base_url: &str,
    theme: Option<&str>,
    exhaustive: bool,
) -> Vec<ExposureFinding> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(err) => {
            debug!("unparsable base URL {}: {}", base_url, err);
            return Vec::new();
        }
    };

    let mut findings = Vec::new();
    for path in candidate_paths(theme) {
        for artifact in GIT_ARTIFACTS {
            let url = match base.join(&format!("{}{}", path, artifact.file_name())) {
                Ok(url) => url,
                Err(_) => continue,
            };

            match client.get_raw(url.as_str()).await {
                Ok((status, body)) if status == StatusCode::OK => {
                    if artifact.matches(&body) {
                        info!("exposed {} at {}", artifact.file_name(), url);
                        findings.push(ExposureFinding {
                            url: url.into(),
                            artifact,
                        });
                        if !exhaustive {
                            return findings;
                        }
                    } else {
                        // 200 without the signature: soft-404, not exposure.
                        debug!("{} served 200 without {} signature", url, artifact.file_name());
                    }
                }
                Ok((status, _)) => debug!("GET {} -> {}", url, status),
                Err(err) => debug!("GET {} failed: {}", url, err),
            }
        }
    }
    findings
}
