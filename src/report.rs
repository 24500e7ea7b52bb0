// src/report.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::target::Scheme;
use crate::verify::ExposureFinding;

/// Terminal state of one target's scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// At least one metadata file confirmed exposed.
    Vulnerable,
    /// Host scanned, nothing confirmed.
    NotVulnerable,
    /// DNS did not resolve; no HTTP traffic was sent.
    SkippedNoDns,
}

/// Result of one target's full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub outcome: TargetOutcome,
    /// Theme fingerprinted from the site root, when any scheme was reachable.
    pub theme: Option<String>,
    /// Scheme whose base URL produced the confirmed findings.
    pub scheme: Option<Scheme>,
    pub findings: Vec<ExposureFinding>,
    pub duration_ms: u64,
}

impl TargetReport {
    /// One-line human-readable status for the console stream.
    pub fn status_line(&self) -> String {
        match self.outcome {
            TargetOutcome::SkippedNoDns => format!("{}: DNS does not resolve, skipped", self.target),
            TargetOutcome::NotVulnerable => format!("{}: no exposed repository", self.target),
            TargetOutcome::Vulnerable => {
                let urls: Vec<&str> = self.findings.iter().map(|f| f.url.as_str()).collect();
                format!("{}: VULNERABLE {}", self.target, urls.join(" "))
            }
        }
    }
}

/// Aggregate over a whole scan run; serialized as the JSON report.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub results: Vec<TargetReport>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: TargetReport) {
        self.results.push(result);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Every confirmed exposure URL across all targets, for programmatic use.
    pub fn exposed_urls(&self) -> Vec<&str> {
        self.results
            .iter()
            .flat_map(|r| r.findings.iter())
            .map(|f| f.url.as_str())
            .collect()
    }

    pub fn count(&self, outcome: TargetOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}
