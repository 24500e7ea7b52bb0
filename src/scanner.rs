// src/scanner.rs
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::fingerprint;
use crate::probe::HttpClient;
use crate::report::{ScanReport, TargetOutcome, TargetReport};
use crate::resolver;
use crate::target::{Scheme, Target};
use crate::verify;

/// Runs the per-target pipeline and fans a target list out over a bounded
/// worker pool. Workers share only the read-only config and the HTTP client
/// pool; results flow back over a channel to a single collector.
pub struct Scanner {
    config: Arc<ScanConfig>,
    client: HttpClient,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Full pipeline for one target: DNS gate, then HTTPS and HTTP in that
    /// order. The first scheme that yields a confirmed exposure ends the
    /// scan for the target; HTTPS is never retried after falling back.
    pub async fn scan_target(&self, target: Target) -> TargetReport {
        let started = Instant::now();
        info!("checking {}", target);

        if !resolver::resolve(target.host()).await {
            warn!("{}: DNS does not resolve, skipping", target);
            return TargetReport {
                target: target.host().to_string(),
                outcome: TargetOutcome::SkippedNoDns,
                theme: None,
                scheme: None,
                findings: Vec::new(),
                duration_ms: started.elapsed().as_millis() as u64,
            };
        }

        let mut last_theme = None;
        for scheme in [Scheme::Https, Scheme::Http] {
            let base_url = target.url_for(scheme);
            if !self.client.probe(&base_url).await {
                debug!("{} unreachable", base_url);
                continue;
            }
            info!("scanning {}", base_url);

            let theme = fingerprint::detect_theme(&self.client, &base_url).await;
            match &theme {
                Some(name) => info!("{}: detected theme {}", target, name),
                None => debug!("{}: no theme detected, root check only", target),
            }
            if theme.is_some() {
                last_theme = theme.clone();
            }

            let findings = verify::verify_exposure(
                &self.client,
                &base_url,
                theme.as_deref(),
                self.config.exhaustive,
            )
            .await;

            if !findings.is_empty() {
                return TargetReport {
                    target: target.host().to_string(),
                    outcome: TargetOutcome::Vulnerable,
                    theme,
                    scheme: Some(scheme),
                    findings,
                    duration_ms: started.elapsed().as_millis() as u64,
                };
            }
        }

        TargetReport {
            target: target.host().to_string(),
            outcome: TargetOutcome::NotVulnerable,
            theme: last_theme,
            scheme: None,
            findings: Vec::new(),
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Fan the target list out with bounded concurrency. Each target's whole
    /// pipeline runs inside one task; the collector side prints the status
    /// line and aggregates, so console output stays one line per result.
    pub async fn scan_all(self: Arc<Self>, targets: Vec<Target>) -> ScanReport {
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let (tx, mut rx) = mpsc::channel(self.config.workers.max(1));

        for target in targets {
            let scanner = Arc::clone(&self);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                let result = scanner.scan_target(target).await;
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut report = ScanReport::new();
        while let Some(result) = rx.recv().await {
            info!("{}", result.status_line());
            report.record(result);
        }
        report.finish();
        report
    }
}
