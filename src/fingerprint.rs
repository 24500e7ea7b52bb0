// src/fingerprint.rs
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::probe::HttpClient;

/// Theme extraction patterns, tried in priority order against the raw page
/// body: WordPress asset paths first, then generic theme paths, then the
/// template field some CMS APIs leak in inline JSON.
static THEME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/wp-content/themes/([^/]+)/",
        r"/themes/([^/]+)/",
        r#""template":"([^"]+)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid theme pattern"))
    .collect()
});

/// Extract a theme name from a page body. First pattern with a capture wins.
pub fn extract_theme(body: &str) -> Option<String> {
    THEME_PATTERNS.iter().find_map(|re| {
        re.captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// GET the site root and fingerprint its theme. Failure is non-fatal: a
/// target without a fingerprint still gets the root-level exposure check.
pub async fn detect_theme(client: &HttpClient, base_url: &str) -> Option<String> {
    match client.get_text(base_url).await {
        Ok(body) => extract_theme(&body),
        Err(err) => {
            debug!("GET {} failed: {}", base_url, err);
            None
        }
    }
}
