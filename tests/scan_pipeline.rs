// End-to-end pipeline tests against a local plaintext HTTP stub. The HTTPS
// probe fails against the plaintext listener, exercising the scheme fallback
// on every scan.
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use githunt::config::ScanConfig;
use githunt::report::TargetOutcome;
use githunt::scanner::Scanner;
use githunt::target::{Scheme, Target};
use githunt::verify::GitArtifact;

/// Route table: path -> (status, body). The "*" entry, when present, is the
/// fallback instead of a plain 404 (used to imitate soft-404 servers).
type Routes = Vec<(&'static str, u16, &'static [u8])>;

async fn spawn_server(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    match stream.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => {
                            read += n;
                            // A TLS ClientHello on the plaintext port: close
                            // so the HTTPS probe fails fast.
                            if buf[0] == 0x16 {
                                return;
                            }
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                            if read == buf.len() {
                                return;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let mut parts = request.split_whitespace();
                let method = parts.next().unwrap_or("").to_string();
                let path = parts.next().unwrap_or("").to_string();

                let hit = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .or_else(|| routes.iter().find(|(p, _, _)| *p == "*"));
                let (status, body): (u16, &[u8]) = match hit {
                    Some((_, status, body)) => (*status, *body),
                    None => (404, b"not found"),
                };
                let body: &[u8] = if method == "HEAD" { b"" } else { body };

                let reason = match status {
                    200 => "OK",
                    301 => "Moved Permanently",
                    _ => "Not Found",
                };
                let mut head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                    status,
                    reason,
                    body.len()
                );
                if status == 301 {
                    head.push_str("Location: /login\r\n");
                }
                head.push_str("\r\n");

                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(body).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("127.0.0.1:{}", port)
}

fn test_config() -> ScanConfig {
    ScanConfig {
        timeout_secs: 3,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn confirms_exposure_under_theme_path() {
    let host = spawn_server(vec![
        (
            "/",
            200,
            br#"<link rel="stylesheet" href="/wp-content/themes/astra/style.css">"#,
        ),
        (
            "/wp-content/themes/astra/.git/HEAD",
            200,
            b"ref: refs/heads/main\n",
        ),
    ])
    .await;

    let scanner = Scanner::new(test_config()).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.outcome, TargetOutcome::Vulnerable);
    assert_eq!(report.theme.as_deref(), Some("astra"));
    // HTTPS was unreachable on the plaintext listener, so the finding must
    // come from the HTTP base URL.
    assert_eq!(report.scheme, Some(Scheme::Http));
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].artifact, GitArtifact::Head);
    assert_eq!(
        report.findings[0].url,
        format!("http://{}/wp-content/themes/astra/.git/HEAD", host)
    );
}

#[tokio::test]
async fn confirms_root_exposure_without_theme() {
    let host = spawn_server(vec![
        ("/", 200, b"<html><body>nothing to fingerprint</body></html>"),
        (
            "/.git/config",
            200,
            b"[core]\n\trepositoryformatversion = 0\n",
        ),
    ])
    .await;

    let scanner = Scanner::new(test_config()).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.outcome, TargetOutcome::Vulnerable);
    assert_eq!(report.theme, None);
    assert_eq!(report.findings[0].artifact, GitArtifact::Config);
    assert_eq!(report.findings[0].url, format!("http://{}/.git/config", host));
}

#[tokio::test]
async fn soft_404_server_is_not_vulnerable() {
    // Every path answers 200 with a placeholder page; no signature matches,
    // so status code alone must not produce a finding.
    let host = spawn_server(vec![(
        "*",
        200,
        b"<html><head><title>Oops</title></head><body>Page not found</body></html>",
    )])
    .await;

    let scanner = Scanner::new(test_config()).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.outcome, TargetOutcome::NotVulnerable);
    assert!(report.findings.is_empty());
}

#[tokio::test]
async fn redirects_are_not_followed_during_verification() {
    // The redirect target would pass the HEAD signature, but a redirect on
    // the metadata path itself means the file is not served there.
    let host = spawn_server(vec![
        ("/", 200, b"<html>plain</html>"),
        ("/.git/HEAD", 301, b""),
        ("/login", 200, b"ref: refs/heads/main\n"),
    ])
    .await;

    let scanner = Scanner::new(test_config()).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.outcome, TargetOutcome::NotVulnerable);
}

#[tokio::test]
async fn exhaustive_mode_collects_every_confirmed_exposure() {
    let host = spawn_server(vec![
        ("/", 200, b"<html>plain</html>"),
        ("/.git/HEAD", 200, b"ref: refs/heads/main\n"),
        (
            "/.git/config",
            200,
            b"[core]\n\trepositoryformatversion = 0\n",
        ),
    ])
    .await;

    let config = ScanConfig {
        exhaustive: true,
        ..test_config()
    };
    let scanner = Scanner::new(config).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.outcome, TargetOutcome::Vulnerable);
    let artifacts: Vec<GitArtifact> = report.findings.iter().map(|f| f.artifact).collect();
    assert_eq!(artifacts, vec![GitArtifact::Head, GitArtifact::Config]);
}

#[tokio::test]
async fn first_match_wins_by_default() {
    let host = spawn_server(vec![
        ("/", 200, b"<html>plain</html>"),
        ("/.git/HEAD", 200, b"ref: refs/heads/main\n"),
        (
            "/.git/config",
            200,
            b"[core]\n\trepositoryformatversion = 0\n",
        ),
    ])
    .await;

    let scanner = Scanner::new(test_config()).unwrap();
    let report = scanner.scan_target(Target::parse(&host).unwrap()).await;

    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].artifact, GitArtifact::Head);
}
