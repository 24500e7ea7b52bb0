// src/resolver.rs
use tokio::net::lookup_host;
use tracing::debug;

/// DNS existence gate, run before any HTTP traffic is spent on a target.
/// NXDOMAIN, SERVFAIL and local resolver failures are all the same answer
/// here: the host is not scannable. No retry, no timeout beyond the system
/// resolver's own.
pub async fn resolve(host: &str) -> bool {
    // Targets may carry an explicit port; the lookup only needs the name.
    let name = match host.rsplit_once(':') {
        Some((name, port)) if port.parse::<u16>().is_ok() => name,
        _ => host,
    };
    match lookup_host((name, 443)).await {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(err) => {
            debug!("DNS lookup failed for {}: {}", host, err);
            false
        }
    }
}
