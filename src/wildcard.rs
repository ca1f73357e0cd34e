/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;
use trust_dns_resolver::TokioAsyncResolver;
use uuid::Uuid;

use crate::domain::Domain;

/// Addresses a domain hands out for labels that cannot exist.
///
/// Resolves `probes` random UUID labels under `domain`; whatever comes back is
/// the wildcard answer set. Empty when the zone has no wildcard record.
pub async fn detect(
    resolver: &Arc<TokioAsyncResolver>,
    domain: &Domain,
    probes: usize,
    timeout: Duration,
) -> HashSet<IpAddr> {
    let lookups = (0..probes).map(|_| {
        let label = format!("{}.{}", Uuid::new_v4(), domain);
        let resolver = Arc::clone(resolver);
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, resolver.lookup_ip(label.as_str())).await {
                Ok(Ok(lookup)) => lookup.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            }
        })
    });

    let ips: HashSet<IpAddr> = join_all(lookups)
        .await
        .into_iter()
        .filter_map(Result::ok)
        .flatten()
        .collect();

    if !ips.is_empty() {
        debug!(domain = %domain, addresses = ips.len(), "wildcard DNS detected");
    }
    ips
}

/// True when any of `ips` is one of the wildcard answers.
pub fn is_wildcard_hit(ips: &[IpAddr], wildcard: &HashSet<IpAddr>) -> bool {
    !wildcard.is_empty() && ips.iter().any(|ip| wildcard.contains(ip))
}
