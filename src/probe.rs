/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use trust_dns_resolver::config::*;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::{ScanConfig, WILDCARD_PROBES};
use crate::domain::Domain;
use crate::wildcard;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("lookup failed: {0}")]
    Lookup(#[from] ResolveError),
}

pub type ProbeResult = Result<bool, ProbeError>;

/// Liveness check for a single hostname.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn resolve(&self, host: &str) -> ProbeResult;

    /// Called once per domain before its candidates are probed.
    async fn prepare(&self, _domain: &Domain) {}
}

/// A/AAAA lookups against public or user-supplied nameservers.
///
/// Lookups rotate across the configured upstreams. With wildcard filtering
/// enabled, `prepare` records the domain's wildcard answers and hosts that
/// resolve into them count as not resolving; the probe then serves one domain
/// at a time.
pub struct DnsProbe {
    resolvers: Vec<Arc<TokioAsyncResolver>>,
    next: AtomicUsize,
    filter_wildcard: bool,
    wildcard: RwLock<HashSet<IpAddr>>,
    timeout: Duration,
}

fn create_resolver(config: ResolverConfig, timeout: Duration, attempts: usize) -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = attempts;
    opts.cache_size = 1024;
    opts.use_hosts_file = false;
    opts.preserve_intermediates = false;
    opts.num_concurrent_reqs = 2;
    TokioAsyncResolver::tokio(config, opts)
}

fn nameserver_config(addr: SocketAddr) -> ResolverConfig {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig {
        socket_addr: addr,
        protocol: Protocol::Udp,
        tls_dns_name: None,
        trust_negative_responses: false,
        bind_addr: None,
    });
    config
}

impl DnsProbe {
    pub fn new(config: &ScanConfig) -> Self {
        let upstreams: Vec<ResolverConfig> = if config.nameservers.is_empty() {
            vec![
                ResolverConfig::cloudflare(),
                ResolverConfig::google(),
                ResolverConfig::quad9(),
            ]
        } else {
            config.nameservers.iter().copied().map(nameserver_config).collect()
        };

        let resolvers = upstreams
            .into_iter()
            .map(|upstream| Arc::new(create_resolver(upstream, config.dns_timeout, config.dns_attempts)))
            .collect();

        Self {
            resolvers,
            next: AtomicUsize::new(0),
            filter_wildcard: config.filter_wildcard,
            wildcard: RwLock::new(HashSet::new()),
            timeout: config.dns_timeout,
        }
    }

    pub fn upstreams(&self) -> usize {
        self.resolvers.len()
    }

    fn pick(&self) -> &Arc<TokioAsyncResolver> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.resolvers.len();
        &self.resolvers[idx]
    }
}

#[async_trait]
impl Probe for DnsProbe {
    async fn resolve(&self, host: &str) -> ProbeResult {
        let lookup = match self.pick().lookup_ip(host).await {
            Ok(lookup) => lookup,
            Err(err) => {
                return match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(false),
                    _ => Err(ProbeError::Lookup(err)),
                };
            }
        };

        let ips: Vec<IpAddr> = lookup.iter().collect();
        if ips.is_empty() {
            return Ok(false);
        }
        if self.filter_wildcard && wildcard::is_wildcard_hit(&ips, &*self.wildcard.read().await) {
            debug!(host, "dropping wildcard answer");
            return Ok(false);
        }
        Ok(true)
    }

    async fn prepare(&self, domain: &Domain) {
        if !self.filter_wildcard {
            return;
        }
        let detected = wildcard::detect(self.pick(), domain, WILDCARD_PROBES, self.timeout).await;
        *self.wildcard.write().await = detected;
    }
}
