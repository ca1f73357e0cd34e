/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::cli::Args;
use crate::error::{Error, Result};

pub const DEFAULT_SOURCES: [&str; 3] = ["crtsh", "otx", "bufferover"];
pub const DEFAULT_CONCURRENCY: usize = 100;
pub const SOURCE_TIMEOUT: Duration = Duration::from_secs(15);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DNS_TIMEOUT: Duration = Duration::from_millis(2000);
pub const DNS_ATTEMPTS: usize = 2;
pub const WILDCARD_PROBES: usize = 5;
/// Slack on top of the resolver's own retry budget.
pub const PROBE_MARGIN: Duration = Duration::from_secs(1);

/// Every tunable of a run in one place.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub sources: Vec<String>,
    pub resolve: bool,
    pub concurrency: usize,
    pub source_timeout: Duration,
    pub probe_timeout: Duration,
    pub dns_timeout: Duration,
    pub dns_attempts: usize,
    /// Empty means the built-in public resolvers.
    pub nameservers: Vec<SocketAddr>,
    pub filter_wildcard: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            resolve: false,
            concurrency: DEFAULT_CONCURRENCY,
            source_timeout: SOURCE_TIMEOUT,
            probe_timeout: probe_timeout(DNS_TIMEOUT, DNS_ATTEMPTS),
            dns_timeout: DNS_TIMEOUT,
            dns_attempts: DNS_ATTEMPTS,
            nameservers: Vec::new(),
            filter_wildcard: false,
        }
    }
}

impl ScanConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.threads == 0 {
            return Err(Error::InvalidConcurrency);
        }
        let nameservers = args
            .resolvers
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(parse_nameserver)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sources: source_names(&args.sources),
            resolve: args.resolve,
            concurrency: args.threads,
            source_timeout: Duration::from_secs(args.timeout),
            probe_timeout: probe_timeout(Duration::from_millis(args.dns_timeout), DNS_ATTEMPTS),
            dns_timeout: Duration::from_millis(args.dns_timeout),
            nameservers,
            filter_wildcard: args.filter_wildcard,
            ..Self::default()
        })
    }

    pub fn source_names(&self) -> &[String] {
        &self.sources
    }
}

/// Outer bound on one host's check: every resolver attempt plus margin.
pub fn probe_timeout(dns_timeout: Duration, attempts: usize) -> Duration {
    let attempts = u32::try_from(attempts.max(1)).unwrap_or(u32::MAX);
    dns_timeout.saturating_mul(attempts).saturating_add(PROBE_MARGIN)
}

/// Splits a comma list, lowercasing and dropping blanks.
pub fn source_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts `ip` (port 53) or `ip:port`.
pub fn parse_nameserver(raw: &str) -> Result<SocketAddr> {
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Ok(addr);
    }
    raw.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, 53))
        .map_err(|_| Error::InvalidNameserver(raw.to_string()))
}
