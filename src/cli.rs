/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_SOURCES};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "xfindsub",
    author,
    version,
    about = "xfindsub - passive subdomain enumeration with clean output",
    long_about = None
)]
pub struct Args {
    /// Single target domain
    #[arg(short = 'd', long = "domain")]
    pub domain: Option<String>,

    /// File with target domains, one per line
    #[arg(short = 'l', long = "list")]
    pub list: Option<PathBuf>,

    /// Validate candidates by DNS resolution (A/AAAA)
    #[arg(long = "resolve")]
    pub resolve: bool,

    /// Write subdomains (one per line) to a TXT file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write per-domain results to a JSON file
    #[arg(long = "json")]
    pub json: Option<PathBuf>,

    /// Comma-separated sources
    #[arg(long = "sources", default_value_t = DEFAULT_SOURCES.join(","))]
    pub sources: String,

    /// Maximum number of DNS lookups in flight
    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_CONCURRENCY)]
    pub threads: usize,

    /// Per-source timeout in seconds
    #[arg(long = "timeout", default_value_t = 15)]
    pub timeout: u64,

    /// Per-lookup DNS timeout in milliseconds
    #[arg(long = "dns-timeout", default_value_t = 2000)]
    pub dns_timeout: u64,

    /// Comma-separated nameserver addresses (ip or ip:port)
    #[arg(long = "resolvers", value_delimiter = ',')]
    pub resolvers: Vec<String>,

    /// Drop hosts that only resolve to wildcard DNS answers
    #[arg(long = "filter-wildcard")]
    pub filter_wildcard: bool,

    /// Only print subdomains to stdout (no banner, logs or progress)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tool() {
        let args = Args::parse_from(["xfindsub", "-d", "example.com"]);
        assert_eq!(args.domain.as_deref(), Some("example.com"));
        assert_eq!(args.sources, "crtsh,otx,bufferover");
        assert_eq!(args.threads, 100);
        assert_eq!(args.timeout, 15);
        assert!(!args.resolve);
        assert!(args.resolvers.is_empty());
    }

    #[test]
    fn parses_full_invocation() {
        let args = Args::parse_from([
            "xfindsub",
            "-l",
            "targets.txt",
            "--resolve",
            "-o",
            "out.txt",
            "--json",
            "out.json",
            "--sources",
            "crtsh,otx",
            "-t",
            "20",
            "--resolvers",
            "1.1.1.1,8.8.8.8:53",
            "--silent",
        ]);
        assert_eq!(args.list, Some(PathBuf::from("targets.txt")));
        assert!(args.resolve);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
        assert_eq!(args.threads, 20);
        assert_eq!(args.resolvers, vec!["1.1.1.1", "8.8.8.8:53"]);
        assert!(args.silent);
    }
}
