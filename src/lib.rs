/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

//! Passive subdomain enumeration.
//!
//! Candidates come from third-party intelligence sources queried in parallel
//! ([`aggregator`]), get normalized into one set, and can optionally be
//! validated by DNS under a concurrency ceiling ([`resolver`]). [`pipeline`]
//! sequences the two per domain.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod progress;
pub mod resolver;
pub mod sources;
pub mod status;
pub mod wildcard;


pub use aggregator::Aggregator;
pub use config::ScanConfig;
pub use domain::{load_domains, Domain};
pub use error::{Error, Result};
pub use pipeline::{BatchResults, Pipeline, Stage};
pub use probe::{DnsProbe, Probe, ProbeError};
pub use resolver::ResolverPipeline;
pub use sources::{Source, SourceError, SourceId, SourceRegistry};
pub use status::{NoopSink, SharedSink, SourceStatus, StatusSink};
