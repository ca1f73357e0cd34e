/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::aggregator::Aggregator;
use crate::config::ScanConfig;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::normalize::sorted;
use crate::probe::{DnsProbe, Probe};
use crate::resolver::ResolverPipeline;
use crate::sources::SourceRegistry;
use crate::status::{self, SharedSink};

/// Per-domain progress of a run. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Normalizing,
    Resolving,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Normalizing => "normalizing",
            Stage::Resolving => "resolving",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Results of a batch, keyed by domain.
pub type BatchResults = BTreeMap<String, Vec<String>>;

/// Aggregation followed by optional resolution, once per domain.
pub struct Pipeline {
    aggregator: Aggregator,
    resolver: ResolverPipeline,
    concurrency: usize,
    sink: SharedSink,
}

impl Pipeline {
    pub fn new(aggregator: Aggregator, resolver: ResolverPipeline, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }
        Ok(Self {
            aggregator,
            resolver,
            concurrency,
            sink: status::noop(),
        })
    }

    /// Built-in sources and the DNS probe, tuned by `config`.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let registry = SourceRegistry::with_defaults(config.source_timeout)?;
        let aggregator = Aggregator::new(registry).with_timeout(config.source_timeout);
        let probe: Arc<dyn Probe> = Arc::new(DnsProbe::new(config));
        let resolver = ResolverPipeline::new(probe).with_timeout(config.probe_timeout);
        Self::new(aggregator, resolver, config.concurrency)
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    fn enter(&self, domain: &Domain, stage: Stage) {
        debug!(domain = %domain, stage = %stage, "stage");
        self.sink.stage_changed(domain, stage);
    }

    /// Sorted subdomains of `domain`; only those that resolve when
    /// `validate` is set.
    pub async fn run_for_domain(&self, domain: &str, sources: &[String], validate: bool) -> Result<Vec<String>> {
        let domain = Domain::parse(domain)?;
        self.run(&domain, sources, validate).await
    }

    async fn run(&self, domain: &Domain, sources: &[String], validate: bool) -> Result<Vec<String>> {
        self.enter(domain, Stage::Fetching);
        let candidates = self.aggregator.aggregate(domain, sources, &self.sink).await;

        self.enter(domain, Stage::Normalizing);
        let candidates = sorted(candidates);

        if !validate || candidates.is_empty() {
            self.enter(domain, Stage::Done);
            return Ok(candidates);
        }

        self.enter(domain, Stage::Resolving);
        self.resolver.probe().prepare(domain).await;
        let resolved = self
            .resolver
            .resolve_all(&candidates, self.concurrency, &self.sink)
            .await?;

        self.enter(domain, Stage::Done);
        Ok(sorted(resolved))
    }

    /// Runs each domain in turn; one entry per domain, empty when nothing
    /// was found.
    pub async fn run_batch(&self, domains: &[Domain], sources: &[String], validate: bool) -> Result<BatchResults> {
        self.run_batch_with(domains, sources, validate, |_, _| {}).await
    }

    /// Like [`run_batch`](Self::run_batch), handing each domain's hosts to
    /// `on_domain` as soon as that domain is done.
    pub async fn run_batch_with<F>(
        &self,
        domains: &[Domain],
        sources: &[String],
        validate: bool,
        mut on_domain: F,
    ) -> Result<BatchResults>
    where
        F: FnMut(&Domain, &[String]),
    {
        let mut results = BatchResults::new();
        for domain in domains {
            let hosts = self.run(domain, sources, validate).await?;
            info!(domain = %domain, found = hosts.len(), "domain finished");
            on_domain(domain, &hosts);
            results.insert(domain.to_string(), hosts);
        }
        Ok(results)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("aggregator", &self.aggregator)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
