/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::config::SOURCE_TIMEOUT;
use crate::domain::Domain;
use crate::normalize::{normalize_all, CandidateSet};
use crate::sources::{Source, SourceError, SourceId, SourceRegistry, SourceResult};
use crate::status::{SharedSink, SourceStatus};

/// Concurrent fan-out to every enabled source, merged into one candidate set.
#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: SourceRegistry,
    timeout: Duration,
}

impl Aggregator {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            registry,
            timeout: SOURCE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registered sources named in `enabled`, deduplicated. Unknown names
    /// are dropped without error.
    pub fn dispatchable(&self, enabled: &[String]) -> Vec<Arc<dyn Source>> {
        let mut ids = BTreeSet::new();
        for name in enabled {
            match SourceId::from_name(name) {
                Some(id) => {
                    ids.insert(id);
                }
                None => debug!(source = %name, "ignoring unknown source"),
            }
        }
        ids.into_iter()
            .filter_map(|id| self.registry.get(id).cloned())
            .collect()
    }

    /// Queries all enabled sources at once and returns the normalized union
    /// of whatever succeeded. A failing or slow source contributes nothing.
    pub async fn aggregate(&self, domain: &Domain, enabled: &[String], sink: &SharedSink) -> CandidateSet {
        let sources = self.dispatchable(enabled);
        for source in &sources {
            sink.source_status(source.id(), &SourceStatus::Pending);
        }

        let timeout = self.timeout;
        let mut pending: FuturesUnordered<_> = sources
            .iter()
            .map(|source| async move {
                let outcome: SourceResult = match tokio::time::timeout(timeout, source.fetch(domain)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SourceError::Timeout(timeout)),
                };
                (source.id(), outcome)
            })
            .collect();

        let mut raw: HashSet<String> = HashSet::new();
        while let Some((id, outcome)) = pending.next().await {
            match outcome {
                Ok(hosts) => {
                    debug!(source = %id, domain = %domain, found = hosts.len(), "source finished");
                    sink.source_status(id, &SourceStatus::Succeeded(hosts.len()));
                    raw.extend(hosts);
                }
                Err(err) => {
                    debug!(source = %id, domain = %domain, error = %err, "source failed");
                    sink.source_status(id, &SourceStatus::Failed(err.to_string()));
                }
            }
        }

        let candidates = normalize_all(raw);
        info!(domain = %domain, sources = sources.len(), candidates = candidates.len(), "collected candidates");
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status;
    use async_trait::async_trait;

    struct Fixed(SourceId, Vec<&'static str>);

    #[async_trait]
    impl Source for Fixed {
        fn id(&self) -> SourceId {
            self.0
        }

        async fn fetch(&self, _domain: &Domain) -> SourceResult {
            Ok(self.1.iter().map(|s| s.to_string()).collect())
        }
    }

    struct Slow(SourceId, &'static str);

    #[async_trait]
    impl Source for Slow {
        fn id(&self) -> SourceId {
            self.0
        }

        async fn fetch(&self, _domain: &Domain) -> SourceResult {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok(vec![self.1.to_string()])
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dispatchable_skips_unknown_and_duplicate_names() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(Fixed(SourceId::CrtSh, vec![])));
        registry.register(Arc::new(Fixed(SourceId::Otx, vec![])));
        let aggregator = Aggregator::new(registry);

        let picked = aggregator.dispatchable(&names(&["crtsh", "CRTSH", "virustotal", "otx", "bufferover"]));
        let ids: Vec<SourceId> = picked.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![SourceId::CrtSh, SourceId::Otx]);
    }

    #[tokio::test]
    async fn no_enabled_sources_yields_empty_set() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(Fixed(SourceId::CrtSh, vec!["a.example.com"])));
        let aggregator = Aggregator::new(registry);
        let domain = Domain::parse("example.com").unwrap();

        let set = aggregator.aggregate(&domain, &names(&["nope"]), &status::noop()).await;
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn filters_dotless_and_blank_hosts() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(Fixed(
            SourceId::Otx,
            vec!["intranet", "", "  ", "Mail.Example.com.", "mail.example.com"],
        )));
        let aggregator = Aggregator::new(registry);
        let domain = Domain::parse("example.com").unwrap();

        let set = aggregator.aggregate(&domain, &names(&["otx"]), &status::noop()).await;
        assert_eq!(set.len(), 1);
        assert!(set.contains("mail.example.com"));
    }

    #[tokio::test]
    async fn sources_are_queried_side_by_side() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(Slow(SourceId::CrtSh, "a.example.com")));
        registry.register(Arc::new(Slow(SourceId::Otx, "b.example.com")));
        registry.register(Arc::new(Slow(SourceId::BufferOver, "c.example.com")));
        let aggregator = Aggregator::new(registry);
        let domain = Domain::parse("example.com").unwrap();

        let started = std::time::Instant::now();
        let set = aggregator
            .aggregate(&domain, &names(&["crtsh", "otx", "bufferover"]), &status::noop())
            .await;
        let elapsed = started.elapsed();

        assert_eq!(set.len(), 3);
        assert!(elapsed < Duration::from_millis(600), "took {:?}", elapsed);
    }
}
