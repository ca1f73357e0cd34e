/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::PROBE_TIMEOUT;
use crate::error::{Error, Result};
use crate::probe::{Probe, ProbeError};
use crate::status::SharedSink;

/// Semaphore-gated fan-out of liveness probes.
#[derive(Clone)]
pub struct ResolverPipeline {
    probe: Arc<dyn Probe>,
    timeout: Duration,
}

impl ResolverPipeline {
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self {
            probe,
            timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn probe(&self) -> &Arc<dyn Probe> {
        &self.probe
    }

    /// Probes every candidate once, with at most `limit` lookups in flight,
    /// and returns the ones that resolved. Errors, timeouts and panicked
    /// probes all count as "does not resolve".
    pub async fn resolve_all(&self, candidates: &[String], limit: usize, sink: &SharedSink) -> Result<HashSet<String>> {
        if limit == 0 {
            return Err(Error::InvalidConcurrency);
        }
        if candidates.is_empty() {
            return Ok(HashSet::new());
        }

        sink.resolve_started(candidates.len());
        let semaphore = Arc::new(Semaphore::new(limit));
        let mut handles = Vec::with_capacity(candidates.len());

        for host in candidates {
            // The permit is taken before spawning so queued hosts never start early.
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let probe = Arc::clone(&self.probe);
            let sink = Arc::clone(sink);
            let host = host.clone();
            let timeout = self.timeout;

            handles.push(tokio::spawn(async move {
                let outcome = match tokio::time::timeout(timeout, probe.resolve(&host)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ProbeError::Timeout(timeout)),
                };
                drop(permit);

                let alive = match outcome {
                    Ok(alive) => alive,
                    Err(err) => {
                        debug!(host = %host, error = %err, "probe failed");
                        false
                    }
                };
                sink.probe_completed(&host, alive);
                alive.then_some(host)
            }));
        }

        let resolved: HashSet<String> = join_all(handles)
            .await
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(host) => host,
                Err(err) => {
                    debug!(error = %err, "probe task aborted");
                    None
                }
            })
            .collect();

        sink.resolve_finished(resolved.len());
        info!(probed = candidates.len(), alive = resolved.len(), "resolution finished");
        Ok(resolved)
    }
}
