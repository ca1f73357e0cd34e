/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::sync::Arc;

use crate::domain::Domain;
use crate::pipeline::Stage;
use crate::sources::SourceId;

/// Per-source progress signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Pending,
    Succeeded(usize),
    Failed(String),
}

/// Observer for advisory progress signals.
///
/// Nothing in the data path depends on it; every method defaults to a no-op.
pub trait StatusSink: Send + Sync {
    fn stage_changed(&self, _domain: &Domain, _stage: Stage) {}

    fn source_status(&self, _source: SourceId, _status: &SourceStatus) {}

    fn resolve_started(&self, _total: usize) {}

    fn probe_completed(&self, _host: &str, _alive: bool) {}

    fn resolve_finished(&self, _alive: usize) {}
}

pub type SharedSink = Arc<dyn StatusSink>;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StatusSink for NoopSink {}

pub fn noop() -> SharedSink {
    Arc::new(NoopSink)
}
