/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

//! Third-party providers of historical DNS and certificate data.
//!
//! Every provider implements [`Source`]: one request per domain, returning raw
//! host strings. Normalization happens in the aggregator, not here.

mod bufferover;
mod crtsh;
mod hackertarget;
mod otx;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::domain::Domain;
use crate::error::{Error, Result};

pub use bufferover::BufferOver;
pub use crtsh::CrtSh;
pub use hackertarget::HackerTarget;
pub use otx::Otx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    CrtSh,
    Otx,
    BufferOver,
    HackerTarget,
}

impl SourceId {
    pub const ALL: [SourceId; 4] = [
        SourceId::CrtSh,
        SourceId::Otx,
        SourceId::BufferOver,
        SourceId::HackerTarget,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceId::CrtSh => "crtsh",
            SourceId::Otx => "otx",
            SourceId::BufferOver => "bufferover",
            SourceId::HackerTarget => "hackertarget",
        }
    }

    /// Case-insensitive lookup; `None` for names we do not know.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

pub type SourceResult = std::result::Result<Vec<String>, SourceError>;

#[async_trait]
pub trait Source: Send + Sync {
    fn id(&self) -> SourceId;

    async fn fetch(&self, domain: &Domain) -> SourceResult;
}

/// Sources available to the aggregator, keyed by id.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<SourceId, Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in provider over one shared HTTP client.
    pub fn with_defaults(timeout: Duration) -> Result<Self> {
        let client = http_client(timeout)?;
        let mut registry = Self::new();
        registry.register(Arc::new(CrtSh::new(client.clone())));
        registry.register(Arc::new(Otx::new(client.clone())));
        registry.register(Arc::new(BufferOver::new(client.clone())));
        registry.register(Arc::new(HackerTarget::new(client)));
        Ok(registry)
    }

    pub fn register(&mut self, source: Arc<dyn Source>) -> &mut Self {
        self.sources.insert(source.id(), source);
        self
    }

    pub fn get(&self, id: SourceId) -> Option<&Arc<dyn Source>> {
        self.sources.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.sources.keys().collect();
        ids.sort();
        f.debug_struct("SourceRegistry").field("sources", &ids).finish()
    }
}

pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .use_rustls_tls()
        .timeout(timeout)
        .user_agent(concat!("xfindsub/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::HttpClient)
}

/// Body of a 200 response, or the failure that replaces it.
async fn get_text(client: &Client, url: &str) -> std::result::Result<String, SourceError> {
    let response = client.get(url).send().await?;
    if response.status() != StatusCode::OK {
        return Err(SourceError::Status(response.status()));
    }
    Ok(response.text().await?)
}
