/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller of a run.
///
/// Source and probe failures never show up here; they are absorbed by the
/// aggregator and the resolver pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("provide a target with -d or a list with -l")]
    NoDomains,

    #[error("list file not found: {}", .0.display())]
    ListNotFound(PathBuf),

    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),

    #[error("concurrency limit must be greater than zero")]
    InvalidConcurrency,

    #[error("invalid nameserver address: {0:?}")]
    InvalidNameserver(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl Error {
    /// Input errors stop the run before any domain is processed.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::NoDomains
                | Error::ListNotFound(_)
                | Error::InvalidDomain(_)
                | Error::InvalidNameserver(_)
                | Error::InvalidConcurrency
                | Error::Read { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
