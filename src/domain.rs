/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

const STRIP_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

/// A sanitized enumeration target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    /// Lowercases and trims the input, drops a leading scheme and `www.`
    /// label and anything past the first `/`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut domain = raw.trim().to_lowercase();
        for prefix in STRIP_PREFIXES {
            if let Some(rest) = domain.strip_prefix(prefix) {
                domain = rest.to_string();
            }
        }
        if let Some(idx) = domain.find('/') {
            domain.truncate(idx);
        }
        let domain = domain.trim().to_string();
        if domain.is_empty() {
            return Err(Error::InvalidDomain(raw.to_string()));
        }
        Ok(Domain(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collects targets from `-d` and/or a list file, sorted and deduplicated.
pub async fn load_domains(single: Option<&str>, list: Option<&Path>) -> Result<Vec<Domain>> {
    let mut raw: Vec<String> = Vec::new();

    if let Some(single) = single {
        raw.push(single.to_string());
    }

    if let Some(path) = list {
        if !path.exists() {
            return Err(Error::ListNotFound(path.to_path_buf()));
        }
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        raw.extend(
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    if raw.iter().all(|d| d.trim().is_empty()) {
        return Err(Error::NoDomains);
    }

    let mut domains = Vec::with_capacity(raw.len());
    for entry in &raw {
        match Domain::parse(entry) {
            Ok(domain) => domains.push(domain),
            Err(_) => warn!(entry = %entry, "skipping unusable target"),
        }
    }
    if domains.is_empty() {
        return Err(Error::NoDomains);
    }

    domains.sort();
    domains.dedup();
    Ok(domains)
}
