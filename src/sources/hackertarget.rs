/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use async_trait::async_trait;
use reqwest::Client;

use super::{get_text, Source, SourceError, SourceId, SourceResult};
use crate::domain::Domain;

/// HackerTarget host search; plain text `host,ip` lines.
#[derive(Debug, Clone)]
pub struct HackerTarget {
    client: Client,
}

impl HackerTarget {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub(crate) fn parse(body: &str) -> Result<Vec<String>, SourceError> {
        let trimmed = body.trim_start();
        if trimmed.starts_with("error") || trimmed.starts_with("API count exceeded") {
            let first = trimmed.lines().next().unwrap_or_default();
            return Err(SourceError::Parse(first.to_string()));
        }
        Ok(body
            .lines()
            .filter_map(|line| line.split_once(','))
            .map(|(host, _)| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .collect())
    }
}

#[async_trait]
impl Source for HackerTarget {
    fn id(&self) -> SourceId {
        SourceId::HackerTarget
    }

    async fn fetch(&self, domain: &Domain) -> SourceResult {
        let url = format!("https://api.hackertarget.com/hostsearch/?q={}", domain);
        let body = get_text(&self.client, &url).await?;
        Self::parse(&body)
    }
}
