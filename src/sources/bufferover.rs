/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{get_text, Source, SourceError, SourceId, SourceResult};
use crate::domain::Domain;

/// BufferOver forward DNS dataset.
#[derive(Debug, Clone)]
pub struct BufferOver {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(rename = "FDNS_A", default)]
    fdns_a: Option<Vec<String>>,
}

impl BufferOver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `FDNS_A` rows look like `"ip,host"`.
    pub(crate) fn parse(body: &str) -> Result<Vec<String>, SourceError> {
        let payload: Response = serde_json::from_str(body)?;
        let rows = payload.fdns_a.unwrap_or_default();
        rows.iter()
            .map(|row| {
                row.split(',')
                    .nth(1)
                    .map(|host| host.trim().to_string())
                    .ok_or_else(|| SourceError::Parse(format!("bad FDNS_A row {:?}", row)))
            })
            .collect()
    }
}

#[async_trait]
impl Source for BufferOver {
    fn id(&self) -> SourceId {
        SourceId::BufferOver
    }

    async fn fetch(&self, domain: &Domain) -> SourceResult {
        let url = format!("https://dns.bufferover.run/dns?q=.{}", domain);
        let body = get_text(&self.client, &url).await?;
        Self::parse(&body)
    }
}
