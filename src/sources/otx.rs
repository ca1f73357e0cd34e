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

/// AlienVault OTX passive DNS.
#[derive(Debug, Clone)]
pub struct Otx {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PassiveDns {
    #[serde(default)]
    passive_dns: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    hostname: Option<String>,
}

impl Otx {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub(crate) fn parse(body: &str) -> Result<Vec<String>, SourceError> {
        let payload: PassiveDns = serde_json::from_str(body)?;
        Ok(payload
            .passive_dns
            .into_iter()
            .filter_map(|record| record.hostname)
            .collect())
    }
}

#[async_trait]
impl Source for Otx {
    fn id(&self) -> SourceId {
        SourceId::Otx
    }

    async fn fetch(&self, domain: &Domain) -> SourceResult {
        let url = format!(
            "https://otx.alienvault.com/api/v1/indicators/domain/{}/passive_dns",
            domain
        );
        let body = get_text(&self.client, &url).await?;
        Self::parse(&body)
    }
}
