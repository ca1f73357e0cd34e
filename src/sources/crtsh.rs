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

/// Certificate transparency logs via crt.sh.
#[derive(Debug, Clone)]
pub struct CrtSh {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    name_value: String,
}

impl CrtSh {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `name_value` can carry several names separated by newlines; wildcard
    /// entries are skipped.
    pub(crate) fn parse(body: &str) -> Result<Vec<String>, SourceError> {
        let entries: Vec<Entry> = serde_json::from_str(body)?;
        Ok(entries
            .iter()
            .flat_map(|entry| entry.name_value.lines())
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.contains('*'))
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl Source for CrtSh {
    fn id(&self) -> SourceId {
        SourceId::CrtSh
    }

    async fn fetch(&self, domain: &Domain) -> SourceResult {
        let url = format!("https://crt.sh/?q=%25.{}&output=json", domain);
        let body = get_text(&self.client, &url).await?;
        Self::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_multi_name_entries_and_skips_wildcards() {
        let body = r#"[
            {"issuer_name": "R3", "name_value": "api.example.com\nwww.example.com"},
            {"name_value": "*.example.com"},
            {"name_value": " mail.example.com "},
            {"id": 42}
        ]"#;
        let names = CrtSh::parse(body).unwrap();
        assert_eq!(names, vec!["api.example.com", "www.example.com", "mail.example.com"]);
    }

    #[test]
    fn html_error_page_is_a_parse_failure() {
        let err = CrtSh::parse("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
