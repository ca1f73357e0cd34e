/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::BTreeSet;
use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::pipeline::BatchResults;

/// Every host across all domains, unique and sorted.
pub fn flatten(results: &BatchResults) -> Vec<String> {
    results
        .values()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let wrap = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).await.map_err(wrap)?;
    file.write_all(contents).await.map_err(wrap)?;
    file.flush().await.map_err(wrap)
}

/// One host per line; returns how many were written.
pub async fn write_txt(path: &Path, results: &BatchResults) -> Result<usize> {
    let hosts = flatten(results);
    let mut body = hosts.join("\n");
    if !hosts.is_empty() {
        body.push('\n');
    }
    write_file(path, body.as_bytes()).await?;
    Ok(hosts.len())
}

pub async fn write_json(path: &Path, results: &BatchResults) -> Result<()> {
    let body = serde_json::to_string_pretty(results)?;
    write_file(path, body.as_bytes()).await
}
