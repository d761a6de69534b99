// File: crates/stream-core/src/feed.rs
// Summary: One-shot HTTPS fetch of the dose CSV, or a local file read, into parsed records.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::record::{parse_csv, DoseRecord};

/// GET `url` and return the body. Single attempt; non-2xx is an error.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    debug!(%url, "fetching feed");
    client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()
        .with_context(|| format!("non-success status from {url}"))?
        .text()
        .await
        .with_context(|| format!("reading body from {url}"))
}

/// Fetch and parse the whole dataset.
pub async fn fetch_records(client: &Client, url: &str) -> Result<Vec<DoseRecord>> {
    let body = fetch_text(client, url).await?;
    let records = parse_csv(body.as_bytes()).with_context(|| format!("parsing CSV from {url}"))?;
    info!(%url, records = records.len(), bytes = body.len(), "loaded feed");
    Ok(records)
}

/// Parse a CSV file already on disk.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<DoseRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records = parse_csv(std::io::BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "loaded CSV file");
    Ok(records)
}
