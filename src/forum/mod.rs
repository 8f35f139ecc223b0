pub mod client;
pub mod paginator;
pub mod parser;

use std::path::Path;

pub use client::{ForumClient, PageSource};
pub use paginator::Paginator;

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::storage;

/// Crawls the configured pages and writes the comments to `output`.
///
/// Nothing is written when no comment was extracted. Returns the number of
/// comments collected.
pub async fn scrape_to_csv<S: PageSource + ?Sized>(
    source: &S,
    config: &ScrapeConfig,
    output: &Path,
) -> Result<usize> {
    let comments = Paginator::new(source, config.concurrency)
        .fetch_all(config.max_pages)
        .await?;

    if comments.is_empty() {
        tracing::warn!("No comments were extracted");
        return Ok(0);
    }

    storage::write_comments(output, &comments)?;
    tracing::info!("Saved {} comments to {}", comments.len(), output.display());
    Ok(comments.len())
}
