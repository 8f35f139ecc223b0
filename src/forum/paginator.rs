use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::forum::client::PageSource;

/// Walks pages `1..=max_pages` of a [`PageSource`], fetching up to
/// `concurrency` pages at a time. Comments come back in page order.
pub struct Paginator<'a, S: PageSource + ?Sized> {
    source: &'a S,
    concurrency: usize,
}

impl<'a, S: PageSource + ?Sized> Paginator<'a, S> {
    pub fn new(source: &'a S, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn fetch_all(&self, max_pages: u32) -> Result<Vec<String>> {
        let pb = ProgressBar::new(u64::from(max_pages));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let pages: Vec<Result<Vec<String>>> = stream::iter(1..=max_pages)
            .map(|page| {
                let pb = pb.clone();
                async move {
                    let comments = self.source.fetch_page(page).await;
                    pb.inc(1);
                    comments
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut all_comments = Vec::new();
        for page in pages {
            all_comments.extend(page?);
        }

        pb.finish_with_message("Fetched all pages");
        Ok(all_comments)
    }
}
