use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::forum::parser::{compile_selector, extract_comments};

/// Anything that can return the comments shown on one forum page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Vec<String>>;
}

pub struct ForumClient {
    client: Client,
    base_url: String,
    selector: String,
}

impl ForumClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        compile_selector(&config.comment_selector)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("text/html,application/xhtml+xml"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            selector: config.comment_selector.clone(),
        })
    }

    pub fn page_url(&self, page: u32) -> String {
        let separator = if self.base_url.contains('?') { "&" } else { "?" };
        format!("{}{}p={}", self.base_url, separator, page)
    }
}

#[async_trait]
impl PageSource for ForumClient {
    /// A page answering with anything but 200 contributes no comments.
    async fn fetch_page(&self, page: u32) -> Result<Vec<String>> {
        let url = self.page_url(page);
        tracing::info!("Scraping {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Cannot access {} (status code: {})", url, status);
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let comments = extract_comments(&body, &self.selector)?;
        tracing::debug!("Page {} yielded {} comments", page, comments.len());
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn scrape_config(base_url: String) -> ScrapeConfig {
        ScrapeConfig {
            base_url,
            max_pages: 3,
            comment_selector: "a.lfor".to_string(),
            user_agent: "forum-sentiment-test".to_string(),
            concurrency: 2,
        }
    }

    /// Serves `/forum?p=N`; page 2 answers 500.
    async fn spawn_forum() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    let page = request
                        .split("p=")
                        .nth(1)
                        .and_then(|rest| rest.split_whitespace().next())
                        .unwrap_or("0")
                        .to_string();

                    let (status, body) = if page == "2" {
                        ("500 Internal Server Error", String::new())
                    } else {
                        (
                            "200 OK",
                            format!(r#"<html><body><a class="lfor"> comment {} </a></body></html>"#, page),
                        )
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });

        format!("http://{}/forum", addr)
    }

    #[test]
    fn test_page_url_separator() {
        let client = ForumClient::new(&scrape_config("https://example.com/forums/btc".into())).unwrap();
        assert_eq!(client.page_url(3), "https://example.com/forums/btc?p=3");

        let client =
            ForumClient::new(&scrape_config("https://example.com/forums?id=7".into())).unwrap();
        assert_eq!(client.page_url(1), "https://example.com/forums?id=7&p=1");
    }

    #[test]
    fn test_invalid_selector_rejected_at_construction() {
        let mut config = scrape_config("https://example.com".into());
        config.comment_selector = "[[".to_string();
        assert!(ForumClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_page_parses_comments_and_skips_errors() {
        let base_url = spawn_forum().await;
        let client = ForumClient::new(&scrape_config(base_url)).unwrap();

        assert_eq!(client.fetch_page(1).await.unwrap(), vec!["comment 1"]);
        assert!(client.fetch_page(2).await.unwrap().is_empty());
        assert_eq!(client.fetch_page(3).await.unwrap(), vec!["comment 3"]);
    }
}
