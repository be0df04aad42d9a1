use reqwest::Url;
use tokio::time::timeout;

use crate::config::ScraperConfig;
use crate::metrics::SCRAPE_FALLBACKS;
use crate::models::ScrapeResponse;
use crate::prompt::normalize_page_text;

// Text extraction rule: the whole <body> as plain text
const EXTRACT_RULES: &str = r#"{"text":"body"}"#;

// Best-effort page text fetcher. Every failure (no key, timeout, non-2xx,
// bad body) ends up as empty content, never as an error.
#[derive(Clone)]
pub struct PageScraper {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl PageScraper {
    pub fn new(client: reqwest::Client, config: ScraperConfig) -> Self {
        Self { client, config }
    }

    // Returns the page's visible text, whitespace-collapsed and truncated, or an
    // empty string if it could not be fetched within the timeout.
    pub async fn fetch_text(&self, target: &str) -> String {
        let Some(api_key) = self.config.api_key.as_ref() else {
            tracing::debug!("no scraper key configured, skipping page fetch");
            return String::new();
        };

        let url = match Url::parse_with_params(
            &self.config.base_url,
            &[
                ("api_key", api_key.expose()),
                ("url", target),
                ("render_js", "false"),
                ("extract_rules", EXTRACT_RULES),
            ],
        ) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "invalid scraper base url");
                SCRAPE_FALLBACKS.inc();
                return String::new();
            }
        };

        let fetch = async {
            // the request url carries the api key, keep it out of errors
            let res = self.client.get(url).send().await.map_err(reqwest::Error::without_url)?;
            let status = res.status();
            if !status.is_success() {
                return Ok::<Result<ScrapeResponse, reqwest::StatusCode>, reqwest::Error>(Err(
                    status,
                ));
            }
            let body = res
                .json::<ScrapeResponse>()
                .await
                .map_err(reqwest::Error::without_url)?;
            Ok(Ok(body))
        };

        match timeout(self.config.timeout, fetch).await {
            Ok(Ok(Ok(body))) => {
                let text = normalize_page_text(body.text.as_deref().unwrap_or(""), self.config.max_chars);
                tracing::debug!(chars = text.chars().count(), "fetched page text");
                text
            }
            Ok(Ok(Err(status))) => {
                tracing::warn!(%status, "scraper returned non-success, continuing without content");
                SCRAPE_FALLBACKS.inc();
                String::new()
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "scraper request failed, continuing without content");
                SCRAPE_FALLBACKS.inc();
                String::new()
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.config.timeout, "scraper timed out, continuing without content");
                SCRAPE_FALLBACKS.inc();
                String::new()
            }
        }
    }
}
