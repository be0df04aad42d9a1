use clap::Parser;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// API key read from the environment. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl FromStr for ApiKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "landing-grader")]
#[command(about = "Landing page copy grader and waitlist signup service")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "GRADER_PORT", default_value_t = 8080)]
    pub port: u16,

    // Max analyses per client per window
    #[arg(long, env = "GRADER_RATE_LIMIT", default_value_t = 3)]
    pub rate_limit: usize,

    // Rate limit window in seconds
    #[arg(long, env = "GRADER_RATE_WINDOW", default_value_t = 3600)]
    pub rate_window: u64,

    // Hard cap on the page fetch, kept under the platform's 10s deadline
    #[arg(long, env = "GRADER_SCRAPE_TIMEOUT_MS", default_value_t = 7000)]
    pub scrape_timeout_ms: u64,

    // Fetched page text is truncated to this many characters
    #[arg(long, env = "GRADER_MAX_CONTENT_CHARS", default_value_t = 8000)]
    pub max_content_chars: usize,

    #[arg(long, env = "GRADER_MODEL", default_value = "claude-haiku-4-5-20251001")]
    pub model: String,

    #[arg(long, env = "GRADER_MAX_TOKENS", default_value_t = 4000)]
    pub max_tokens: u32,

    #[arg(long, env = "GRADER_ANTHROPIC_URL", default_value = "https://api.anthropic.com")]
    pub anthropic_url: String,

    #[arg(long, env = "GRADER_SCRAPER_URL", default_value = "https://app.scrapingbee.com/api/v1/")]
    pub scraper_url: String,

    #[arg(long, env = "GRADER_AIRTABLE_URL", default_value = "https://api.airtable.com")]
    pub airtable_url: String,

    // Airtable base holding the waitlist table
    #[arg(long, env = "GRADER_AIRTABLE_BASE", default_value = "appY9AvBPJB9VlPQO")]
    pub airtable_base: String,

    #[arg(long, env = "GRADER_AIRTABLE_TABLE", default_value = "Waitlist")]
    pub airtable_table: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<ApiKey>,

    #[arg(long, env = "SCRAPINGBEE_API_KEY", hide_env_values = true)]
    pub scrapingbee_api_key: Option<ApiKey>,

    #[arg(long, env = "AIRTABLE_API_KEY", hide_env_values = true)]
    pub airtable_api_key: Option<ApiKey>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub timeout: Duration,
    pub max_chars: usize,
}

#[derive(Debug, Clone)]
pub struct DatastoreConfig {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub base_id: String,
    pub table: String,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window: Duration,
}

impl Args {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            base_url: self.anthropic_url.trim_end_matches('/').to_string(),
            api_key: non_empty(&self.anthropic_api_key),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }

    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            base_url: self.scraper_url.clone(),
            api_key: non_empty(&self.scrapingbee_api_key),
            timeout: Duration::from_millis(self.scrape_timeout_ms),
            max_chars: self.max_content_chars,
        }
    }

    pub fn datastore_config(&self) -> DatastoreConfig {
        DatastoreConfig {
            base_url: self.airtable_url.trim_end_matches('/').to_string(),
            api_key: non_empty(&self.airtable_api_key),
            base_id: self.airtable_base.clone(),
            table: self.airtable_table.clone(),
        }
    }

    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.rate_limit,
            window: Duration::from_secs(self.rate_window),
        }
    }

    // Names of the secrets that are not set, for a startup warning
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_empty(&self.anthropic_api_key).is_none() {
            missing.push("ANTHROPIC_API_KEY");
        }
        if non_empty(&self.scrapingbee_api_key).is_none() {
            missing.push("SCRAPINGBEE_API_KEY");
        }
        if non_empty(&self.airtable_api_key).is_none() {
            missing.push("AIRTABLE_API_KEY");
        }
        missing
    }
}

fn non_empty(key: &Option<ApiKey>) -> Option<ApiKey> {
    key.as_ref().filter(|k| !k.expose().is_empty()).cloned()
}
