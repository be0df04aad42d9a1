use std::sync::Arc;

use crate::clients::{ModelClient, PageScraper, WaitlistStore};
use crate::config::Args;
use crate::rate_limit::{InMemoryRateLimiter, RateLimiter};

// app's shared state
pub struct AppState {
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub scraper: PageScraper,
    pub model: ModelClient,
    pub waitlist: WaitlistStore,
}

impl AppState {
    pub fn from_args(args: &Args) -> Self {
        // one connection pool shared by all outbound calls
        let client = reqwest::Client::new();

        Self {
            rate_limiter: Arc::new(InMemoryRateLimiter::new(&args.rate_limit_config())),
            scraper: PageScraper::new(client.clone(), args.scraper_config()),
            model: ModelClient::new(client.clone(), args.model_config()),
            waitlist: WaitlistStore::new(client, args.datastore_config()),
        }
    }
}
