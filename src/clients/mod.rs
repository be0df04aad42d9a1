mod airtable;
mod anthropic;
mod scraper;

pub use airtable::WaitlistStore;
pub use anthropic::ModelClient;
pub use scraper::PageScraper;
