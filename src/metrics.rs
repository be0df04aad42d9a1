use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref ANALYZE_REQUESTS: Counter =
        register_counter!("grader_analyze_requests_total", "Total analysis requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("grader_rate_limited_total", "Analysis requests rejected by the rate limiter").unwrap();
    pub static ref SCRAPE_FALLBACKS: Counter =
        register_counter!("grader_scrape_fallbacks_total", "Page fetches that fell back to empty content").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("grader_upstream_failures_total", "Model or datastore calls that failed").unwrap();
    pub static ref SUBSCRIPTIONS: Counter =
        register_counter!("grader_subscriptions_total", "Waitlist records created").unwrap();
    pub static ref MODEL_LATENCY: Histogram = register_histogram!(
        "grader_model_latency_seconds",
        "Model call latency in seconds"
    )
    .unwrap();
}
