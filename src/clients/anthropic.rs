use std::time::Instant;

use crate::config::ModelConfig;
use crate::error::AppError;
use crate::metrics::MODEL_LATENCY;
use crate::models::{Message, MessagesRequest, MessagesResponse, ProviderErrorBody};

const API_VERSION: &str = "2023-06-01";

// Single-shot client for the Anthropic messages API. No retries.
#[derive(Clone)]
pub struct ModelClient {
    client: reqwest::Client,
    config: ModelConfig,
}

impl ModelClient {
    pub fn new(client: reqwest::Client, config: ModelConfig) -> Self {
        Self { client, config }
    }

    // Sends `prompt` as a single user message and returns the first text block
    // of the completion, trimmed.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Upstream("ANTHROPIC_API_KEY is not configured".into()))?;

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let start_time = Instant::now();
        let res = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        MODEL_LATENCY.observe(start_time.elapsed().as_secs_f64());

        if !res.status().is_success() {
            let status = res.status();
            let message = res
                .json::<ProviderErrorBody>()
                .await
                .ok()
                .and_then(ProviderErrorBody::message)
                .unwrap_or_else(|| "Claude API error".to_string());
            tracing::error!(%status, %message, "model provider returned an error");
            return Err(AppError::Upstream(message));
        }

        let data: MessagesResponse = res
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Parse Error: {}", e.without_url())))?;

        data.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AppError::Upstream("Model returned no text content".into()))
    }
}
