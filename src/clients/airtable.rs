use chrono::{SecondsFormat, Utc};

use crate::config::DatastoreConfig;
use crate::error::AppError;
use crate::models::{CreateRecord, ProviderErrorBody, WaitlistFields};

// Writes waitlist signups to an Airtable table. No retries and no dedup,
// a repeated signup creates a second record.
#[derive(Clone)]
pub struct WaitlistStore {
    client: reqwest::Client,
    config: DatastoreConfig,
}

impl WaitlistStore {
    pub fn new(client: reqwest::Client, config: DatastoreConfig) -> Self {
        Self { client, config }
    }

    pub async fn add_signup(&self, email: &str, url: &str) -> Result<(), AppError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Upstream("AIRTABLE_API_KEY is not configured".into()))?;

        let record = CreateRecord {
            fields: WaitlistFields {
                email,
                url,
                // full UTC timestamp, e.g. 2026-10-18T14:32:05.123Z
                date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        };

        let res = self
            .client
            .post(format!(
                "{}/v0/{}/{}",
                self.config.base_url, self.config.base_id, self.config.table
            ))
            .bearer_auth(api_key.expose())
            .json(&record)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }

        let status = res.status();
        let raw = res.text().await.unwrap_or_default();
        tracing::error!(%status, body = %raw, "airtable rejected waitlist record");

        let message = serde_json::from_str::<ProviderErrorBody>(&raw)
            .ok()
            .and_then(ProviderErrorBody::message)
            .unwrap_or_else(|| "Airtable error".to_string());
        Err(AppError::Upstream(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn store_for(server: &MockServer, key: Option<&str>) -> WaitlistStore {
        WaitlistStore::new(
            reqwest::Client::new(),
            DatastoreConfig {
                base_url: server.uri(),
                api_key: key.map(ApiKey::new),
                base_id: "appTest".into(),
                table: "Waitlist".into(),
            },
        )
    }

    #[tokio::test]
    async fn posts_record_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/appTest/Waitlist"))
            .and(header("authorization", "Bearer at-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "rec1" })))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server, Some("at-test"))
            .add_signup("a@b.com", "https://x.com")
            .await
            .unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["fields"]["Email"], "a@b.com");
        assert_eq!(body["fields"]["URL"], "https://x.com");
        let date = body["fields"]["Date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
    }

    #[tokio::test]
    async fn surfaces_detailed_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error": { "type": "INVALID_VALUE_FOR_COLUMN", "message": "Field \"Email\" cannot accept the provided value" }
            })))
            .mount(&server)
            .await;

        let err = store_for(&server, Some("at-test"))
            .add_signup("a@b.com", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Field \"Email\" cannot accept the provided value");
    }

    #[tokio::test]
    async fn surfaces_error_code_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "NOT_FOUND" })))
            .mount(&server)
            .await;

        let err = store_for(&server, Some("at-test"))
            .add_signup("a@b.com", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn unreachable_store_is_upstream_error() {
        let store = WaitlistStore::new(
            reqwest::Client::new(),
            DatastoreConfig {
                base_url: "http://127.0.0.1:1".into(),
                api_key: Some(ApiKey::new("at-test")),
                base_id: "appTest".into(),
                table: "Waitlist".into(),
            },
        );
        let err = store.add_signup("a@b.com", "").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
