use serde::{Deserialize, Serialize};

// Analysis endpoint request body
#[derive(Deserialize, Debug)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "pageContent")]
    pub page_content: Option<String>,
}

// Subscription endpoint request body
#[derive(Deserialize, Debug)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// Anthropic messages API request format
#[derive(Serialize, Debug)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Serialize, Debug)]
pub struct Message<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

// Anthropic messages API response format (only what we read)
#[derive(Deserialize, Debug)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

// Error body shared by Anthropic and Airtable: {"error": {"message": "..."}}.
// Airtable sometimes sends {"error": "NOT_FOUND"} instead.
#[derive(Deserialize, Debug)]
pub struct ProviderErrorBody {
    pub error: ProviderError,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ProviderError {
    Detailed { message: Option<String> },
    Code(String),
}

impl ProviderErrorBody {
    pub fn message(self) -> Option<String> {
        match self.error {
            ProviderError::Detailed { message } => message,
            ProviderError::Code(code) => Some(code),
        }
    }
}

// Scraper text extraction response: {"text": "..."}
#[derive(Deserialize, Debug)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub text: Option<String>,
}

// Airtable record creation body
#[derive(Serialize, Debug)]
pub struct CreateRecord<'a> {
    pub fields: WaitlistFields<'a>,
}

#[derive(Serialize, Debug)]
pub struct WaitlistFields<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "URL")]
    pub url: &'a str,
    #[serde(rename = "Date")]
    pub date: String,
}
