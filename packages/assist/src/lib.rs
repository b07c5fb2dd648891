// ABOUTME: Client for the assist (text-generation) service
// ABOUTME: Alias/title/summary generation and related-task suggestion over HTTP

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::{error, info};

/// Environment variable naming the assist service base URL
pub const ASSIST_URL_ENV: &str = "TASKFLOW_ASSIST_URL";
/// Environment variable holding the optional API key
pub const ASSIST_KEY_ENV: &str = "TASKFLOW_ASSIST_KEY";

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Assist service error: {0}")]
    ApiError(String),

    #[error("No assist endpoint configured (set {ASSIST_URL_ENV})")]
    NoEndpoint,
}

pub type AssistResult<T> = Result<T, AssistError>;

#[derive(Debug, Serialize)]
struct AliasRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct AliasResponse {
    alias: String,
}

#[derive(Debug, Serialize)]
struct TitleRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct TitleResponse {
    title: String,
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    description: &'a str,
    #[serde(rename = "prLinks")]
    pr_links: &'a [String],
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    #[serde(rename = "textToSummarize")]
    text_to_summarize: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

/// Client for the assist service.
///
/// Every call is a single fallible request with no retry; callers surface the
/// error state. A caller that no longer needs a result abandons it by
/// dropping the future.
pub struct AssistClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl AssistClient {
    /// Endpoint and key are taken from the environment
    pub fn new() -> Self {
        let base_url = env::var(ASSIST_URL_ENV).ok();
        if base_url.is_none() {
            info!("{} not set - assist features disabled", ASSIST_URL_ENV);
        }
        Self {
            client: Client::new(),
            base_url,
            api_key: env::var(ASSIST_KEY_ENV).ok(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            api_key: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn post<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        route: &str,
        request: &Req,
    ) -> AssistResult<Resp> {
        let base = self.base_url.as_deref().ok_or(AssistError::NoEndpoint)?;
        let url = format!("{}/{}", base.trim_end_matches('/'), route);
        info!("Assist request: {}", route);

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Assist service returned {}: {}", status, body);
            return Err(AssistError::ApiError(format!("{}: {}", status, body)));
        }

        Ok(response.json().await?)
    }

    /// Short alias for a PR link URL
    pub async fn generate_alias(&self, url: &str) -> AssistResult<String> {
        let resp: AliasResponse = self.post("alias", &AliasRequest { url }).await?;
        Ok(resp.alias)
    }

    /// Task title from free-form content
    pub async fn generate_title(&self, content: &str) -> AssistResult<String> {
        let resp: TitleResponse = self.post("title", &TitleRequest { content }).await?;
        Ok(resp.title)
    }

    /// Summary of a task from its description and PR links
    pub async fn summarize_task(
        &self,
        description: &str,
        pr_links: &[String],
    ) -> AssistResult<String> {
        let resp: SummaryResponse = self
            .post(
                "summary",
                &SummaryRequest {
                    description,
                    pr_links,
                },
            )
            .await?;
        Ok(resp.summary)
    }

    /// Summary of arbitrary text
    pub async fn summarize(&self, text: &str) -> AssistResult<String> {
        let resp: SummaryResponse = self
            .post(
                "summarize",
                &SummarizeRequest {
                    text_to_summarize: text,
                },
            )
            .await?;
        Ok(resp.summary)
    }

    /// Titles of tasks related to a description
    pub async fn suggest_related(&self, description: &str) -> AssistResult<Vec<String>> {
        let resp: SuggestionsResponse =
            self.post("suggest", &SuggestRequest { description }).await?;
        Ok(resp.suggestions)
    }
}

impl Default for AssistClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_title_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/title"))
            .and(body_json(serde_json::json!({ "content": "crash on save" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "title": "Fix crash on save" })),
            )
            .mount(&server)
            .await;

        let client = AssistClient::with_base_url(server.uri());
        let title = client.generate_title("crash on save").await.unwrap();
        assert_eq!(title, "Fix crash on save");
    }

    #[tokio::test]
    async fn test_service_error_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summary"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = AssistClient::with_base_url(server.uri());
        let result = client.summarize_task("desc", &[]).await;
        match result {
            Err(AssistError::ApiError(msg)) => assert!(msg.contains("500")),
            other => panic!("Expected ApiError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_client_reports_no_endpoint() {
        let client = AssistClient {
            client: Client::new(),
            base_url: None,
            api_key: None,
        };
        assert!(!client.is_configured());
        let result = client.generate_alias("https://example.com/pr/1").await;
        assert!(matches!(result, Err(AssistError::NoEndpoint)));
    }

    #[tokio::test]
    async fn test_suggestions_parse_as_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/suggest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "suggestions": ["Fix login", "Update deps"] }),
            ))
            .mount(&server)
            .await;

        let client = AssistClient::with_base_url(server.uri());
        let suggestions = client.suggest_related("auth is broken").await.unwrap();
        assert_eq!(suggestions, vec!["Fix login", "Update deps"]);
    }
}
