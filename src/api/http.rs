use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiClient, QUERY_LOG_PATH, SCHEMA_SUGGESTIONS_PATH};
use crate::error::ApiError;
use crate::models::{ApiSettings, NewQueryLog, QueryLogRecord, SchemaSuggestionList};

/// Longest slice of a non-JSON error body kept in an `ApiError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Error body shape used by the backend, e.g.
/// `{"error": "Error in optimization prediction", "details": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// `ApiClient` over HTTP.
///
/// The underlying client has no request timeout: a request that never
/// completes keeps the owning store loading.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("querylens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &settings.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(map_error)?;
        let response = ensure_success(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn list_query_logs(&self) -> Result<Vec<QueryLogRecord>, ApiError> {
        self.get_json(QUERY_LOG_PATH).await
    }

    async fn create_query_log(&self, payload: &NewQueryLog) -> Result<(), ApiError> {
        let url = self.endpoint(QUERY_LOG_PATH);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(map_error)?;
        ensure_success(response).await?;

        Ok(())
    }

    async fn list_schema_suggestions(&self) -> Result<SchemaSuggestionList, ApiError> {
        self.get_json(SCHEMA_SUGGESTIONS_PATH).await
    }
}

fn map_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Turn any non-2xx response into `ApiError::Status`, keeping the backend's
/// own message when it sent one
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason().unwrap_or("Unknown status")),
    })
}

fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return match parsed.details {
            Some(details) => format!("{} ({})", parsed.error, details),
            None => parsed.error,
        };
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
