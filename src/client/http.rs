//! HTTP implementation of `DataClient`
//!
//! JSON over HTTP against `{base}/data` and `{base}/data/{id}`. Non-2xx
//! responses are inspected for an `{"error": "..."}` payload; without one the
//! canonical status text is reported. Nothing is retried.

use super::{ApiResult, DataClient};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::model::{Entry, EntryId};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

const DATA_PATH: &str = "data";
const JSON: &str = "application/json";

/// `/data` API client
#[derive(Debug, Clone)]
pub struct HttpDataClient {
    http: Client,
    base_url: Url,
}

/// Optional structured error payload of a failed response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpDataClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&config.api_base_url)?;

        #[cfg(not(target_arch = "wasm32"))]
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        #[cfg(target_arch = "wasm32")]
        let http = Client::new();

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/data` or `{base}/data/{id}` with the id percent-encoded
    fn endpoint(&self, id: Option<&EntryId>) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Transport(format!("invalid base URL {}", self.base_url)))?;
            segments.pop_if_empty().push(DATA_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let response = request
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl DataClient for HttpDataClient {
    async fn list(&self) -> ApiResult<Vec<Entry>> {
        let url = self.endpoint(None)?;
        debug!("GET {}", url);
        let entries: Vec<Entry> = self.send_json(self.http.get(url)).await?;
        info!("Fetched {} entries", entries.len());
        Ok(entries)
    }

    async fn create(&self, entry: &Entry) -> ApiResult<Entry> {
        let url = self.endpoint(None)?;
        let body = Entry {
            id: None,
            ..entry.clone()
        };
        debug!("POST {} ({})", url, body.display_name());
        let created: Entry = self
            .send_json(self.http.post(url).json(&body))
            .await?;
        info!(
            "Created entry {}",
            created.id.as_ref().map(EntryId::as_str).unwrap_or("<no id>")
        );
        Ok(created)
    }

    async fn update(&self, id: &EntryId, entry: &Entry) -> ApiResult<Entry> {
        let url = self.endpoint(Some(id))?;
        debug!("PUT {}", url);
        let updated: Entry = self
            .send_json(self.http.put(url).json(entry))
            .await?;
        info!("Updated entry {}", id);
        Ok(updated)
    }

    async fn remove(&self, id: &EntryId) -> ApiResult<serde_json::Value> {
        let url = self.endpoint(Some(id))?;
        debug!("DELETE {}", url);
        let confirmation: serde_json::Value = self.send_json(self.http.delete(url)).await?;
        info!("Deleted entry {}", id);
        Ok(confirmation)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        var: "OFRENDA_API_URL",
        expected: "an absolute http(s) URL",
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let error = rejection(status, response).await;
        warn!("Request failed with {}: {}", status, error);
        return Err(error);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

async fn rejection(status: StatusCode, response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    rejection_from_body(status, &body)
}

fn rejection_from_body(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.trim().is_empty() => ApiError::Rejected {
            status: status.as_u16(),
            message,
        },
        _ => ApiError::Status {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpDataClient {
        HttpDataClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let c = client("http://localhost:3000");
        assert_eq!(c.endpoint(None).unwrap().as_str(), "http://localhost:3000/data");
        assert_eq!(
            c.endpoint(Some(&EntryId::from(7u64))).unwrap().as_str(),
            "http://localhost:3000/data/7"
        );

        let c = client("https://altar.example/api/");
        assert_eq!(
            c.endpoint(Some(&EntryId::new("a b/c"))).unwrap().as_str(),
            "https://altar.example/api/data/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpDataClient::new(&ClientConfig::new("ftp://altar")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(HttpDataClient::new(&ClientConfig::new("not a url")).is_err());
    }

    #[test]
    fn test_structured_rejection() {
        let err = rejection_from_body(StatusCode::BAD_REQUEST, r#"{"error":"name is required"}"#);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: "name is required".into()
            }
        );
    }

    #[test]
    fn test_rejection_without_payload_uses_status_text() {
        for body in ["", "<html>oops</html>", r#"{"message":"x"}"#, r#"{"error":""}"#] {
            assert_eq!(
                rejection_from_body(StatusCode::SERVICE_UNAVAILABLE, body),
                ApiError::Status {
                    status: 503,
                    status_text: "Service Unavailable".into()
                }
            );
        }
    }
}
