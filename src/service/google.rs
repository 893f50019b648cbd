//! HTTPS client for the Slides and Drive APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use super::auth::TokenSource;
use super::types::{BatchUpdateRequest, BatchUpdateResponse, FileService, Permission, PresentationService};
use crate::common::{Error, Result};
use crate::snapshot::DocumentSnapshot;

pub const SLIDES_BASE_URL: &str = "https://slides.googleapis.com/v1";
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Google error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPresentation {
    presentation_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

/// Implements [`PresentationService`] and [`FileService`] against the live
/// Google endpoints.
pub struct GoogleClient<T> {
    http: Client,
    tokens: T,
    slides_base: String,
    drive_base: String,
}

impl<T: TokenSource> GoogleClient<T> {
    pub fn new(tokens: T) -> Result<Self> {
        Self::with_timeout(tokens, None)
    }

    /// Client whose calls fail with a transport error after `timeout`.
    pub fn with_timeout(tokens: T, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("slidesmith/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            tokens,
            slides_base: SLIDES_BASE_URL.to_string(),
            drive_base: DRIVE_BASE_URL.to_string(),
        })
    }

    /// Point the client at other hosts (proxies, local emulators).
    pub fn with_base_urls(mut self, slides: impl Into<String>, drive: impl Into<String>) -> Self {
        self.slides_base = slides.into().trim_end_matches('/').to_string();
        self.drive_base = drive.into().trim_end_matches('/').to_string();
        self
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let token = self.tokens.token()?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        trace!(%status, url = %response.url(), "response");

        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::from_status(status.as_u16(), error_message(&body)))
    }
}

/// Human readable message out of an error response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({})", envelope.error.message, status),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl<T: TokenSource> PresentationService for GoogleClient<T> {
    async fn create(&self, title: &str) -> Result<String> {
        let url = format!("{}/presentations", self.slides_base);
        let created: CreatedPresentation = self.send(self.http.post(url).json(&json!({ "title": title }))).await?;
        debug!(document = %created.presentation_id, "presentation created");
        Ok(created.presentation_id)
    }

    async fn batch_update(
        &self,
        presentation_id: &str,
        request: &BatchUpdateRequest<'_>,
    ) -> Result<BatchUpdateResponse> {
        let url = format!("{}/presentations/{}:batchUpdate", self.slides_base, presentation_id);
        self.send(self.http.post(url).json(request)).await
    }

    async fn get(&self, presentation_id: &str) -> Result<DocumentSnapshot> {
        let url = format!("{}/presentations/{}", self.slides_base, presentation_id);
        self.send(self.http.get(url)).await
    }
}

#[async_trait]
impl<T: TokenSource> FileService for GoogleClient<T> {
    async fn copy_file(&self, file_id: &str, name: &str) -> Result<String> {
        let url = format!("{}/files/{}/copy?supportsAllDrives=true", self.drive_base, file_id);
        let created: CreatedResource = self.send(self.http.post(url).json(&json!({ "name": name }))).await?;
        debug!(source = file_id, copy = %created.id, "file copied");
        Ok(created.id)
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &Permission,
        transfer_ownership: bool,
    ) -> Result<String> {
        let mut url = format!("{}/files/{}/permissions?supportsAllDrives=true", self.drive_base, file_id);
        if transfer_ownership {
            url.push_str("&transferOwnership=true");
        }
        let created: CreatedResource = self.send(self.http.post(url).json(permission)).await?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::auth::StaticToken;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error": {"code": 400, "message": "Invalid requests[3].replaceImage", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message(body),
            "Invalid requests[3].replaceImage (INVALID_ARGUMENT)"
        );
        assert_eq!(error_message(r#"{"error": {"message": "nope"}}"#), "nope");
        assert_eq!(error_message("<html>bad gateway</html>\n"), "<html>bad gateway</html>");
        assert_eq!(error_message(""), "empty response body");
    }

    #[test]
    fn test_base_urls_are_normalized() {
        let client = GoogleClient::new(StaticToken::new("t").unwrap())
            .unwrap()
            .with_base_urls("http://localhost:8080/v1/", "http://localhost:8081/drive/v3");
        assert_eq!(client.slides_base, "http://localhost:8080/v1");
        assert_eq!(client.drive_base, "http://localhost:8081/drive/v3");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let client = GoogleClient::with_timeout(StaticToken::new("t").unwrap(), Some(Duration::from_secs(2)))
            .unwrap()
            .with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let err = client.get("deck").await.unwrap_err();
        assert!(err.is_ambiguous(), "{err:?}");
    }
}
