pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::AppError;

/// Transport seam between the views and the course-tracking REST backend.
///
/// Paths are relative to the configured base address, e.g. `lecturers` or
/// `progress-updates/66f0c2`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, AppError>;
    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError>;
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError>;
    async fn delete(&self, path: &str) -> Result<(), AppError>;
}

pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Value, AppError> {
        debug!("{} {}", method, url);
        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
            AppError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await;

        if !status.is_success() {
            let body_text = body.unwrap_or_default();
            let message = serde_json::from_str::<dto::ErrorBody>(&body_text)
                .ok()
                .and_then(dto::ErrorBody::into_message);
            warn!("{} {} returned {}: {}", method, url, status, body_text);
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body_text = body.map_err(|e| {
            warn!("{} {} returned {} but the body could not be read: {}", method, url, status, e);
            AppError::Http(e)
        })?;

        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str::<Value>(&body_text).map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", url, e);
            AppError::Decode(e)
        })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let url = self.url(path);
        self.send("GET", &url, self.client.get(&url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let url = self.url(path);
        self.send("POST", &url, self.client.post(&url).json(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let url = self.url(path);
        self.send("PATCH", &url, self.client.patch(&url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let url = self.url(path);
        self.send("DELETE", &url, self.client.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpApiClient::new(&ApiConfig::new("http://localhost:5001/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001/api");
        assert_eq!(client.url("courses"), "http://localhost:5001/api/courses");
        assert_eq!(client.url("/lecturers/abc"), "http://localhost:5001/api/lecturers/abc");
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            // promises 64 bytes, sends 6, then hangs up
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 64\r\n\r\n{\"_id\"")
                .await
                .unwrap();
        });

        let client = HttpApiClient::new(&ApiConfig::new(format!("http://{}/api", addr))).unwrap();
        let err = client.get("lecturers/l1").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)), "{:?}", err);
    }
}
