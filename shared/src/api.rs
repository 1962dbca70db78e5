use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{TransportError, TransportResult};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Request/response seam between the stores and the invitation API.
///
/// No retries or timeouts happen here; callers decide how to fall back.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get<R>(&self, path: &str) -> TransportResult<R>
    where
        R: DeserializeOwned + Send;

    async fn post<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;

    async fn put<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;
}

/// JSON client for the invitation API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uses `API_URL` when set, otherwise the local development API
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
    }

    async fn send<R>(&self, method: Method, path: &str, builder: RequestBuilder) -> TransportResult<R>
    where
        R: DeserializeOwned,
    {
        debug!("API {} {}{}", method, self.base_url, path);

        let response = builder.send().await.map_err(|e| {
            error!("API {} error: {}", method, e);
            TransportError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            error!(
                "API {} error: {} returned {} {}",
                method,
                path,
                status.as_u16(),
                status_text
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        response.json::<R>().await.map_err(|e| {
            error!("API {} error: failed to decode {}: {}", method, path, e);
            TransportError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn get<R>(&self, path: &str) -> TransportResult<R>
    where
        R: DeserializeOwned + Send,
    {
        let builder = self.request(Method::GET, path);
        self.send(Method::GET, path, builder).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    async fn put<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }
}
