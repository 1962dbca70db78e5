use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::api::ApiTransport;
use crate::error::{TransportError, TransportResult};

/// A request the mock transport received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

type RouteKey = (String, String);

/// In-memory stand-in for the invitation API.
///
/// Routes without a canned response behave like an unreachable backend.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<RouteKey, TransportResult<Value>>>,
    delays: Mutex<HashMap<RouteKey, Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
    echo_posts: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that accepts every POST and returns the body unchanged
    pub fn echoing_posts() -> Self {
        Self {
            echo_posts: true,
            ..Self::default()
        }
    }

    pub fn respond(&self, method: &str, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(key(method, path), Ok(body));
    }

    pub fn fail(&self, method: &str, path: &str, error: TransportError) {
        self.responses
            .lock()
            .unwrap()
            .insert(key(method, path), Err(error));
    }

    pub fn delay(&self, method: &str, path: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(key(method, path), delay);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn dispatch(&self, method: &str, path: &str, body: Option<Value>) -> TransportResult<Value> {
        debug!("MockTransport {} {}", method, path);
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            body: body.clone(),
        });

        let delay = self.delays.lock().unwrap().get(&key(method, path)).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let canned = self.responses.lock().unwrap().get(&key(method, path)).cloned();
        match (canned, body) {
            (Some(response), _) => response,
            (None, Some(body)) if self.echo_posts && method == "POST" => Ok(body),
            _ => Err(TransportError::Request(format!(
                "connection refused: {} {}",
                method, path
            ))),
        }
    }
}

fn key(method: &str, path: &str) -> RouteKey {
    (method.to_string(), path.to_string())
}

fn decode<R: DeserializeOwned>(value: Value) -> TransportResult<R> {
    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}

fn encode<B: Serialize>(body: &B) -> TransportResult<Value> {
    serde_json::to_value(body).map_err(|e| TransportError::Request(e.to_string()))
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get<R>(&self, path: &str) -> TransportResult<R>
    where
        R: DeserializeOwned + Send,
    {
        decode(self.dispatch("GET", path, None).await?)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let body = encode(body)?;
        decode(self.dispatch("POST", path, Some(body)).await?)
    }

    async fn put<B, R>(&self, path: &str, body: &B) -> TransportResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let body = encode(body)?;
        decode(self.dispatch("PUT", path, Some(body)).await?)
    }
}
