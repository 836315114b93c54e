//! HTTP access to the pipeline backend.
//!
//! [`ApiClient`] wraps `gloo-net` requests and turns every outcome into
//! `Result<T, ApiError>`: no response is `Transport`, a non-2xx answer is
//! `Server` with the message from the JSON body, an unreadable 2xx body is
//! `Decode`. The typed endpoint methods live in `endpoints`; multipart file
//! uploads with byte progress go through `upload`.

use common::api::{ApiError, RuntimeConfig};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

mod endpoints;
pub mod upload;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: RuntimeConfig,
}

impl ApiClient {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn master_project_id(&self) -> Option<&str> {
        self.config.master_project_id.as_deref()
    }

    /// Absolute URL for a route, also used for preview and download links.
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    async fn send(&self, request: Result<Request, gloo_net::Error>) -> Result<Value, ApiError> {
        let request = request.map_err(transport)?;
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !response.ok() {
            return Err(ApiError::from_response(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn with_body<B: Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Request, gloo_net::Error> {
        builder.json(body)
    }

    pub async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Request::get(&self.url(path)).build()).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.get_value(path).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = Self::with_body(Request::post(&self.url(path)), body);
        decode(self.send(request).await?)
    }

    /// POST without a body, for the action endpoints (`run`, `enable`, ...).
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Request::post(&self.url(path)).build()).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = Self::with_body(Request::put(&self.url(path)), body);
        decode(self.send(request).await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url(path)).build())
            .await
            .map(|_| ())
    }
}

fn transport(error: gloo_net::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
