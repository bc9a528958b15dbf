//! Async execution of subscription requests.
//!
//! # Design
//! `SubscriptionApi` pairs a `SubscriptionClient` with a `Transport`. The
//! client stays I/O-free; the transport performs the round-trip. Swapping the
//! transport is how tests observe the exact request that would go on the wire.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::SubscriptionClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and returns whatever the server answered.
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// obtain a response at all belong in `Err`.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// `Transport` backed by `reqwest`. No timeout is set, so a request waits
/// for as long as the underlying connection does.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.path.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// The five subscription operations, each returning the parsed response body.
#[derive(Debug, Clone)]
pub struct SubscriptionApi<T = ReqwestTransport> {
    client: SubscriptionClient,
    transport: T,
}

impl SubscriptionApi<ReqwestTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }
}

impl<T: Transport> SubscriptionApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: SubscriptionClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &SubscriptionClient {
        &self.client
    }

    pub async fn list(&self) -> Result<Value, ApiError> {
        self.send(self.client.build_list()).await
    }

    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_create(payload)?).await
    }

    pub async fn update<P: Serialize + ?Sized>(
        &self,
        id: &str,
        payload: &P,
    ) -> Result<Value, ApiError> {
        self.send(self.client.build_update(id, payload)?).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.send(self.client.build_delete(id)).await
    }

    pub async fn check(&self, id: &str) -> Result<Value, ApiError> {
        self.send(self.client.build_check(id)).await
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            warn!(%method, %path, status = response.status, "non-success status passed through");
        }
        self.client.parse(response)
    }
}
