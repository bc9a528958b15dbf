//! Client core for the subscriptions API, plus the page utilities that go
//! with it.
//!
//! # Overview
//! `SubscriptionClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network. `SubscriptionApi`
//! runs those requests over a `Transport` (reqwest by default). The `ui`
//! module holds the small helpers the page uses around those calls.
//!
//! # Design
//! - Payloads and responses are opaque `serde_json::Value`s; the schema
//!   belongs to the server.
//! - Any response with a JSON body is returned as-is, whatever its status.
//!   `HttpResponse::is_success` is there for callers that need to know.
//! - No retry, timeout or cancellation is added on top of the transport.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod ui;

pub use api::{ReqwestTransport, SubscriptionApi, Transport};
pub use client::SubscriptionClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
