//! Stateless HTTP request builder and response parser for the subscriptions API.
//!
//! # Design
//! `SubscriptionClient` holds only a `base_url`. Each operation has a
//! `build_*` method producing an `HttpRequest`; every response goes through
//! the single `parse` method, since all five operations return the server's
//! JSON unchanged.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const SUBSCRIPTIONS_PATH: &str = "/api/subscriptions";

/// Synchronous, stateless client for the subscriptions API.
///
/// Ids are inserted into the path verbatim and payloads are serialized as
/// given; nothing is validated before sending.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    base_url: String,
}

impl SubscriptionClient {
    /// An empty `base_url` produces host-relative paths (`/api/subscriptions`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_path(), payload)
    }

    pub fn build_update<P: Serialize + ?Sized>(
        &self,
        id: &str,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.item_path(id), payload)
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Ask the server to run a status check on one subscription now.
    pub fn build_check(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/check", self.item_path(id)),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse any response body as JSON. The status code is not inspected.
    pub fn parse(&self, response: HttpResponse) -> Result<Value, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    fn collection_path(&self) -> String {
        format!("{}{SUBSCRIPTIONS_PATH}", self.base_url)
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}{SUBSCRIPTIONS_PATH}/{id}", self.base_url)
    }
}

fn json_request<P: Serialize + ?Sized>(
    method: HttpMethod,
    path: String,
    payload: &P,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    fn client() -> SubscriptionClient {
        SubscriptionClient::new("http://localhost:3000")
    }

    fn json_content_type() -> Vec<(String, String)> {
        vec![("content-type".to_string(), "application/json".to_string())]
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_serializes_payload() {
        let input = json!({"name": "E5 dev", "cookies": "a=b"});
        let req = client().build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions");
        assert_eq!(req.headers, json_content_type());
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, input);
    }

    #[test]
    fn build_update_targets_item_path() {
        let input = json!({"name": "renamed"});
        let req = client().build_update("42", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions/42");
        assert_eq!(req.headers, json_content_type());
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, input);
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete("abc");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions/abc");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_check_posts_without_body() {
        let req = client().build_check("7");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions/7/check");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn ids_are_not_escaped() {
        let req = client().build_delete("a b/c");
        assert_eq!(req.path, "http://localhost:3000/api/subscriptions/a b/c");
    }

    #[test]
    fn typed_payloads_serialize_directly() {
        #[derive(Serialize)]
        struct Rename<'a> {
            name: &'a str,
        }
        let req = client().build_update("1", &Rename { name: "x" }).unwrap();
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"x"}"#));
    }

    #[test]
    fn unserializable_payload_is_rejected() {
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);
        let err = client().build_create(&bad).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = SubscriptionClient::new("http://localhost:3000/");
        assert_eq!(client.build_list().path, "http://localhost:3000/api/subscriptions");
    }

    #[test]
    fn empty_base_gives_relative_paths() {
        let client = SubscriptionClient::new("");
        assert_eq!(client.build_list().path, "/api/subscriptions");
        assert_eq!(client.build_check("1").path, "/api/subscriptions/1/check");
    }

    #[test]
    fn parse_returns_body_unchanged() {
        let body = json!([{"id": "1", "name": "one", "status": {"active": true}}]);
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        };
        assert_eq!(client().parse(response).unwrap(), body);
    }

    #[test]
    fn parse_ignores_error_status() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"error":"subscription not found"}"#.to_string(),
        };
        let value = client().parse(response).unwrap();
        assert_eq!(value["error"], "subscription not found");
    }

    #[test]
    fn parse_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_empty_body_is_an_error() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(matches!(
            client().parse(response),
            Err(ApiError::Deserialization(_))
        ));
    }
}
