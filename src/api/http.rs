//! HTTP encoding of search API requests.
//!
//! Translates an [`ApiRequest`] into the pieces Zellij's `web_request` host
//! call needs. Queries are sent as JSON bodies so no URL encoding is required.

use super::request::{ApiRequest, Endpoint};
use crate::domain::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP method of an encoded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Connection settings for the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL without trailing slash, e.g. `https://shop.example/api`.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
}

impl ApiSettings {
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// A fully encoded HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Returned verbatim by Zellij alongside the response.
    pub context: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// Encodes a request against the given API settings.
///
/// # Errors
///
/// Returns [`SearchError::Serialization`](crate::domain::SearchError::Serialization)
/// if the query body cannot be serialized.
pub fn build_call(settings: &ApiSettings, request: &ApiRequest) -> Result<HttpCall> {
    let (path, method, body) = match &request.endpoint {
        Endpoint::Suggestions { query } => (
            "/search/suggestions",
            HttpMethod::Post,
            serde_json::to_vec(&QueryBody { query })?,
        ),
        Endpoint::Categories => ("/search/categories", HttpMethod::Get, Vec::new()),
        Endpoint::Trending => ("/search/trending", HttpMethod::Get, Vec::new()),
        Endpoint::Products { query } => (
            "/search/products",
            HttpMethod::Post,
            serde_json::to_vec(&QueryBody { query })?,
        ),
    };

    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    if method == HttpMethod::Post {
        headers.insert("Content-Type".to_string(), "application/json".to_string());
    }
    if let Some(token) = &settings.token {
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
    }

    Ok(HttpCall {
        url: format!("{}{path}", settings.base_url),
        method,
        headers,
        body,
        context: request.context(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{RequestId, CONTEXT_REQUEST_ID};

    fn settings() -> ApiSettings {
        ApiSettings::new("https://shop.example/api/", None)
    }

    #[test]
    fn settings_normalize_base_url_and_token() {
        let s = ApiSettings::new(" http://x/api// ", Some("  ".to_string()));
        assert_eq!(s.base_url, "http://x/api");
        assert_eq!(s.token, None);
    }

    #[test]
    fn suggestions_post_query_body() {
        let request = ApiRequest::suggestions(RequestId(3), "sho \"x\"".to_string());
        let call = build_call(&settings(), &request).unwrap();

        assert_eq!(call.url, "https://shop.example/api/search/suggestions");
        assert_eq!(call.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_slice(&call.body).unwrap();
        assert_eq!(body["query"], "sho \"x\"");
        assert_eq!(
            call.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(call.context.get(CONTEXT_REQUEST_ID).map(String::as_str), Some("3"));
    }

    #[test]
    fn list_endpoints_are_bodyless_gets() {
        for request in [
            ApiRequest::categories(RequestId(1)),
            ApiRequest::trending(RequestId(2)),
        ] {
            let call = build_call(&settings(), &request).unwrap();
            assert_eq!(call.method, HttpMethod::Get);
            assert!(call.body.is_empty());
            assert!(!call.headers.contains_key("Content-Type"));
        }

        let call = build_call(&settings(), &ApiRequest::trending(RequestId(2))).unwrap();
        assert_eq!(call.url, "https://shop.example/api/search/trending");
    }

    #[test]
    fn token_becomes_bearer_header() {
        let settings = ApiSettings::new("http://x", Some("secret".to_string()));
        let call = build_call(&settings, &ApiRequest::categories(RequestId(1))).unwrap();
        assert_eq!(
            call.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }
}
