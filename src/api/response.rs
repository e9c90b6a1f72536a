//! Search API response decoding.
//!
//! Zellij reports every finished `web_request` as a status code, headers, a
//! body and the context map the request was sent with. [`ApiResponse::decode`]
//! recovers the request id and endpoint from the context and turns the status
//! and body into either a payload or an [`ApiFailure`].

use super::request::{EndpointKind, RequestId, CONTEXT_ENDPOINT, CONTEXT_QUERY, CONTEXT_REQUEST_ID};
use crate::domain::SearchResults;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a search API call failed.
///
/// The screen reduces all of these to one generic message; the variants exist
/// for the trace log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// The server (or the host transport) answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// The body did not match the expected shape.
    #[error("malformed {endpoint} response: {reason}")]
    Decode { endpoint: EndpointKind, reason: String },

    /// The response context lacks the data needed to route it.
    #[error("response context is missing or has an invalid `{0}`")]
    Unroutable(&'static str),
}

/// Successfully decoded response data.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Suggestions(Vec<String>),
    Categories(Vec<String>),
    Trending(Vec<String>),
    Products(SearchResults),
}

/// A routed response: which request it answers and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub id: RequestId,
    pub endpoint: EndpointKind,
    pub result: Result<ApiPayload, ApiFailure>,
}

/// String lists arrive either bare or wrapped under the endpoint's name.
/// Other fields of a wrapped object are ignored.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Bare(Vec<String>),
    Wrapped(serde_json::Map<String, serde_json::Value>),
}

impl ApiResponse {
    /// Decodes a finished web request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure::Unroutable`] when the context does not identify
    /// the request; such a response cannot be matched to any pending call.
    /// Failures of the call itself are reported inside [`ApiResponse::result`].
    pub fn decode(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Result<Self, ApiFailure> {
        let id = context
            .get(CONTEXT_REQUEST_ID)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(RequestId)
            .ok_or(ApiFailure::Unroutable(CONTEXT_REQUEST_ID))?;
        let endpoint = context
            .get(CONTEXT_ENDPOINT)
            .and_then(|raw| EndpointKind::parse(raw))
            .ok_or(ApiFailure::Unroutable(CONTEXT_ENDPOINT))?;

        let result = if (200..300).contains(&status) {
            Self::decode_body(endpoint, body, context)
        } else {
            Err(ApiFailure::Status { status })
        };

        Ok(Self {
            id,
            endpoint,
            result,
        })
    }

    fn decode_body(
        endpoint: EndpointKind,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Result<ApiPayload, ApiFailure> {
        let decode_error = |e: serde_json::Error| ApiFailure::Decode {
            endpoint,
            reason: e.to_string(),
        };

        match endpoint {
            EndpointKind::Products => {
                let query = context.get(CONTEXT_QUERY).map_or("", String::as_str);
                SearchResults::from_json(query, body)
                    .map(ApiPayload::Products)
                    .map_err(decode_error)
            }
            EndpointKind::Suggestions | EndpointKind::Categories | EndpointKind::Trending => {
                let list = match serde_json::from_slice::<ListEnvelope>(body).map_err(decode_error)? {
                    ListEnvelope::Bare(list) => list,
                    ListEnvelope::Wrapped(mut map) => {
                        let field = map.remove(endpoint.as_str()).ok_or_else(|| ApiFailure::Decode {
                            endpoint,
                            reason: format!("expected a `{endpoint}` field"),
                        })?;
                        serde_json::from_value(field).map_err(decode_error)?
                    }
                };

                Ok(match endpoint {
                    EndpointKind::Suggestions => ApiPayload::Suggestions(list),
                    EndpointKind::Categories => ApiPayload::Categories(list),
                    _ => ApiPayload::Trending(list),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(id: &str, endpoint: &str) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_REQUEST_ID.to_string(), id.to_string());
        map.insert(CONTEXT_ENDPOINT.to_string(), endpoint.to_string());
        map
    }

    #[test]
    fn decodes_bare_suggestion_list() {
        let response =
            ApiResponse::decode(200, br#"["shoes","shorts"]"#, &context("7", "suggestions")).unwrap();

        assert_eq!(response.id, RequestId(7));
        assert_eq!(response.endpoint, EndpointKind::Suggestions);
        assert_eq!(
            response.result,
            Ok(ApiPayload::Suggestions(vec!["shoes".into(), "shorts".into()]))
        );
    }

    #[test]
    fn decodes_wrapped_category_list() {
        let response = ApiResponse::decode(
            200,
            br#"{"categories":["Home","Garden"]}"#,
            &context("2", "categories"),
        )
        .unwrap();
        assert_eq!(
            response.result,
            Ok(ApiPayload::Categories(vec!["Home".into(), "Garden".into()]))
        );
    }

    #[test]
    fn wrapped_list_ignores_extra_fields() {
        let response = ApiResponse::decode(
            200,
            br#"{"suggestions":["shoes","shorts","shirts"],"total":3,"took_ms":4}"#,
            &context("5", "suggestions"),
        )
        .unwrap();
        assert_eq!(
            response.result,
            Ok(ApiPayload::Suggestions(vec![
                "shoes".into(),
                "shorts".into(),
                "shirts".into()
            ]))
        );
    }

    #[test]
    fn wrapped_field_that_is_not_a_string_list_is_a_decode_failure() {
        let response =
            ApiResponse::decode(200, br#"{"trending":[1,2]}"#, &context("3", "trending")).unwrap();
        assert!(matches!(response.result, Err(ApiFailure::Decode { .. })));
    }

    #[test]
    fn wrapped_list_under_wrong_key_is_a_decode_failure() {
        let response =
            ApiResponse::decode(200, br#"{"categories":["Home"]}"#, &context("2", "trending")).unwrap();
        assert!(matches!(
            response.result,
            Err(ApiFailure::Decode {
                endpoint: EndpointKind::Trending,
                ..
            })
        ));
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let response = ApiResponse::decode(503, b"", &context("9", "trending")).unwrap();
        assert_eq!(response.result, Err(ApiFailure::Status { status: 503 }));
    }

    #[test]
    fn products_use_query_from_context() {
        let mut ctx = context("4", "products");
        ctx.insert(CONTEXT_QUERY.to_string(), "lamp".to_string());

        let response = ApiResponse::decode(200, br#"[{"name":"Desk lamp"}]"#, &ctx).unwrap();
        match response.result {
            Ok(ApiPayload::Products(results)) => {
                assert_eq!(results.query, "lamp");
                assert_eq!(results.products[0].name, "Desk lamp");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_context_is_unroutable() {
        let mut ctx = context("x", "suggestions");
        assert_eq!(
            ApiResponse::decode(200, b"[]", &ctx),
            Err(ApiFailure::Unroutable(CONTEXT_REQUEST_ID))
        );

        ctx.insert(CONTEXT_REQUEST_ID.to_string(), "1".to_string());
        ctx.insert(CONTEXT_ENDPOINT.to_string(), "orders".to_string());
        assert_eq!(
            ApiResponse::decode(200, b"[]", &ctx),
            Err(ApiFailure::Unroutable(CONTEXT_ENDPOINT))
        );
    }
}
