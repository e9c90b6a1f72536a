//! Search API request model.
//!
//! Every request is identified by a [`RequestId`] drawn from a monotonically
//! increasing counter owned by the application state. The id travels with the
//! HTTP call in Zellij's request context and comes back with the response, so
//! the handler can tell a fresh response from a stale one.
//!
//! Requests also carry the current OpenTelemetry span context, which lets the
//! span that handles a response be linked to the span that issued it even
//! though the two run in separate `update` calls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Context key holding the request id.
pub const CONTEXT_REQUEST_ID: &str = "request_id";
/// Context key holding the endpoint name.
pub const CONTEXT_ENDPOINT: &str = "endpoint";
/// Context key holding the query a product search was issued for.
pub const CONTEXT_QUERY: &str = "query";
/// Context key holding the OpenTelemetry trace id.
pub const CONTEXT_TRACE_ID: &str = "trace_id";
/// Context key holding the OpenTelemetry parent span id.
pub const CONTEXT_PARENT_SPAN_ID: &str = "parent_span_id";

/// Monotonically increasing request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Returns the id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which search API operation a request or response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointKind {
    Suggestions,
    Categories,
    Trending,
    Products,
}

impl EndpointKind {
    /// Stable name used in request contexts and response envelopes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suggestions => "suggestions",
            Self::Categories => "categories",
            Self::Trending => "trending",
            Self::Products => "products",
        }
    }

    /// Parses the name produced by [`EndpointKind::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "suggestions" => Some(Self::Suggestions),
            "categories" => Some(Self::Categories),
            "trending" => Some(Self::Trending),
            "products" => Some(Self::Products),
            _ => None,
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search API operation together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    /// Autocomplete suggestions for a partial query.
    Suggestions { query: String },
    /// The list of browsable categories.
    Categories,
    /// Globally trending search strings.
    Trending,
    /// Full product search.
    Products { query: String },
}

impl Endpoint {
    #[must_use]
    pub const fn kind(&self) -> EndpointKind {
        match self {
            Self::Suggestions { .. } => EndpointKind::Suggestions,
            Self::Categories => EndpointKind::Categories,
            Self::Trending => EndpointKind::Trending,
            Self::Products { .. } => EndpointKind::Products,
        }
    }

    /// Query text carried by the endpoint, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Suggestions { query } | Self::Products { query } => Some(query),
            Self::Categories | Self::Trending => None,
        }
    }
}

/// Distributed tracing context carried through the HTTP request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request, as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current tracing span.
    ///
    /// Returns `None` when no valid span context is active, e.g. when tracing
    /// has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Writes the ids into an HTTP request context map.
    pub fn insert_into(&self, context: &mut BTreeMap<String, String>) {
        context.insert(CONTEXT_TRACE_ID.to_string(), self.trace_id.clone());
        context.insert(CONTEXT_PARENT_SPAN_ID.to_string(), self.parent_span_id.clone());
    }

    /// Reads the ids back from a response context map.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(CONTEXT_TRACE_ID)?.clone(),
            parent_span_id: context.get(CONTEXT_PARENT_SPAN_ID)?.clone(),
        })
    }

    /// Makes the issuing span the remote parent of whatever runs while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// A request to the search API, ready to be encoded as an HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub id: RequestId,
    pub endpoint: Endpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

/// Generates request constructors that attach the current trace context.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident $({ $($field:ident: $ty:ty),* $(,)? })?)
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name(id: RequestId $($(, $field: $ty)*)?) -> Self {
                    Self {
                        id,
                        endpoint: Endpoint::$variant $({ $($field,)* })?,
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    suggestions(Suggestions { query: String }),
    categories(Categories),
    trending(Trending),
    products(Products { query: String }),
}

impl ApiRequest {
    /// Builds the context map that Zellij hands back with the response.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID.to_string(), self.id.to_string());
        context.insert(
            CONTEXT_ENDPOINT.to_string(),
            self.endpoint.kind().as_str().to_string(),
        );
        if let Endpoint::Products { query } = &self.endpoint {
            context.insert(CONTEXT_QUERY.to_string(), query.clone());
        }
        if let Some(trace_context) = &self.trace_context {
            trace_context.insert_into(&mut context);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_endpoint_and_id() {
        let request = ApiRequest::suggestions(RequestId(4), "sho".to_string());
        assert_eq!(request.id, RequestId(4));
        assert_eq!(
            request.endpoint,
            Endpoint::Suggestions {
                query: "sho".to_string()
            }
        );

        let request = ApiRequest::categories(RequestId(5));
        assert_eq!(request.endpoint, Endpoint::Categories);
        assert_eq!(request.endpoint.query(), None);
    }

    #[test]
    fn trace_context_absent_without_subscriber() {
        let request = ApiRequest::trending(RequestId(1));
        assert!(request.trace_context.is_none());
    }

    #[test]
    fn context_carries_routing_keys() {
        let request = ApiRequest::products(RequestId(12), "red shoes".to_string());
        let context = request.context();

        assert_eq!(context.get(CONTEXT_REQUEST_ID).map(String::as_str), Some("12"));
        assert_eq!(context.get(CONTEXT_ENDPOINT).map(String::as_str), Some("products"));
        assert_eq!(context.get(CONTEXT_QUERY).map(String::as_str), Some("red shoes"));
        assert!(!context.contains_key(CONTEXT_TRACE_ID));
    }

    #[test]
    fn trace_context_survives_context_map() {
        let trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let mut context = BTreeMap::new();
        trace.insert_into(&mut context);

        assert_eq!(TraceContext::from_context(&context), Some(trace));
    }

    #[test]
    fn endpoint_names_round_trip() {
        for kind in [
            EndpointKind::Suggestions,
            EndpointKind::Categories,
            EndpointKind::Trending,
            EndpointKind::Products,
        ] {
            assert_eq!(EndpointKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EndpointKind::parse("orders"), None);
    }
}
