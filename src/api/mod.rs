//! Search API client surface.
//!
//! The plugin never performs I/O itself: the application layer emits
//! [`ApiRequest`]s as actions, the plugin shim encodes them with
//! [`build_call`] and hands them to Zellij's `web_request`, and the finished
//! call comes back as an event that [`ApiResponse::decode`] turns into a
//! routed response.
//!
//! ```text
//! handle_event ─▶ Action::Fetch(ApiRequest) ─▶ build_call ─▶ web_request
//!      ▲                                                        │
//!      └──── Event::ApiResponse ◀── ApiResponse::decode ◀── WebRequestResult
//! ```
//!
//! - `request`: request ids, endpoints, trace context propagation
//! - `http`: HTTP encoding against configurable [`ApiSettings`]
//! - `response`: response routing and decoding, [`ApiFailure`]

pub mod http;
pub mod request;
pub mod response;

pub use http::{build_call, ApiSettings, HttpCall, HttpMethod};
pub use request::{ApiRequest, Endpoint, EndpointKind, RequestId, TraceContext};
pub use response::{ApiFailure, ApiPayload, ApiResponse};
