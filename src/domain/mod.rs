//! Domain layer for the shopsearch plugin.
//!
//! Types here are independent of Zellij and of the HTTP transport.
//!
//! - [`error`]: Error types, result alias and the user-facing failure message
//! - [`product`]: Product search result model

pub mod error;
pub mod product;

pub use error::{Result, SearchError, GENERIC_FAILURE_MESSAGE};
pub use product::{time_ago, Product, SearchResults};
