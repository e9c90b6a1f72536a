//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` and the shim in `main.rs` performs them in order: HTTP calls
//! through `web_request`, timeouts through `set_timeout`, and hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::api::{ApiRequest, RequestId};
//! use shopsearch::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::StartTimer { delay: Duration::from_millis(300) },
//!     Action::Fetch(ApiRequest::trending(RequestId(1))),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::ApiRequest;
use std::time::Duration;

/// Commands produced by the event handler for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issues a search API call. Its completion comes back as
    /// [`Event::ApiResponse`](crate::app::Event::ApiResponse).
    Fetch(ApiRequest),

    /// Starts a host timeout. Its expiry comes back as
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    StartTimer {
        /// How long until the timer fires.
        delay: Duration,
    },

    /// Hides the plugin pane.
    CloseFocus,
}
