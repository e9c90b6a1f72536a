//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the API, domain
//! and UI layers. It owns every piece of screen state and decides which side
//! effects to request, but performs none of them itself.
//!
//! # Architecture
//!
//! ```text
//! Keys / Timers → Events → handle_event → State Mutations → Actions → Host calls
//!                               ↑                                        ↓
//!                               └────────── Event::ApiResponse ◀─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Generation-token debouncing over host timers
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Keyboard focus and the derived screen mode
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use shopsearch::app::{handle_event, AppState, Event};
//! use shopsearch::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Ready)?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::{Focus, Screen};
pub use state::AppState;
