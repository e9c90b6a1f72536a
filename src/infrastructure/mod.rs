//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is visible under `/host`; these helpers translate
//! configured paths and locate the plugin's data directory.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
