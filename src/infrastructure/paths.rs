//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually corresponds to the user's home directory.

use std::path::PathBuf;

/// Directory holding the plugin's trace files:
/// `/host/.local/share/zellij/shopsearch`, i.e.
/// `~/.local/share/zellij/shopsearch` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("shopsearch")
}

/// Maps a `~`-relative path from the plugin configuration onto `/host`.
///
/// ```
/// use shopsearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/shop.toml"), "/host/themes/shop.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
