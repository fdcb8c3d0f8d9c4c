//! Server settings. Only this static host reads the environment; the browser
//! app itself takes no environment variables.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DIST_DIR: &str = "dist";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Output directory of the frontend build (`index.html` + `assets/`).
    pub dist_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `PORT` and `DIST_DIR` as returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "Invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let dist_dir = PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| DEFAULT_DIST_DIR.to_string()));
        ServerConfig { port, dist_dir }
    }
}
