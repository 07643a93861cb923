// Environment-driven settings for the CLI.

use crate::session::SessionStore;
use std::env;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL used when the saved session has none (`MASTERBLOG_API_URL`).
    pub default_base_url: Option<String>,
    /// Where the session is persisted (`MASTERBLOG_SESSION_FILE`).
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let default_base_url = var("MASTERBLOG_API_URL");
        let session_file = var("MASTERBLOG_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(SessionStore::default_path);
        Config {
            default_base_url,
            session_file,
        }
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.session_file)
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => {
            debug!("{key} not set");
            None
        }
    }
}
