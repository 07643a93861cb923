// Session state: the API base URL and the bearer token. Both survive
// between runs in a small JSON file in the user's home directory.

use crate::error::{ClientError, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = ".masterblog_session.json";

/// Explicit session passed to every request the API client builds.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Session {
    #[serde(rename = "apiBaseUrl", default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(rename = "jwt_token", default, skip_serializing_if = "Option::is_none")]
    pub jwt_token: Option<String>,
}

impl Session {
    /// Base URL with any trailing slash removed, or an error when unset.
    pub fn base_url(&self) -> Result<&str> {
        match self.api_base_url.as_deref().map(|u| u.trim_end_matches('/')) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ClientError::MissingBaseUrl),
        }
    }

    pub fn set_base_url(&mut self, url: &str) {
        let url = url.trim().trim_end_matches('/');
        self.api_base_url = if url.is_empty() { None } else { Some(url.to_string()) };
    }

    pub fn set_token(&mut self, token: &str) {
        self.jwt_token = Some(token.to_string());
    }

    pub fn clear_token(&mut self) {
        self.jwt_token = None;
    }

    pub fn has_token(&self) -> bool {
        self.jwt_token.is_some()
    }

    /// Value for the `Authorization` header. An absent token still yields
    /// a header so the backend decides how to reject it.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.jwt_token.as_deref().unwrap_or_default())
    }
}

/// Reads and writes the session file. Every save replaces the whole file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// Session file in the home directory, or the working directory when
    /// no home can be resolved.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SESSION_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session; a missing file is an empty session.
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let data = std::fs::read_to_string(&self.path).map_err(session_err)?;
        if data.trim().is_empty() {
            return Ok(Session::default());
        }
        serde_json::from_str(&data).map_err(session_err)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_string_pretty(session).map_err(session_err)?;
        std::fs::write(&self.path, data).map_err(session_err)
    }
}

fn session_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> ClientError {
    ClientError::Session(Box::new(e))
}

/// Read the `sub` claim from a JWT payload without verifying it.
/// Returns "Unknown" when the payload has no string subject.
pub fn token_subject(token: &str) -> Result<String> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ClientError::MalformedToken("missing payload segment".into()))?;
    let trimmed = payload.trim_end_matches('=');
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| ClientError::MalformedToken(e.to_string()))?;
    let claims: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ClientError::MalformedToken(e.to_string()))?;
    Ok(claims
        .get("sub")
        .and_then(|s| s.as_str())
        .unwrap_or("Unknown")
        .to_string())
}
