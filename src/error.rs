// Error types shared by the API client and the session store.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No API base URL configured")]
    MissingBaseUrl,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No access token in response: {raw}")]
    MissingToken { raw: String },

    #[error("Invalid token format: {0}")]
    MalformedToken(String),

    #[error("Session file error: {0}")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, ClientError>;
