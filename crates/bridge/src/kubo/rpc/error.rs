use std::time::Duration;

use common::prelude::ErrorKind;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("request to {endpoint} timed out after {}s", .after.as_secs())]
    Timeout {
        endpoint: &'static str,
        after: Duration,
    },
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
}

impl RpcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RpcError::Reqwest(_) | RpcError::Timeout { .. } => ErrorKind::Connectivity,
            RpcError::UrlParse(_) => ErrorKind::Configuration,
            RpcError::HttpStatus(..) | RpcError::Decode { .. } => ErrorKind::Upstream,
        }
    }
}
