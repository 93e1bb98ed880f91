use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse classification of a failed invocation. Every kind is reported
/// the same way (error envelope on stderr, exit code 1); the kind exists
/// so callers and tests can tell failures apart without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// malformed address, config file or version string
    Configuration,
    /// unreachable daemon, failed identity probe, RPC deadline exceeded
    Connectivity,
    /// bad user input caught before any daemon call
    Validation,
    /// the daemon's tool exited non-zero or printed something unexpected
    Upstream,
    /// a reported success whose result fails an invariant
    PostCondition,
}

/// The JSON envelope written for every invocation.
///
/// Exactly one of `error` / `data` is meaningful: `error` only on failure,
/// `data` only on success (and only when the operation has output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            error: None,
            data: if data.is_null() { None } else { Some(data) },
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }

    /// Single-line JSON rendering. Falls back to a hand-built error
    /// envelope if serialisation itself fails.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            let fallback = Response::err(format!("Failed to marshal JSON response: {}", e));
            serde_json::to_string(&fallback).unwrap_or_else(|_| {
                r#"{"success":false,"error":"Failed to marshal JSON response"}"#.to_string()
            })
        })
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}
