//! The normalized response envelope.
//!
//! # Design
//! `normalize` is the single place a transport result turns into what callers
//! see. Transport errors pass through untouched. A successful round trip
//! always yields the envelope, even when the body is empty or is not JSON; in
//! that case `body` is `null`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, TransportError};
use crate::http::HttpResponse;

/// Status, reason phrase, headers and parsed JSON body of one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Lowercased header names; repeated headers joined with `", "`.
    pub headers: BTreeMap<String, String>,
    pub code: u16,
    pub message: String,
    /// Parsed JSON body, or `null` when the body was empty or not JSON.
    pub body: Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decode the body into `T`.
    ///
    /// A `null` body (sent by the server, empty, or not JSON) is handed to
    /// `T` like any other value: `Option<T>` decodes it as `None`, while
    /// types that need data reject it with `ClientError::InvalidResponse`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        T::deserialize(&self.body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Turn a transport result into the envelope, or pass its error through.
pub fn normalize(result: Result<HttpResponse, TransportError>) -> Result<Response, ClientError> {
    let raw = match result {
        Ok(raw) => raw,
        Err(e) => {
            debug!(code = %e.code, message = %e.message, "transport failed");
            return Err(ClientError::Transport(e));
        }
    };

    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in raw.headers {
        headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    Ok(Response {
        headers,
        code: raw.status,
        message: raw.message,
        body: parse_body(&raw.body),
    })
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, len = body.len(), "response body is not JSON; using null");
            Value::Null
        }
    }
}
