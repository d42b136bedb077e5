//! Blocking `Transport` backed by `ureq`.
//!
//! # Design
//! A fresh agent is built per call so the effective `timeout` applies as the
//! agent's global timeout and no connection state outlives the call. Status
//! codes are never turned into errors here; only failures to complete the
//! round trip become `TransportError`.

use serde_json::Value;
use tracing::debug;
use ureq::http::Request;
use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpResponse, Transport};
use crate::options::{RequestOptions, DEFAULT_CONTENT_TYPE};

/// Error code for any failure to complete the HTTP round trip.
pub const REQUEST_FAILED: &str = "http_request_failed";

#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(options.timeout))
            .build()
            .new_agent();

        let mut builder = Request::builder().method(method.as_str()).uri(url);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = options.body.as_ref().map(|b| encode_body(b, options));
        let result = match body {
            Some(bytes) => builder.body(bytes).map(|req| agent.run(req)),
            None => builder.body(()).map(|req| agent.run(req)),
        }
        .map_err(|e| TransportError::new(REQUEST_FAILED, e.to_string()))?;

        let mut response = result.map_err(|e| {
            debug!(url = %url, error = %e, "request failed");
            TransportError::new(REQUEST_FAILED, e.to_string())
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(REQUEST_FAILED, e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        self.execute(HttpMethod::Get, url, options)
    }

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        self.execute(HttpMethod::Post, url, options)
    }

    fn request(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        self.execute(options.method.unwrap_or(HttpMethod::Get), url, options)
    }
}

/// Strings go out verbatim. Anything else is form-encoded under a
/// form content type and JSON-encoded otherwise. Top-level arrays are
/// form-encoded with their indices as keys.
fn encode_body(body: &Value, options: &RequestOptions) -> Vec<u8> {
    if let Value::String(s) = body {
        return s.clone().into_bytes();
    }
    let is_form = options
        .header("content-type")
        .is_some_and(|ct| ct.starts_with(DEFAULT_CONTENT_TYPE));
    if is_form {
        form_encode(body).into_bytes()
    } else {
        body.to_string().into_bytes()
    }
}

fn form_encode(body: &Value) -> String {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    match body {
        Value::Object(map) => {
            for (key, value) in map {
                form.append_pair(key, &scalar(value));
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                form.append_pair(&index.to_string(), &scalar(value));
            }
        }
        Value::Null => {}
        other => {
            return scalar(other);
        }
    }
    form.finish()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
