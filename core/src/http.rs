//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The wrapper never touches the network itself. A `Transport` receives the
//! effective `RequestOptions` for a call and hands back an `HttpResponse`
//! described as plain data, or a `TransportError`. The three transport
//! operations mirror what typical host HTTP facilities offer: a GET shortcut,
//! a POST shortcut, and a generic request that takes its verb from
//! `RequestOptions::method`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, TransportError};
use crate::options::RequestOptions;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb carry the caller's payload as a body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, otherwise exact: `" get"` is rejected.
impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(ClientError::BadRequest(s.to_string())),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by a `Transport` after executing a request, then normalized
/// into a `Response` envelope by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Status reason phrase, e.g. `"OK"`.
    pub message: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The network collaborator behind `HttpClient`.
///
/// Implementations perform exactly one round trip per call and report
/// network-level failures as `TransportError`. Non-2xx statuses are
/// responses, not errors.
pub trait Transport {
    /// Perform a GET request. `options.method` is not consulted.
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError>;

    /// Perform a POST request. `options.method` is not consulted.
    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError>;

    /// Perform a request using `options.method`, or GET when none is set.
    fn request(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).get(url, options)
    }

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).post(url, options)
    }

    fn request(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).request(url, options)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).get(url, options)
    }

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).post(url, options)
    }

    fn request(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, TransportError> {
        (**self).request(url, options)
    }
}
