//! Verb dispatch over a pluggable transport.
//!
//! # Design
//! `HttpClient` holds a transport and an immutable defaults template. Each
//! call builds its effective `RequestOptions` from scratch (defaults, then the
//! verb's own additions, then the caller's overrides), hands them to the
//! transport, and normalizes the result. Nothing is written back to the
//! client, so one instance can serve concurrent callers.

use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::http::{HttpMethod, Transport};
use crate::options::{Overrides, RequestOptions};
use crate::response::{normalize, Response};

/// Synchronous, stateless HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
    defaults: RequestOptions,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_defaults(transport, RequestOptions::default())
    }

    /// Use `defaults` instead of the stock template (50s timeout, form content type).
    pub fn with_defaults(transport: T, defaults: RequestOptions) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    pub fn defaults(&self) -> &RequestOptions {
        &self.defaults
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatch on a verb name. Unknown verbs fail with `ClientError::BadRequest`
    /// before any transport call. `data` is ignored for GET and DELETE.
    pub fn request(
        &self,
        verb: &str,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        let method = HttpMethod::from_str(verb)?;
        self.send(method, url, data, overrides)
    }

    /// Typed dispatch. `data` is ignored for GET and DELETE.
    pub fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        match method {
            HttpMethod::Get => self.get(url, overrides),
            HttpMethod::Post => self.post(url, data, overrides),
            HttpMethod::Put => self.put(url, data, overrides),
            HttpMethod::Patch => self.patch(url, data, overrides),
            HttpMethod::Delete => self.delete(url, overrides),
        }
    }

    pub fn get(&self, url: &str, overrides: &Overrides) -> Result<Response, ClientError> {
        let options = self.effective_options(HttpMethod::Get, Value::Null, overrides);
        debug!(url = %url, "GET");
        normalize(self.transport.get(url, &options))
    }

    pub fn post(
        &self,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        let options = self.effective_options(HttpMethod::Post, data, overrides);
        debug!(url = %url, "POST");
        normalize(self.transport.post(url, &options))
    }

    pub fn put(
        &self,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        self.generic(HttpMethod::Put, url, data, overrides)
    }

    pub fn patch(
        &self,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        self.generic(HttpMethod::Patch, url, data, overrides)
    }

    pub fn delete(&self, url: &str, overrides: &Overrides) -> Result<Response, ClientError> {
        self.generic(HttpMethod::Delete, url, Value::Null, overrides)
    }

    /// The options `method` would hand to the transport.
    ///
    /// GET and POST leave `method` unset because the transport's shortcut
    /// calls imply the verb; PUT, PATCH and DELETE go through the generic call
    /// and need it spelled out. Only POST, PUT and PATCH carry `data` as body.
    pub fn effective_options(
        &self,
        method: HttpMethod,
        data: Value,
        overrides: &Overrides,
    ) -> RequestOptions {
        let mut options = self.defaults.clone();
        if method.carries_body() {
            options.body = Some(data);
        }
        if matches!(method, HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete) {
            options.method = Some(method);
        }
        options.merge(overrides)
    }

    fn generic(
        &self,
        method: HttpMethod,
        url: &str,
        data: Value,
        overrides: &Overrides,
    ) -> Result<Response, ClientError> {
        let options = self.effective_options(method, data, overrides);
        debug!(url = %url, method = %method, "generic request");
        normalize(self.transport.request(url, &options))
    }
}
