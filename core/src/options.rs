//! Request options: the defaults template, caller overrides, and the merge
//! that produces the effective options handed to a `Transport`.
//!
//! # Design
//! Merging is shallow and key-level. A caller's value for a key replaces the
//! default for that key wholesale, so a caller header list replaces the
//! default header list rather than being appended to it. Option names outside
//! the known set travel in `extra` and reach the transport unchanged.
//!
//! Both types are serde-friendly so option sets can be kept in JSON config;
//! `timeout` is expressed in (possibly fractional) seconds.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::HttpMethod;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(50);
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The effective options for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    #[serde(with = "secs")]
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
    /// Payload for POST/PUT/PATCH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Explicit verb for the transport's generic request call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            headers: vec![("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string())],
            body: None,
            method: None,
            extra: BTreeMap::new(),
        }
    }
}

impl RequestOptions {
    /// Overlay `overrides` key by key; the caller's value wins wherever present.
    pub fn merge(mut self, overrides: &Overrides) -> Self {
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        if let Some(headers) = &overrides.headers {
            self.headers = headers.clone();
        }
        if let Some(body) = &overrides.body {
            self.body = Some(body.clone());
        }
        if let Some(method) = overrides.method {
            self.method = Some(method);
        }
        self.extra
            .extend(overrides.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Caller-supplied options. Every key is optional; `Overrides::default()`
/// overrides nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    #[serde(with = "opt_secs", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<(String, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Append one header to the override list. The resulting list still
    /// replaces the default headers as a whole.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

mod secs {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        if d.subsec_nanos() == 0 {
            s.serialize_u64(d.as_secs())
        } else {
            s.serialize_f64(d.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

mod opt_secs {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => super::secs::serialize(d, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults() {
        let opts = RequestOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(50));
        assert_eq!(
            opts.headers,
            vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string()
            )]
        );
        assert!(opts.body.is_none());
        assert!(opts.method.is_none());
        assert!(opts.extra.is_empty());
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let merged = RequestOptions::default().merge(&Overrides::default());
        assert_eq!(merged, RequestOptions::default());
    }

    #[test]
    fn caller_timeout_wins() {
        let merged =
            RequestOptions::default().merge(&Overrides::new().timeout(Duration::from_secs(10)));
        assert_eq!(merged.timeout, Duration::from_secs(10));
        assert_eq!(merged.headers, RequestOptions::default().headers);
    }

    #[test]
    fn caller_headers_replace_default_list() {
        let merged = RequestOptions::default().merge(&Overrides::new().header("Accept", "*/*"));
        assert_eq!(merged.headers, vec![("Accept".to_string(), "*/*".to_string())]);
        assert!(merged.header("content-type").is_none());
    }

    #[test]
    fn empty_header_list_still_replaces_defaults() {
        let merged = RequestOptions::default().merge(&Overrides::new().headers(Vec::new()));
        assert!(merged.headers.is_empty());
    }

    #[test]
    fn extra_keys_merge_per_key() {
        let mut base = RequestOptions::default();
        base.extra.insert("redirection".to_string(), json!(5));
        base.extra.insert("user-agent".to_string(), json!("base"));
        let merged = base.merge(&Overrides::new().extra("redirection", json!(0)));
        assert_eq!(merged.extra["redirection"], json!(0));
        assert_eq!(merged.extra["user-agent"], json!("base"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let opts = RequestOptions::default();
        assert_eq!(
            opts.header("content-TYPE"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(opts.header("accept"), None);
    }

    #[test]
    fn overrides_from_json_collect_unknown_keys() {
        let overrides: Overrides = serde_json::from_value(json!({
            "timeout": 2.5,
            "headers": [["Accept", "application/json"]],
            "method": "PATCH",
            "sslverify": false
        }))
        .unwrap();
        assert_eq!(overrides.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(
            overrides.headers,
            Some(vec![("Accept".to_string(), "application/json".to_string())])
        );
        assert_eq!(overrides.method, Some(HttpMethod::Patch));
        assert!(overrides.body.is_none());
        assert_eq!(overrides.extra["sslverify"], json!(false));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        let result: Result<Overrides, _> = serde_json::from_value(json!({"timeout": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn request_options_serialize_timeout_as_seconds() {
        let value = serde_json::to_value(RequestOptions::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "timeout": 50,
                "headers": [["Content-Type", "application/x-www-form-urlencoded"]]
            })
        );

        let mut opts = RequestOptions::default();
        opts.timeout = Duration::from_millis(1500);
        opts.method = Some(HttpMethod::Put);
        let value = serde_json::to_value(opts).unwrap();
        assert_eq!(value["timeout"], json!(1.5));
        assert_eq!(value["method"], json!("PUT"));
    }

    #[test]
    fn request_options_fill_missing_keys_from_defaults() {
        let opts: RequestOptions = serde_json::from_value(json!({"timeout": 5})).unwrap();
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.headers, RequestOptions::default().headers);
    }
}
