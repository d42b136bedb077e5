//! Dispatch-and-normalize HTTP client over a pluggable transport.
//!
//! # Overview
//! `HttpClient` turns a verb, a URL, an optional payload and optional caller
//! overrides into exactly one transport call, then normalizes the outcome
//! into a `Response` envelope (`headers`, `code`, `message`, `body`) or a
//! `ClientError`.
//!
//! # Design
//! - The client performs no I/O itself; a `Transport` does (host-does-IO).
//!   `UreqTransport` is provided behind the default `ureq` feature.
//! - Effective options are rebuilt for every call from an immutable defaults
//!   template, so a client can be shared freely across threads.
//! - A body that is empty or not JSON yields `body: null`, never an error.
//! - Verb strings are parsed into the closed `HttpMethod` enum; anything
//!   else is a `ClientError::BadRequest` that never reaches the network.

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod response;
#[cfg(feature = "ureq")]
pub mod ureq_transport;

pub use client::HttpClient;
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, HttpResponse, Transport};
pub use options::{Overrides, RequestOptions};
pub use response::{normalize, Response};
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
