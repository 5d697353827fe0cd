//! A REST client with one method per HTTP verb.
//!
//! # Overview
//! `RestClient` offers GET, POST, PUT, PATCH and DELETE in blocking and
//! async forms, each with a shorthand that applies default timeouts
//! (5000 ms connect, 5000 ms read) and the default media type
//! (`application/json`). Headers and query parameters are passed as
//! `RestEntity` values; responses come back as `RestResponse` with the
//! status, the raw body and a `success` flag for 2xx statuses.
//!
//! # Design
//! - Requests are resolved into a plain-data `HttpRequest` before any I/O,
//!   so entity placement, body encoding and default resolution are testable
//!   without a network.
//! - `Resty` executes requests with `ureq` (blocking) and `reqwest` (async,
//!   on the caller's tokio runtime), building a fresh transport per request.
//! - Development mode turns off TLS certificate verification for local and
//!   mock endpoints.
//! - HTTP error statuses are responses, not errors; `RestError` is reserved
//!   for requests that could not be built or delivered.

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod logging;
pub mod response;
pub mod resty;
mod transport;

pub use client::RestClient;
pub use config::{
    RestyConfig, Timeouts, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MEDIA_TYPE, DEFAULT_READ_TIMEOUT,
};
pub use entity::{RestEntity, RestEntityType, TypedRestEntity};
pub use error::{RestError, Result};
pub use crate::http::{HttpMethod, HttpRequest};
pub use response::{AsyncRestResponse, RestResponse};
pub use resty::{Resty, RestyBuilder};
