//! Outgoing requests described as plain data.
//!
//! # Design
//! `HttpRequest` is resolved completely before any transport sees it: query
//! parameters are already in the URL, header entities are validated, the body
//! is encoded for its media type and the timeouts are fixed. The blocking and
//! async transports in `transport` only copy these fields onto their own
//! request builders, so everything interesting about a request can be tested
//! without a network.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::Timeouts;
use crate::entity::{RestEntity, TypedRestEntity};
use crate::error::{RestError, Result};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// GET and DELETE never carry a body.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// A fully resolved request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL with every parameter entity appended to the query.
    pub url: String,
    /// Header entities in order, plus `content-type` when a body is present.
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub media_type: Option<String>,
    pub timeouts: Timeouts,
}

impl HttpRequest {
    /// Resolves `endpoint` and `entities` into a body-less request.
    pub fn new(
        method: HttpMethod,
        endpoint: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<Self> {
        let typed = TypedRestEntity::from_entities(entities);

        let mut url = Url::parse(endpoint).map_err(|e| RestError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(RestError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        if !typed.parameters.is_empty() {
            debug!(count = typed.parameters.len(), "setting query parameters for request");
            let mut pairs = url.query_pairs_mut();
            for parameter in &typed.parameters {
                pairs.append_pair(parameter.name(), parameter.value());
            }
        }

        debug!(count = typed.headers.len(), "setting headers for request");
        let headers = typed
            .headers
            .iter()
            .map(|h| check_header(h.name(), h.value()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            method,
            url: url.to_string(),
            headers,
            body: None,
            media_type: None,
            timeouts,
        })
    }

    /// Encodes `body` for `media_type` and attaches it.
    ///
    /// Any `content-type` header entity is replaced by `media_type`.
    pub fn with_body<B>(mut self, body: &B, media_type: &str) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let mime = parse_media_type(media_type)?;
        let bytes = encode_body(body, &mime)?;
        let (name, value) = check_header("content-type", media_type)?;

        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case("content-type"));
        self.headers.push((name, value));
        self.body = Some(bytes);
        self.media_type = Some(media_type.to_string());
        Ok(self)
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn check_header(name: &str, value: &str) -> Result<(String, String)> {
    http::HeaderName::from_bytes(name.as_bytes()).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    http::HeaderValue::from_str(value).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((name.to_string(), value.to_string()))
}

pub(crate) fn parse_media_type(media_type: &str) -> Result<mime::Mime> {
    media_type
        .parse::<mime::Mime>()
        .map_err(|_| RestError::InvalidMediaType(media_type.to_string()))
}

/// Serializes `body` according to `mime`.
///
/// JSON types go through serde_json and form types through
/// serde_urlencoded. Anything else sends string values verbatim; `text/*`
/// falls back to JSON for non-string values, other types reject them.
pub fn encode_body<B>(body: &B, mime: &mime::Mime) -> Result<Vec<u8>>
where
    B: Serialize + ?Sized,
{
    let failed = |reason: String| RestError::Serialization {
        media_type: mime.essence_str().to_string(),
        reason,
    };

    if is_json(mime) {
        return serde_json::to_vec(body).map_err(|e| failed(e.to_string()));
    }
    if mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        return serde_urlencoded::to_string(body)
            .map(String::into_bytes)
            .map_err(|e| failed(e.to_string()));
    }

    match serde_json::to_value(body).map_err(|e| failed(e.to_string()))? {
        serde_json::Value::String(text) => Ok(text.into_bytes()),
        other if mime.type_() == mime::TEXT => Ok(other.to_string().into_bytes()),
        _ => Err(failed("only string bodies can be sent as this type".to_string())),
    }
}

fn is_json(mime: &mime::Mime) -> bool {
    mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
}
