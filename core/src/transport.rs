//! Transports that execute an `HttpRequest`.
//!
//! Blocking calls go through `ureq`, async calls through `reqwest` on the
//! ambient tokio runtime. Both are built fresh for every request with that
//! request's timeouts, and both accept any certificate in development mode.

use tracing::{debug, warn};

use crate::config::Timeouts;
use crate::error::{RestError, Result};
use crate::http::{HttpMethod, HttpRequest};
use crate::response::RestResponse;

/// Builds a blocking agent. Status codes >= 400 are returned as data.
pub(crate) fn blocking_agent(dev_mode: bool, timeouts: Timeouts) -> ureq::Agent {
    debug!("generating blocking client");
    let mut config = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_connect(Some(timeouts.connection))
        .timeout_recv_response(Some(timeouts.read))
        .timeout_recv_body(Some(timeouts.read));

    if dev_mode {
        warn!("dev mode is active, TLS certificates will not be verified");
        config = config.tls_config(
            ureq::tls::TlsConfig::builder()
                .disable_verification(true)
                .build(),
        );
    }

    config.build().new_agent()
}

/// Builds an async client.
pub(crate) fn async_client(dev_mode: bool, timeouts: Timeouts) -> Result<reqwest::Client> {
    debug!("generating async client");
    let mut builder = reqwest::Client::builder()
        .connect_timeout(timeouts.connection)
        .read_timeout(timeouts.read);

    if dev_mode {
        warn!("dev mode is active, TLS certificates will not be verified");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| RestError::ClientBuild(e.to_string()))
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Sends `request` and reads the whole body.
pub(crate) fn send_blocking(agent: &ureq::Agent, request: &HttpRequest) -> Result<RestResponse> {
    let url = request.url.as_str();
    let headers = request.headers.as_slice();
    let body = request.body.as_deref();

    let mut response = match (request.method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(url), headers).call(),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), headers).send(body),
        (HttpMethod::Post, None) => with_headers(agent.post(url), headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), headers).send(body),
        (HttpMethod::Put, None) => with_headers(agent.put(url), headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => with_headers(agent.patch(url), headers).send(body),
        (HttpMethod::Patch, None) => with_headers(agent.patch(url), headers).send_empty(),
    }?;

    let status = response.status().as_u16();
    // ureq caps `read_to_vec` at 10 MiB unless told otherwise; reqwest has no cap.
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()?;
    Ok(RestResponse::new(status, body))
}

/// Sends `request` on `client` and reads the whole body.
pub(crate) async fn send_async(client: reqwest::Client, request: HttpRequest) -> Result<RestResponse> {
    let mut builder = client.request(request.method.into(), request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    Ok(RestResponse::new(status, body.to_vec()))
}
