//! Response wrappers for blocking and async requests.
//!
//! # Design
//! `RestResponse` holds the status, the raw body and a `success` flag fixed
//! at construction. Non-2xx statuses are ordinary responses, not errors.
//!
//! `AsyncRestResponse` wraps the tokio task driving a request that was
//! dispatched when the handle was created. Waiting resolves the task once:
//! a response is cached and handed out again on every later wait, while a
//! failure is reported once and leaves the handle closed.

use std::borrow::Cow;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{RestError, Result};

/// Lowest status counted as success (inclusive).
pub const MIN_SUCCESS_CODE: u16 = 200;

/// First status past the success range (exclusive).
pub const MAX_SUCCESS_CODE: u16 = 300;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    status: u16,
    success: bool,
    body: Vec<u8>,
}

impl RestResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let mut response = Self {
            status,
            success: false,
            body: body.into(),
        };
        response.success = response.verify_status(MIN_SUCCESS_CODE, MAX_SUCCESS_CODE);
        response
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// `true` when the status is in `200..300`.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Whether `min <= status < max`.
    pub fn verify_status(&self, min: u16, max: u16) -> bool {
        self.status >= min && self.status < max
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// The body as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the body as JSON.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| RestError::Deserialization(e.to_string()))
    }
}

enum AsyncState {
    Pending(JoinHandle<Result<RestResponse>>),
    Ready(RestResponse),
    Closed,
}

/// Handle to a request running in the background.
pub struct AsyncRestResponse {
    state: AsyncState,
}

impl AsyncRestResponse {
    pub(crate) fn new(task: JoinHandle<Result<RestResponse>>) -> Self {
        Self {
            state: AsyncState::Pending(task),
        }
    }

    /// Waits for the request to finish.
    ///
    /// The first successful response is cached; later calls return it
    /// immediately. If the request fails, the error is returned and the
    /// handle is closed, so later calls yield `RestError::Closed`.
    pub async fn wait_for_response(&mut self) -> Result<&RestResponse> {
        let outcome = match &mut self.state {
            AsyncState::Pending(task) => Some(match task.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Err(RestError::Closed),
                Err(e) => Err(RestError::TaskFailed(e.to_string())),
            }),
            AsyncState::Ready(_) => None,
            AsyncState::Closed => return Err(RestError::Closed),
        };

        if let Some(outcome) = outcome {
            match outcome {
                Ok(response) => {
                    debug!(status = response.status(), "async request completed");
                    self.state = AsyncState::Ready(response);
                }
                Err(err) => {
                    debug!(error = %err, "async request failed");
                    self.state = AsyncState::Closed;
                    return Err(err);
                }
            }
        }

        match &self.state {
            AsyncState::Ready(response) => Ok(response),
            _ => Err(RestError::Closed),
        }
    }

    /// The cached response, if `wait_for_response` already succeeded.
    pub fn rest_response(&self) -> Option<&RestResponse> {
        match &self.state {
            AsyncState::Ready(response) => Some(response),
            _ => None,
        }
    }

    /// Whether the request has completed, successfully or not.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            AsyncState::Pending(task) => task.is_finished(),
            AsyncState::Ready(_) | AsyncState::Closed => true,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, AsyncState::Closed)
    }

    /// Aborts the request if it is still running and closes the handle.
    /// A cached response stays available.
    pub fn close(&mut self) {
        if let AsyncState::Pending(task) = &self.state {
            task.abort();
            self.state = AsyncState::Closed;
        }
    }
}

impl Drop for AsyncRestResponse {
    fn drop(&mut self) {
        if let AsyncState::Pending(task) = &self.state {
            task.abort();
        }
    }
}

impl std::fmt::Debug for AsyncRestResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            AsyncState::Pending(_) => "pending",
            AsyncState::Ready(_) => "ready",
            AsyncState::Closed => "closed",
        };
        f.debug_struct("AsyncRestResponse")
            .field("state", &state)
            .field("response", &self.rest_response())
            .finish()
    }
}

impl IntoFuture for AsyncRestResponse {
    type Output = Result<RestResponse>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<RestResponse>> + Send>>;

    fn into_future(mut self) -> Self::IntoFuture {
        Box::pin(async move { self.wait_for_response().await.cloned() })
    }
}
