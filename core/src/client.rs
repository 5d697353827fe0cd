//! Verb dispatch over a pluggable executor.
//!
//! # Design
//! `RestClient` carries one method per HTTP verb in four shapes: blocking or
//! async, with defaults or with explicit timeouts (and media type for verbs
//! that carry a body). All of them are provided methods that resolve their
//! defaults, build an `HttpRequest` and hand it to one of the two required
//! primitives, `execute` and `execute_async`. An implementor only decides how
//! a finished request travels over the wire.

use serde::Serialize;
use tracing::debug;

use crate::config::{Timeouts, DEFAULT_MEDIA_TYPE};
use crate::entity::RestEntity;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::{AsyncRestResponse, RestResponse};

/// One method per HTTP verb, blocking and async.
pub trait RestClient {
    /// Sends a resolved request and waits for the response.
    fn execute(&self, request: HttpRequest) -> Result<RestResponse>;

    /// Dispatches a resolved request and returns a handle to its response.
    fn execute_async(&self, request: HttpRequest) -> Result<AsyncRestResponse>;

    /// Timeouts used by the shorthand verb methods.
    fn default_timeouts(&self) -> Timeouts {
        Timeouts::default()
    }

    /// Media type used by the shorthand body-carrying verb methods.
    fn default_media_type(&self) -> &str {
        DEFAULT_MEDIA_TYPE
    }

    fn get(&self, endpoint: &str, entities: &[RestEntity]) -> Result<RestResponse> {
        debug!("using default values for timeouts");
        self.get_with(endpoint, self.default_timeouts(), entities)
    }

    fn get_with(
        &self,
        endpoint: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<RestResponse> {
        let request = HttpRequest::new(HttpMethod::Get, endpoint, timeouts, entities)?;
        self.execute(request)
    }

    fn async_get(&self, endpoint: &str, entities: &[RestEntity]) -> Result<AsyncRestResponse> {
        debug!("using default values for timeouts");
        self.async_get_with(endpoint, self.default_timeouts(), entities)
    }

    fn async_get_with(
        &self,
        endpoint: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse> {
        let request = HttpRequest::new(HttpMethod::Get, endpoint, timeouts, entities)?;
        self.execute_async(request)
    }

    fn post<B>(&self, endpoint: &str, body: &B, entities: &[RestEntity]) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.post_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn post_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Post, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute(request)
    }

    fn async_post<B>(
        &self,
        endpoint: &str,
        body: &B,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.async_post_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn async_post_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Post, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute_async(request)
    }

    fn put<B>(&self, endpoint: &str, body: &B, entities: &[RestEntity]) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.put_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn put_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Put, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute(request)
    }

    fn async_put<B>(
        &self,
        endpoint: &str,
        body: &B,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.async_put_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn async_put_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Put, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute_async(request)
    }

    fn patch<B>(&self, endpoint: &str, body: &B, entities: &[RestEntity]) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.patch_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn patch_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<RestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Patch, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute(request)
    }

    fn async_patch<B>(
        &self,
        endpoint: &str,
        body: &B,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("using default values for timeouts and media type");
        self.async_patch_with(
            endpoint,
            body,
            self.default_media_type(),
            self.default_timeouts(),
            entities,
        )
    }

    fn async_patch_with<B>(
        &self,
        endpoint: &str,
        body: &B,
        media_type: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = HttpRequest::new(HttpMethod::Patch, endpoint, timeouts, entities)?
            .with_body(body, media_type)?;
        self.execute_async(request)
    }

    fn delete(&self, endpoint: &str, entities: &[RestEntity]) -> Result<RestResponse> {
        debug!("using default values for timeouts");
        self.delete_with(endpoint, self.default_timeouts(), entities)
    }

    fn delete_with(
        &self,
        endpoint: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<RestResponse> {
        let request = HttpRequest::new(HttpMethod::Delete, endpoint, timeouts, entities)?;
        self.execute(request)
    }

    fn async_delete(&self, endpoint: &str, entities: &[RestEntity]) -> Result<AsyncRestResponse> {
        debug!("using default values for timeouts");
        self.async_delete_with(endpoint, self.default_timeouts(), entities)
    }

    fn async_delete_with(
        &self,
        endpoint: &str,
        timeouts: Timeouts,
        entities: &[RestEntity],
    ) -> Result<AsyncRestResponse> {
        let request = HttpRequest::new(HttpMethod::Delete, endpoint, timeouts, entities)?;
        self.execute_async(request)
    }
}
