//! The default `RestClient`, backed by `ureq` and `reqwest`.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::client::RestClient;
use crate::config::{RestyConfig, Timeouts};
use crate::error::{RestError, Result};
use crate::http::HttpRequest;
use crate::response::{AsyncRestResponse, RestResponse};
use crate::transport;

/// REST client that builds a new transport for every request.
///
/// ```no_run
/// use resty_core::{RestClient, RestEntity, Resty};
///
/// let client = Resty::builder().dev_mode(true).build()?;
/// let response = client.get(
///     "https://localhost:8443/health",
///     &[RestEntity::header("Accept", "application/json")],
/// )?;
/// assert!(response.is_success());
/// # Ok::<(), resty_core::RestError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resty {
    config: RestyConfig,
}

impl Resty {
    pub fn new(config: RestyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> RestyBuilder {
        RestyBuilder::default()
    }

    /// Configuration read from `RESTY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(RestyConfig::from_env()?)
    }

    pub fn config(&self) -> &RestyConfig {
        &self.config
    }

    pub fn is_dev_mode(&self) -> bool {
        self.config.dev_mode
    }

    pub fn default_connection_timeout(&self) -> Duration {
        self.config.timeouts.connection
    }

    pub fn default_read_timeout(&self) -> Duration {
        self.config.timeouts.read
    }
}

impl RestClient for Resty {
    #[instrument(name = "resty_execute", skip(self, request), fields(method = %request.method, url = %request.url))]
    fn execute(&self, request: HttpRequest) -> Result<RestResponse> {
        let agent = transport::blocking_agent(self.config.dev_mode, request.timeouts);
        debug!("making request");
        let response = transport::send_blocking(&agent, &request)?;
        debug!(status = response.status(), "request completed");
        Ok(response)
    }

    #[instrument(name = "resty_execute_async", skip(self, request), fields(method = %request.method, url = %request.url))]
    fn execute_async(&self, request: HttpRequest) -> Result<AsyncRestResponse> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| RestError::NoRuntime)?;
        let client = transport::async_client(self.config.dev_mode, request.timeouts)?;
        debug!("making async request");
        let task = runtime.spawn(transport::send_async(client, request));
        debug!("async request made");
        Ok(AsyncRestResponse::new(task))
    }

    fn default_timeouts(&self) -> Timeouts {
        self.config.timeouts
    }

    fn default_media_type(&self) -> &str {
        &self.config.media_type
    }
}

/// Builder for `Resty`. Unset fields keep `RestyConfig::default()` values.
#[derive(Debug, Clone, Default)]
pub struct RestyBuilder {
    config: RestyConfig,
}

impl RestyBuilder {
    /// Accept any TLS certificate. Never enable this against production hosts.
    pub fn dev_mode(mut self, active: bool) -> Self {
        self.config.dev_mode = active;
        self
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.connection = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.read = timeout;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.config.media_type = media_type.into();
        self
    }

    pub fn build(self) -> Result<Resty> {
        Resty::new(self.config)
    }
}
