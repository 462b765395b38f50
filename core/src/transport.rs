//! Executing `HttpRequest`s.
//!
//! `Transport` is the seam between the deterministic build/parse layer and
//! the network. Closures implement it, which is how the tests script upstream
//! replies. `UreqTransport` is the blocking implementation used by default.

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Sends one request and returns whatever the server answered.
///
/// Non-2xx statuses are returned as responses, not errors; status
/// interpretation belongs to `PocketClient`. Implementations make exactly one
/// attempt.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::time::Duration;

    use tracing::debug;

    use super::Transport;
    use crate::error::{PocketError, Result};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport on a `ureq::Agent`.
    ///
    /// The timeout covers the whole call; when it fires the request is
    /// abandoned and `PocketError::Timeout` is returned. A request carrying
    /// its own `timeout` replaces the agent's for that call. Response bodies
    /// are read without a size cap. The agent pools connections, so clone it
    /// rather than building one per request.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new(timeout: Duration) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            debug!(method = request.method.as_str(), url = %request.url, "sending request");

            let mut builder = match request.method {
                HttpMethod::Post => self.agent.post(request.url.as_str()),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.config().timeout_global(Some(timeout)).build();
            }

            let mut response = builder.send(request.body.as_bytes()).map_err(map_error)?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()
                .map_err(map_error)?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn map_error(err: ureq::Error) -> PocketError {
        match err {
            ureq::Error::Timeout(_) => PocketError::Timeout,
            other => PocketError::Transport(other.to_string()),
        }
    }
}
