//! Request/response orchestration over a `Transport`.
//!
//! # Session state
//! `Pocket` remembers the redirect URL of the last successful
//! `get_request_token` so `stored_authorization_url` can be called with only
//! the request token. That field is the client's only mutable state. Because
//! `get_request_token` takes `&mut self`, sharing one `Pocket` across threads
//! for the token/URL pair requires external synchronization; callers that
//! want to share a client should use `authorization_url` with an explicit
//! redirect URL instead.

use std::time::Duration;

use tracing::debug;

use crate::client::PocketClient;
use crate::config::ClientConfig;
use crate::error::{PocketError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::input::{is_blank, AddInput, ModifyInput, RetrievingInput};
use crate::response::{Authorization, Item};
use crate::transport::Transport;

#[cfg(feature = "ureq")]
use crate::transport::UreqTransport;

/// Pocket API client: validates, sends one request, parses the reply.
///
/// Nothing is retried. A validation failure returns before the transport is
/// touched. Each operation has a `*_within` form taking a deadline for that
/// call alone; when it passes the call is abandoned with
/// `PocketError::Timeout`.
#[cfg(feature = "ureq")]
#[derive(Debug, Clone)]
pub struct Pocket<T = UreqTransport> {
    client: PocketClient,
    transport: T,
    redirect_url: Option<String>,
}

#[cfg(not(feature = "ureq"))]
#[derive(Debug, Clone)]
pub struct Pocket<T> {
    client: PocketClient,
    transport: T,
    redirect_url: Option<String>,
}

#[cfg(feature = "ureq")]
impl Pocket<UreqTransport> {
    /// Client with default settings and a blocking transport.
    pub fn new(consumer_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(consumer_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Pocket<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            client: PocketClient::new(config)?,
            transport,
            redirect_url: None,
        })
    }

    /// The underlying build/parse layer.
    pub fn client(&self) -> &PocketClient {
        &self.client
    }

    /// Redirect URL captured by the last successful `get_request_token`.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Save a new item.
    pub fn add(&self, input: &AddInput) -> Result<()> {
        self.add_within(input, None)
    }

    pub fn add_within(&self, input: &AddInput, deadline: Option<Duration>) -> Result<()> {
        let request = self.client.build_add(input)?;
        let response = self.send(request, deadline)?;
        self.client.parse_add(response)
    }

    /// Apply a batch of actions in one request. The upstream may apply some
    /// of them even when the call fails.
    pub fn modify(&self, input: &ModifyInput) -> Result<()> {
        self.modify_within(input, None)
    }

    pub fn modify_within(&self, input: &ModifyInput, deadline: Option<Duration>) -> Result<()> {
        let request = self.client.build_modify(input)?;
        let response = self.send(request, deadline)?;
        self.client.parse_modify(response)
    }

    /// Retrieve items matching the filters. An empty list is not an error.
    /// The order of the returned items is arbitrary.
    pub fn retrieve(&self, input: &RetrievingInput) -> Result<Vec<Item>> {
        self.retrieve_within(input, None)
    }

    pub fn retrieve_within(
        &self,
        input: &RetrievingInput,
        deadline: Option<Duration>,
    ) -> Result<Vec<Item>> {
        let request = self.client.build_retrieve(input)?;
        let response = self.send(request, deadline)?;
        self.client.parse_retrieve(response)
    }

    /// Obtain a request token. On success `redirect_url` is remembered for
    /// `stored_authorization_url`; on failure the stored value is untouched.
    pub fn get_request_token(&mut self, redirect_url: &str, state: &str) -> Result<String> {
        self.get_request_token_within(redirect_url, state, None)
    }

    pub fn get_request_token_within(
        &mut self,
        redirect_url: &str,
        state: &str,
        deadline: Option<Duration>,
    ) -> Result<String> {
        let request = self.client.build_request_token(redirect_url, state)?;
        let response = self.send(request, deadline)?;
        let token = self.client.parse_request_token(response)?;
        debug!("obtained request token");
        self.redirect_url = Some(redirect_url.to_string());
        Ok(token)
    }

    pub fn authorization_url(&self, request_token: &str, redirect_url: &str) -> Result<String> {
        self.client.authorization_url(request_token, redirect_url)
    }

    /// `authorization_url` with the redirect URL remembered by
    /// `get_request_token`. Fails with `EmptyRedirectUrl` when no token was
    /// ever obtained through this client.
    pub fn stored_authorization_url(&self, request_token: &str) -> Result<String> {
        if is_blank(request_token) {
            return Err(PocketError::EmptyRequestToken);
        }
        let redirect_url = self
            .redirect_url
            .as_deref()
            .ok_or(PocketError::EmptyRedirectUrl)?;
        self.client.authorization_url(request_token, redirect_url)
    }

    /// Exchange an authorized request token for an access token.
    pub fn authorize(&self, request_token: &str) -> Result<Authorization> {
        self.authorize_within(request_token, None)
    }

    pub fn authorize_within(
        &self,
        request_token: &str,
        deadline: Option<Duration>,
    ) -> Result<Authorization> {
        let request = self.client.build_authorize(request_token)?;
        let response = self.send(request, deadline)?;
        let authorization = self.client.parse_authorize(response)?;
        debug!(username = %authorization.username, "authorized");
        Ok(authorization)
    }

    fn send(&self, mut request: HttpRequest, deadline: Option<Duration>) -> Result<HttpResponse> {
        if deadline.is_some() {
            request.timeout = deadline;
        }
        self.transport.execute(request)
    }
}
