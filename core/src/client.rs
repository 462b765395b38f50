//! Stateless HTTP request builder and response parser for the Pocket API.
//!
//! # Design
//! `PocketClient` holds only its configuration and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! validates input and produces an `HttpRequest`, and a `parse_*` method that
//! consumes an `HttpResponse`. The round-trip in between belongs to a
//! `Transport` or to the caller.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::error::{PocketError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::input::{is_blank, AddInput, ModifyInput, RetrievingInput};
use crate::request::{AuthorizeRequest, RequestTokenRequest};
use crate::response::{self, Authorization, Item};

pub const ENDPOINT_ADD: &str = "/add";
pub const ENDPOINT_MODIFY: &str = "/send";
pub const ENDPOINT_RETRIEVE: &str = "/get";
pub const ENDPOINT_REQUEST_TOKEN: &str = "/oauth/request";
pub const ENDPOINT_AUTHORIZE: &str = "/oauth/authorize";

pub const X_ERROR_HEADER: &str = "X-Error";
pub const X_ERROR_CODE_HEADER: &str = "X-Error-Code";

/// Synchronous, stateless client for the Pocket API.
#[derive(Debug, Clone)]
pub struct PocketClient {
    config: ClientConfig,
}

impl PocketClient {
    /// Fails with `EmptyConsumerKey` when the key is blank.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if is_blank(&config.consumer_key) {
            return Err(PocketError::EmptyConsumerKey);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn consumer_key(&self) -> &str {
        &self.config.consumer_key
    }

    pub fn build_add(&self, input: &AddInput) -> Result<HttpRequest> {
        let body = input.to_request(self.consumer_key())?;
        self.post(ENDPOINT_ADD, &body)
    }

    pub fn build_modify(&self, input: &ModifyInput) -> Result<HttpRequest> {
        let body = input.to_request(self.consumer_key())?;
        self.post(ENDPOINT_MODIFY, &body)
    }

    pub fn build_retrieve(&self, input: &RetrievingInput) -> Result<HttpRequest> {
        let body = input.to_request(self.consumer_key())?;
        self.post(ENDPOINT_RETRIEVE, &body)
    }

    /// `state` is echoed back by the upstream; an empty string is not sent.
    pub fn build_request_token(&self, redirect_url: &str, state: &str) -> Result<HttpRequest> {
        if is_blank(redirect_url) {
            return Err(PocketError::EmptyRedirectUrl);
        }
        let body = RequestTokenRequest {
            consumer_key: self.consumer_key().to_string(),
            redirect_url: redirect_url.to_string(),
            state: (!state.is_empty()).then(|| state.to_string()),
        };
        self.post(ENDPOINT_REQUEST_TOKEN, &body)
    }

    pub fn build_authorize(&self, request_token: &str) -> Result<HttpRequest> {
        if is_blank(request_token) {
            return Err(PocketError::EmptyRequestToken);
        }
        let body = AuthorizeRequest {
            consumer_key: self.consumer_key().to_string(),
            code: request_token.to_string(),
        };
        self.post(ENDPOINT_AUTHORIZE, &body)
    }

    /// URL of the page where the user grants access. Both values are
    /// substituted verbatim; a redirect URL with reserved characters yields a
    /// malformed URL.
    pub fn authorization_url(&self, request_token: &str, redirect_url: &str) -> Result<String> {
        if is_blank(request_token) {
            return Err(PocketError::EmptyRequestToken);
        }
        if is_blank(redirect_url) {
            return Err(PocketError::EmptyRedirectUrl);
        }
        Ok(format!(
            "{}?request_token={request_token}&redirect_uri={redirect_url}",
            self.config.authorize_url
        ))
    }

    /// The body of a successful add is not used.
    pub fn parse_add(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }

    pub fn parse_modify(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }

    /// Items come back in no particular order.
    pub fn parse_retrieve(&self, response: HttpResponse) -> Result<Vec<Item>> {
        check_status(&response)?;
        let items = response::parse_items(&response.body)?;
        trace!(count = items.len(), "parsed retrieved items");
        Ok(items)
    }

    pub fn parse_request_token(&self, response: HttpResponse) -> Result<String> {
        check_status(&response)?;
        response::parse_request_token(&response.body)
    }

    pub fn parse_authorize(&self, response: HttpResponse) -> Result<Authorization> {
        check_status(&response)?;
        response::parse_authorization(&response.body)
    }

    fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<HttpRequest> {
        let body = serde_json::to_string(body)?;
        debug!(endpoint, "building request");
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{endpoint}", self.config.base_url),
            headers: vec![
                (
                    "Content-Type".to_string(),
                    "application/json; charset=UTF-8".to_string(),
                ),
                ("X-Accept".to_string(), "application/json".to_string()),
            ],
            body,
            timeout: None,
        })
    }
}

/// Any status other than 200 becomes `PocketError::Api`, built from the
/// upstream's error headers.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    let code = response.header(X_ERROR_CODE_HEADER).unwrap_or_default();
    let message = response.header(X_ERROR_HEADER).unwrap_or_default();
    warn!(status = response.status, code, message, "upstream rejected request");
    Err(PocketError::Api {
        status: response.status,
        code: code.to_string(),
        message: message.to_string(),
    })
}
