//! Error types for the Pocket client.
//!
//! # Design
//! Every failure is a distinct variant so callers branch on the kind rather
//! than on message text. Variants split into two tiers: local validation
//! errors, raised before any request is built, and remote errors raised after
//! a request was attempted. `is_validation` tells them apart.

use thiserror::Error;

/// Errors returned by `PocketClient` and `Pocket` operations.
#[derive(Debug, Error)]
pub enum PocketError {
    /// The application key passed at construction was blank.
    #[error("empty consumer key")]
    EmptyConsumerKey,

    #[error("empty request token")]
    EmptyRequestToken,

    /// Raised for a blank access token on input, and for an authorize
    /// response that carries no access token.
    #[error("empty access token")]
    EmptyAccessToken,

    #[error("empty redirect URL")]
    EmptyRedirectUrl,

    /// The request-token endpoint answered 200 but with a blank `code`.
    #[error("empty request token in API response")]
    EmptyRequestTokenInResponse,

    #[error("empty URL for add item")]
    EmptyItemUrl,

    #[error("no actions to modify items")]
    NoActions,

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A 200 response whose body is not valid JSON.
    #[error("failed to parse response body: {0}")]
    FailedToParseResponseBody(String),

    /// The transport could not complete the round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The upstream answered with a non-200 status. `code` and `message`
    /// come from the `X-Error-Code` and `X-Error` headers and are empty when
    /// the headers are missing.
    #[error("API error {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl PocketError {
    /// True for the missing-value kinds. All of them are raised before any
    /// network activity except `EmptyAccessToken`, which `authorize` also
    /// returns after a round-trip when the reply carries no token. Use
    /// `EmptyRequestTokenInResponse` and `FailedToParseResponseBody` to tell
    /// other reply problems apart.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PocketError::EmptyConsumerKey
                | PocketError::EmptyRequestToken
                | PocketError::EmptyAccessToken
                | PocketError::EmptyRedirectUrl
                | PocketError::EmptyItemUrl
                | PocketError::NoActions
        )
    }
}

/// Result type for Pocket operations.
pub type Result<T> = std::result::Result<T, PocketError>;
