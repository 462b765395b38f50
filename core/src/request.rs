//! Wire payloads, one per endpoint.
//!
//! Field names are the upstream's JSON keys. Optional fields are `None` when
//! unset and are left out of the serialized body entirely; the input
//! validators map empty strings and zero numbers to `None` before they get
//! here.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Body of `/oauth/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTokenRequest {
    pub consumer_key: String,
    #[serde(rename = "redirect_uri")]
    pub redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Body of `/oauth/authorize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizeRequest {
    pub consumer_key: String,
    pub code: String,
}

/// Body of `/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddRequest {
    pub consumer_key: String,
    pub access_token: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tags joined with `", "`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
}

/// Body of `/send`. Actions keep the caller's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifyRequest {
    pub consumer_key: String,
    pub access_token: String,
    pub actions: Vec<Action>,
}

/// Body of `/get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveRequest {
    pub consumer_key: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
