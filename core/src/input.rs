//! Caller-facing inputs and their validation into wire payloads.
//!
//! Each `to_request` takes the consumer key from the client and either
//! returns the payload or the first validation error. Validation never
//! touches the network.

use crate::action::Action;
use crate::error::{PocketError, Result};
use crate::request::{AddRequest, ModifyRequest, RetrieveRequest};

/// Data needed to save a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddInput {
    pub access_token: String,
    pub url: String,
    pub title: Option<String>,
    /// Sent as a single `", "`-joined string.
    pub tags: Vec<String>,
    /// Id of the tweet the item was shared from, if any.
    pub tweet_id: Option<String>,
}

/// Data needed to apply a batch of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyInput {
    pub access_token: String,
    pub actions: Vec<Action>,
}

/// Retrieval filters. Every field except `access_token` is passed through to
/// the upstream unchanged; unset, empty and zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievingInput {
    pub access_token: String,
    /// `unread`, `archive` or `all`.
    pub state: Option<String>,
    /// `"0"` or `"1"`.
    pub favorite: Option<String>,
    /// A tag name, or `_untagged_`.
    pub tag: Option<String>,
    /// `article`, `video` or `image`.
    pub content_type: Option<String>,
    /// `newest`, `oldest`, `title` or `site`.
    pub sort: Option<String>,
    /// `simple` or `complete`.
    pub detail_type: Option<String>,
    pub search: Option<String>,
    pub domain: Option<String>,
    /// Epoch seconds; only items modified since then are returned.
    pub since: Option<i64>,
    pub count: Option<u32>,
    pub offset: Option<u32>,
}

impl AddInput {
    pub fn new(access_token: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_request(&self, consumer_key: &str) -> Result<AddRequest> {
        require_access_token(&self.access_token)?;
        if is_blank(&self.url) {
            return Err(PocketError::EmptyItemUrl);
        }

        let tags = if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(", "))
        };

        Ok(AddRequest {
            consumer_key: consumer_key.to_string(),
            access_token: self.access_token.clone(),
            url: self.url.clone(),
            title: non_empty(&self.title),
            tags,
            tweet_id: non_empty(&self.tweet_id),
        })
    }
}

impl ModifyInput {
    pub fn new(access_token: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            access_token: access_token.into(),
            actions,
        }
    }

    pub fn to_request(&self, consumer_key: &str) -> Result<ModifyRequest> {
        require_access_token(&self.access_token)?;
        if self.actions.is_empty() {
            return Err(PocketError::NoActions);
        }

        Ok(ModifyRequest {
            consumer_key: consumer_key.to_string(),
            access_token: self.access_token.clone(),
            actions: self.actions.clone(),
        })
    }
}

impl RetrievingInput {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn to_request(&self, consumer_key: &str) -> Result<RetrieveRequest> {
        require_access_token(&self.access_token)?;

        Ok(RetrieveRequest {
            consumer_key: consumer_key.to_string(),
            access_token: self.access_token.clone(),
            state: non_empty(&self.state),
            favorite: non_empty(&self.favorite),
            tag: non_empty(&self.tag),
            content_type: non_empty(&self.content_type),
            sort: non_empty(&self.sort),
            detail_type: non_empty(&self.detail_type),
            search: non_empty(&self.search),
            domain: non_empty(&self.domain),
            since: self.since.filter(|v| *v != 0),
            count: self.count.filter(|v| *v != 0),
            offset: self.offset.filter(|v| *v != 0),
        })
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_access_token(token: &str) -> Result<()> {
    if is_blank(token) {
        return Err(PocketError::EmptyAccessToken);
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
