//! Mutations sent through the modify (`/send`) endpoint.
//!
//! An `Action` is serialized verbatim into the `actions` array. Which
//! optional fields a given kind needs is the upstream's contract; nothing
//! here checks that `tag_rename` carries both tags, for instance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The twelve mutation kinds the upstream understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Add,
    Archive,
    #[serde(rename = "readd")]
    ReAdd,
    Favorite,
    #[serde(rename = "unfavorite")]
    UnFavorite,
    Delete,
    TagsAdd,
    TagsRemove,
    TagsReplace,
    TagsClear,
    TagRename,
    TagDelete,
}

impl ActionKind {
    pub const ALL: [ActionKind; 12] = [
        ActionKind::Add,
        ActionKind::Archive,
        ActionKind::ReAdd,
        ActionKind::Favorite,
        ActionKind::UnFavorite,
        ActionKind::Delete,
        ActionKind::TagsAdd,
        ActionKind::TagsRemove,
        ActionKind::TagsReplace,
        ActionKind::TagsClear,
        ActionKind::TagRename,
        ActionKind::TagDelete,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Add => "add",
            ActionKind::Archive => "archive",
            ActionKind::ReAdd => "readd",
            ActionKind::Favorite => "favorite",
            ActionKind::UnFavorite => "unfavorite",
            ActionKind::Delete => "delete",
            ActionKind::TagsAdd => "tags_add",
            ActionKind::TagsRemove => "tags_remove",
            ActionKind::TagsReplace => "tags_replace",
            ActionKind::TagsClear => "tags_clear",
            ActionKind::TagRename => "tag_rename",
            ActionKind::TagDelete => "tag_delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known action names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// One mutation applied to a saved item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "action")]
    pub kind: ActionKind,
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    /// Comma-joined tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Epoch seconds at which the action happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tag: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind, item_id: impl Into<String>) -> Self {
        Self {
            kind,
            item_id: item_id.into(),
            ref_id: None,
            tags: None,
            time: None,
            title: None,
            url: None,
            old_tag: None,
            new_tag: None,
        }
    }

    /// Re-add an item by URL. `item_id` may be the id of an existing item.
    pub fn add(item_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(ActionKind::Add, item_id)
        }
    }

    pub fn archive(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::Archive, item_id)
    }

    pub fn readd(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::ReAdd, item_id)
    }

    pub fn favorite(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::Favorite, item_id)
    }

    pub fn unfavorite(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::UnFavorite, item_id)
    }

    pub fn delete(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::Delete, item_id)
    }

    pub fn tags_add<S: AsRef<str>>(item_id: impl Into<String>, tags: &[S]) -> Self {
        Self::new(ActionKind::TagsAdd, item_id).with_tags(tags)
    }

    pub fn tags_remove<S: AsRef<str>>(item_id: impl Into<String>, tags: &[S]) -> Self {
        Self::new(ActionKind::TagsRemove, item_id).with_tags(tags)
    }

    pub fn tags_replace<S: AsRef<str>>(item_id: impl Into<String>, tags: &[S]) -> Self {
        Self::new(ActionKind::TagsReplace, item_id).with_tags(tags)
    }

    pub fn tags_clear(item_id: impl Into<String>) -> Self {
        Self::new(ActionKind::TagsClear, item_id)
    }

    pub fn tag_rename(
        item_id: impl Into<String>,
        old_tag: impl Into<String>,
        new_tag: impl Into<String>,
    ) -> Self {
        Self {
            old_tag: Some(old_tag.into()),
            new_tag: Some(new_tag.into()),
            ..Self::new(ActionKind::TagRename, item_id)
        }
    }

    /// Remove a tag from every item. The upstream still expects an `item_id`.
    pub fn tag_delete(item_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            tags: Some(tag.into()),
            ..Self::new(ActionKind::TagDelete, item_id)
        }
    }

    pub fn with_time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Join `tags` with `,` the way the modify endpoint expects. An empty
    /// slice clears the field.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = if tags.is_empty() {
            None
        } else {
            Some(
                tags.iter()
                    .map(|t| t.as_ref())
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };
        self
    }
}
