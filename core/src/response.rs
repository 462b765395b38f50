//! Result types and parsers for 200 response bodies.
//!
//! # Design
//! Bodies are decoded into `serde_json::Value` rather than typed structs. The
//! item `list` is an object keyed by opaque item ids, and the upstream encodes
//! booleans and counts as strings (sometimes as bare numbers), so a typed
//! decode would either fail or need a custom deserializer for every field.
//! Reading through `Value` keeps missing or oddly-typed fields harmless: they
//! become empty strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PocketError, Result};

/// A saved item as returned by `/get`.
///
/// Every field is a string because that is how the upstream sends them:
/// `favorite`, `is_article` and friends are `"0"` / `"1"`, `word_count` is a
/// decimal string. Absent fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The key under which the item appeared in `list`.
    pub item_id: String,
    pub resolved_id: String,
    pub given_url: String,
    pub resolved_url: String,
    pub given_title: String,
    pub resolved_title: String,
    pub favorite: String,
    pub status: String,
    pub excerpt: String,
    pub is_article: String,
    pub has_image: String,
    pub has_video: String,
    pub word_count: String,
}

impl Item {
    pub fn is_favorite(&self) -> bool {
        self.favorite == "1"
    }

    /// `status` is `"1"` for archived items.
    pub fn is_archived(&self) -> bool {
        self.status == "1"
    }

    /// `status` is `"2"` for items pending deletion.
    pub fn is_deleted(&self) -> bool {
        self.status == "2"
    }

    pub fn word_count(&self) -> Option<u64> {
        self.word_count.parse().ok()
    }

    fn from_entry(item_id: &str, entry: &Value) -> Self {
        Self {
            item_id: item_id.to_string(),
            resolved_id: string_field(entry, "resolved_id"),
            given_url: string_field(entry, "given_url"),
            resolved_url: string_field(entry, "resolved_url"),
            given_title: string_field(entry, "given_title"),
            resolved_title: string_field(entry, "resolved_title"),
            favorite: string_field(entry, "favorite"),
            status: string_field(entry, "status"),
            excerpt: string_field(entry, "excerpt"),
            is_article: string_field(entry, "is_article"),
            has_image: string_field(entry, "has_image"),
            has_video: string_field(entry, "has_video"),
            word_count: string_field(entry, "word_count"),
        }
    }
}

/// Outcome of the token exchange. Not persisted by the library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub access_token: String,
    pub username: String,
    pub state: String,
}

/// Parse a raw body into a JSON value.
pub fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| PocketError::FailedToParseResponseBody(e.to_string()))
}

/// Parse the `list` of a `/get` response.
///
/// An absent, `null`, empty or array-shaped `list` yields no items; the
/// upstream sends `[]` when nothing matches. Item order follows the JSON
/// object's iteration order and carries no meaning; callers that need a
/// stable order must sort.
pub fn parse_items(body: &str) -> Result<Vec<Item>> {
    let root = parse_body(body)?;
    let items = match root.get("list") {
        Some(Value::Object(list)) => list
            .iter()
            .map(|(item_id, entry)| Item::from_entry(item_id, entry))
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

/// Extract the request token (`code`) from an `/oauth/request` response.
pub fn parse_request_token(body: &str) -> Result<String> {
    let root = parse_body(body)?;
    let code = string_field(&root, "code");
    if code.is_empty() {
        return Err(PocketError::EmptyRequestTokenInResponse);
    }
    Ok(code)
}

/// Extract the `Authorization` from an `/oauth/authorize` response.
/// `username` and `state` are empty when the upstream leaves them out.
pub fn parse_authorization(body: &str) -> Result<Authorization> {
    let root = parse_body(body)?;
    let access_token = string_field(&root, "access_token");
    if access_token.is_empty() {
        return Err(PocketError::EmptyAccessToken);
    }
    Ok(Authorization {
        access_token,
        username: string_field(&root, "username"),
        state: string_field(&root, "state"),
    })
}

/// Read `key` from `value` as text. Strings come back verbatim, numbers and
/// booleans as their JSON text, anything missing or `null` as `""`.
fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_object_yields_no_items() {
        assert!(parse_items(r#"{"status":1,"list":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_list_yields_no_items() {
        assert!(parse_items(r#"{"status":1}"#).unwrap().is_empty());
    }

    #[test]
    fn array_list_yields_no_items() {
        assert!(parse_items(r#"{"status":2,"complete":1,"list":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn null_list_yields_no_items() {
        assert!(parse_items(r#"{"list":null}"#).unwrap().is_empty());
    }

    #[test]
    fn sparse_item_defaults_missing_fields() {
        let body = r#"{"list":{"229279689":{"item_id":"229279689","given_url":"http://x","favorite":"0","status":"0","word_count":"3"}}}"#;
        let items = parse_items(body).unwrap();
        assert_eq!(
            items,
            vec![Item {
                item_id: "229279689".to_string(),
                given_url: "http://x".to_string(),
                favorite: "0".to_string(),
                status: "0".to_string(),
                word_count: "3".to_string(),
                ..Item::default()
            }]
        );
    }

    #[test]
    fn item_id_comes_from_the_key() {
        let body = r#"{"list":{"42":{"item_id":"something-else","resolved_id":"43"}}}"#;
        let items = parse_items(body).unwrap();
        assert_eq!(items[0].item_id, "42");
        assert_eq!(items[0].resolved_id, "43");
    }

    #[test]
    fn numbers_and_booleans_are_rendered_as_text() {
        let body = r#"{"list":{"1":{"word_count":3197,"is_article":true,"excerpt":null}}}"#;
        let item = parse_items(body).unwrap().remove(0);
        assert_eq!(item.word_count, "3197");
        assert_eq!(item.word_count(), Some(3197));
        assert_eq!(item.is_article, "true");
        assert_eq!(item.excerpt, "");
    }

    #[test]
    fn non_object_entry_still_produces_an_item() {
        let items = parse_items(r#"{"list":{"7":"unexpected"}}"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_id, "7");
        assert_eq!(items[0].given_url, "");
    }

    #[test]
    fn every_key_becomes_one_item() {
        let body = r#"{"list":{"b":{"given_url":"http://b"},"a":{"given_url":"http://a"},"c":{}}}"#;
        let mut items = parse_items(body).unwrap();
        items.sort_by(|x, y| x.item_id.cmp(&y.item_id));
        let ids: Vec<_> = items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(items[1].given_url, "http://b");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_items("<html>").unwrap_err();
        assert!(matches!(err, PocketError::FailedToParseResponseBody(_)));
    }

    #[test]
    fn status_helpers() {
        let item = Item {
            favorite: "1".to_string(),
            status: "1".to_string(),
            ..Item::default()
        };
        assert!(item.is_favorite());
        assert!(item.is_archived());
        assert!(!item.is_deleted());
        assert_eq!(item.word_count(), None);
    }

    #[test]
    fn request_token_is_extracted() {
        assert_eq!(
            parse_request_token(r#"{"code":"request-token","state":null}"#).unwrap(),
            "request-token"
        );
    }

    #[test]
    fn blank_request_token_is_rejected() {
        let err = parse_request_token(r#"{"code":""}"#).unwrap_err();
        assert!(matches!(err, PocketError::EmptyRequestTokenInResponse));
        let err = parse_request_token(r#"{}"#).unwrap_err();
        assert!(matches!(err, PocketError::EmptyRequestTokenInResponse));
    }

    #[test]
    fn authorization_with_all_fields() {
        let auth = parse_authorization(
            r#"{"access_token":"access-token","username":"pocket-user","state":"testing"}"#,
        )
        .unwrap();
        assert_eq!(
            auth,
            Authorization {
                access_token: "access-token".to_string(),
                username: "pocket-user".to_string(),
                state: "testing".to_string(),
            }
        );
    }

    #[test]
    fn authorization_without_state() {
        let auth =
            parse_authorization(r#"{"access_token":"access-token","username":"pocket-user"}"#)
                .unwrap();
        assert_eq!(auth.state, "");
    }

    #[test]
    fn authorization_without_access_token_is_rejected() {
        let err = parse_authorization(r#"{"username":"pocket-user"}"#).unwrap_err();
        assert!(matches!(err, PocketError::EmptyAccessToken));
    }
}
