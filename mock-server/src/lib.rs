//! In-memory stand-in for the Pocket v3 API.
//!
//! Serves the five JSON endpoints under `/v3` plus the browser-facing
//! `/auth/authorize` page, which here approves a request token immediately.
//! Failures carry `X-Error-Code` and `X-Error` headers the way the real
//! service does. All state lives for the lifetime of the router.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const CONSUMER_KEY: &str = "mock-consumer-key";
pub const USERNAME: &str = "pocket-user";

/// An item as the mock keeps it. Flags and counts are strings on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
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
    #[serde(skip)]
    pub tags: BTreeSet<String>,
}

impl Item {
    fn new(item_id: String, url: &str, title: &str) -> Self {
        Self {
            resolved_id: item_id.clone(),
            item_id,
            given_url: url.to_string(),
            resolved_url: url.to_string(),
            given_title: title.to_string(),
            resolved_title: title.to_string(),
            favorite: "0".to_string(),
            status: "0".to_string(),
            excerpt: String::new(),
            is_article: "1".to_string(),
            has_image: "0".to_string(),
            has_video: "0".to_string(),
            word_count: "0".to_string(),
            tags: BTreeSet::new(),
        }
    }
}

#[derive(Debug)]
struct PendingToken {
    state: Option<String>,
    approved: bool,
    used: bool,
}

#[derive(Debug)]
pub struct Store {
    consumer_key: String,
    next_id: u64,
    request_tokens: HashMap<String, PendingToken>,
    access_tokens: HashMap<String, String>,
    items: BTreeMap<String, Item>,
}

impl Store {
    fn new(consumer_key: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            next_id: 1000,
            request_tokens: HashMap::new(),
            access_tokens: HashMap::new(),
            items: BTreeMap::new(),
        }
    }

    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn check_consumer_key(&self, key: &str) -> Result<(), ApiError> {
        if key.is_empty() {
            return Err(ApiError::new(StatusCode::BAD_REQUEST, 138, "Missing consumer key."));
        }
        if key != self.consumer_key {
            return Err(ApiError::new(StatusCode::FORBIDDEN, 152, "Invalid consumer key."));
        }
        Ok(())
    }

    fn check_access_token(&self, token: &str) -> Result<(), ApiError> {
        if token.is_empty() {
            return Err(ApiError::new(StatusCode::UNAUTHORIZED, 107, "Missing access token."));
        }
        if !self.access_tokens.contains_key(token) {
            return Err(ApiError::new(StatusCode::UNAUTHORIZED, 107, "Invalid access token."));
        }
        Ok(())
    }

    fn add_item(&mut self, url: &str, title: &str, tags: &str) -> Item {
        let id = self.next_id();
        let mut item = Item::new(id.clone(), url, title);
        item.tags = split_tags(tags);
        self.items.insert(id, item.clone());
        item
    }

    /// Apply one action; `false` when the item does not exist or the action
    /// is unknown.
    fn apply(&mut self, action: &SendAction) -> bool {
        match action.action.as_str() {
            "add" => {
                let url = action.url.clone().unwrap_or_default();
                if url.is_empty() {
                    return false;
                }
                let title = action.title.clone().unwrap_or_default();
                self.add_item(&url, &title, action.tags.as_deref().unwrap_or_default());
                true
            }
            "tag_rename" => {
                let (Some(old), Some(new)) = (&action.old_tag, &action.new_tag) else {
                    return false;
                };
                for item in self.items.values_mut() {
                    if item.tags.remove(old) {
                        item.tags.insert(new.clone());
                    }
                }
                true
            }
            "tag_delete" => {
                let Some(tag) = action.tags.as_deref().or(action.old_tag.as_deref()) else {
                    return false;
                };
                for item in self.items.values_mut() {
                    item.tags.remove(tag);
                }
                true
            }
            "delete" => self.items.remove(&action.item_id).is_some(),
            kind => {
                let Some(item) = self.items.get_mut(&action.item_id) else {
                    return false;
                };
                let tags = split_tags(action.tags.as_deref().unwrap_or_default());
                match kind {
                    "archive" => item.status = "1".to_string(),
                    "readd" => item.status = "0".to_string(),
                    "favorite" => item.favorite = "1".to_string(),
                    "unfavorite" => item.favorite = "0".to_string(),
                    "tags_add" => item.tags.extend(tags),
                    "tags_remove" => item.tags.retain(|t| !tags.contains(t)),
                    "tags_replace" => item.tags = tags,
                    "tags_clear" => item.tags.clear(),
                    _ => return false,
                }
                true
            }
        }
    }
}

fn split_tags(tags: &str) -> BTreeSet<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A failure reported through the upstream's error headers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: u16,
    message: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, code: u16, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("x-error-code", HeaderValue::from(self.code));
        headers.insert("x-error", HeaderValue::from_static(self.message));
        (self.status, headers, Json(json!({"status": 0}))).into_response()
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct RequestTokenBody {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub redirect_uri: String,
    pub state: Option<String>,
}

#[derive(Deserialize)]
pub struct AuthorizeBody {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Deserialize)]
pub struct AuthorizePage {
    #[serde(default)]
    pub request_token: String,
}

#[derive(Deserialize)]
pub struct AddBody {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: String,
    pub tweet_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendAction {
    pub action: String,
    #[serde(default)]
    pub item_id: String,
    pub tags: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub old_tag: Option<String>,
    pub new_tag: Option<String>,
    pub time: Option<i64>,
}

#[derive(Deserialize)]
pub struct SendBody {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub actions: Vec<SendAction>,
}

#[derive(Deserialize, Default)]
pub struct GetBody {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub access_token: String,
    pub state: Option<String>,
    pub favorite: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub domain: Option<String>,
    pub count: Option<usize>,
    pub offset: Option<usize>,
}

pub fn app() -> Router {
    app_with_key(CONSUMER_KEY)
}

/// Router accepting only `consumer_key`.
pub fn app_with_key(consumer_key: &str) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(consumer_key)));
    Router::new()
        .route("/v3/oauth/request", post(request_token))
        .route("/v3/oauth/authorize", post(authorize))
        .route("/auth/authorize", get(approve))
        .route("/v3/add", post(add))
        .route("/v3/send", post(send))
        .route("/v3/get", post(retrieve))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn request_token(
    State(db): State<Db>,
    Json(body): Json<RequestTokenBody>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store.check_consumer_key(&body.consumer_key)?;
    if body.redirect_uri.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 140, "Missing redirect url."));
    }
    let code = format!("code-{}", store.next_id());
    store.request_tokens.insert(
        code.clone(),
        PendingToken {
            state: body.state.clone(),
            approved: false,
            used: false,
        },
    );
    Ok(Json(json!({"code": code, "state": body.state})))
}

/// Stands in for the user clicking "Authorize" in a browser.
async fn approve(
    State(db): State<Db>,
    Query(page): Query<AuthorizePage>,
) -> Result<&'static str, ApiError> {
    let mut store = db.write().await;
    let token = store
        .request_tokens
        .get_mut(&page.request_token)
        .ok_or_else(|| ApiError::new(StatusCode::FORBIDDEN, 185, "Code not found."))?;
    token.approved = true;
    tracing::debug!(request_token = %page.request_token, "request token approved");
    Ok("authorized")
}

async fn authorize(
    State(db): State<Db>,
    Json(body): Json<AuthorizeBody>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store.check_consumer_key(&body.consumer_key)?;
    if body.code.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 182, "Missing code."));
    }
    let token = store
        .request_tokens
        .get_mut(&body.code)
        .ok_or_else(|| ApiError::new(StatusCode::FORBIDDEN, 185, "Code not found."))?;
    if !token.approved {
        return Err(ApiError::new(StatusCode::FORBIDDEN, 158, "User rejected code."));
    }
    if token.used {
        return Err(ApiError::new(StatusCode::FORBIDDEN, 159, "Already used code."));
    }
    token.used = true;
    let state = token.state.clone();

    let access_token = format!("token-{}", store.next_id());
    store
        .access_tokens
        .insert(access_token.clone(), USERNAME.to_string());

    let mut reply = json!({"access_token": access_token, "username": USERNAME});
    if let Some(state) = state {
        reply["state"] = Value::String(state);
    }
    Ok(Json(reply))
}

async fn add(State(db): State<Db>, Json(body): Json<AddBody>) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store.check_consumer_key(&body.consumer_key)?;
    store.check_access_token(&body.access_token)?;
    if body.url.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 0, "Missing url."));
    }
    let item = store.add_item(&body.url, &body.title, &body.tags);
    tracing::debug!(item_id = %item.item_id, tweet_id = ?body.tweet_id, "item added");
    Ok(Json(json!({"item": item, "status": 1})))
}

async fn send(State(db): State<Db>, Json(body): Json<SendBody>) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store.check_consumer_key(&body.consumer_key)?;
    store.check_access_token(&body.access_token)?;
    let results: Vec<bool> = body.actions.iter().map(|a| store.apply(a)).collect();
    Ok(Json(json!({"status": 1, "action_results": results})))
}

async fn retrieve(State(db): State<Db>, Json(body): Json<GetBody>) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    store.check_consumer_key(&body.consumer_key)?;
    store.check_access_token(&body.access_token)?;

    let matches = store
        .items
        .values()
        .rev()
        .filter(|item| match body.state.as_deref() {
            Some("archive") => item.status == "1",
            Some("all") => true,
            _ => item.status == "0",
        })
        .filter(|item| body.favorite.as_deref().map_or(true, |f| item.favorite == f))
        .filter(|item| match body.tag.as_deref() {
            None => true,
            Some("_untagged_") => item.tags.is_empty(),
            Some(tag) => item.tags.contains(tag),
        })
        .filter(|item| {
            body.search.as_deref().map_or(true, |s| {
                item.given_title.contains(s) || item.given_url.contains(s)
            })
        })
        .filter(|item| {
            body.domain
                .as_deref()
                .map_or(true, |d| item.given_url.contains(d))
        })
        .skip(body.offset.unwrap_or(0))
        .take(body.count.unwrap_or(usize::MAX));

    let mut list = Map::new();
    for item in matches {
        let value = serde_json::to_value(item).unwrap_or(Value::Null);
        list.insert(item.item_id.clone(), value);
    }

    // An empty result is an array upstream, not an object.
    let list = if list.is_empty() {
        Value::Array(Vec::new())
    } else {
        Value::Object(list)
    };
    Ok(Json(json!({"status": 1, "complete": 1, "list": list})))
}
