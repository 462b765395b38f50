//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error messages. Comparing parsed JSON (not
//! raw strings) avoids false negatives from field-ordering differences.

use pocket_core::{
    Action, AddInput, Authorization, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Item,
    ModifyInput, PocketClient, RetrievingInput,
};
use serde_json::Value;

const BASE_URL: &str = "https://getpocket.com/v3";

fn client() -> PocketClient {
    PocketClient::new(ClientConfig::new("consumer-key")).unwrap()
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn headers(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (
                        pair[0].as_str().unwrap().to_string(),
                        pair[1].as_str().unwrap().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Check the built request against `expected_request`. Headers are only
/// compared when the vector lists them.
fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, HttpMethod::Post, "{name}: method");
    assert_eq!(expected["method"], "POST", "{name}: vector method");
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    if expected.get("headers").is_some() {
        assert_eq!(req.headers, headers(&expected["headers"]), "{name}: headers");
    }
    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: headers(&sim["headers"]),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare a parse result with `expected_result` or `expected_error`.
fn check_result<T, F>(name: &str, case: &Value, result: pocket_core::Result<T>, expected: F)
where
    T: std::fmt::Debug + PartialEq,
    F: FnOnce(&Value) -> T,
{
    match str_field(case, "expected_error") {
        Some(message) => {
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), message, "{name}: error message");
        }
        None => {
            let value = result.unwrap();
            assert_eq!(value, expected(&case["expected_result"]), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn add_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/add.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let add = AddInput {
            title: str_field(input, "title"),
            tags: input
                .get("tags")
                .map(|tags| serde_json::from_value(tags.clone()).unwrap())
                .unwrap_or_default(),
            tweet_id: str_field(input, "tweet_id"),
            ..AddInput::new(
                str_field(input, "access_token").unwrap(),
                str_field(input, "url").unwrap(),
            )
        };

        let req = c.build_add(&add).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_add(simulated_response(&case));
        check_result(name, &case, result, |_| ());
    }
}

// ---------------------------------------------------------------------------
// Modify
// ---------------------------------------------------------------------------

#[test]
fn modify_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/modify.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let actions: Vec<Action> = serde_json::from_value(input["actions"].clone()).unwrap();
        let modify = ModifyInput::new(str_field(input, "access_token").unwrap(), actions);

        let req = c.build_modify(&modify).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_modify(simulated_response(&case));
        check_result(name, &case, result, |_| ());
    }
}

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

#[test]
fn retrieve_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/retrieve.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let number = |key: &str| input.get(key).and_then(Value::as_i64);
        let retrieve = RetrievingInput {
            state: str_field(input, "state"),
            favorite: str_field(input, "favorite"),
            tag: str_field(input, "tag"),
            content_type: str_field(input, "content_type"),
            sort: str_field(input, "sort"),
            detail_type: str_field(input, "detail_type"),
            search: str_field(input, "search"),
            domain: str_field(input, "domain"),
            since: number("since"),
            count: number("count").map(|n| n as u32),
            offset: number("offset").map(|n| n as u32),
            ..RetrievingInput::new(str_field(input, "access_token").unwrap())
        };

        let req = c.build_retrieve(&retrieve).unwrap();
        check_request(name, &req, &case["expected_request"]);

        // Item order is unspecified; compare sorted by id.
        let result = c.parse_retrieve(simulated_response(&case)).map(|mut items| {
            items.sort_by(|a, b| a.item_id.cmp(&b.item_id));
            items
        });
        check_result(name, &case, result, |expected| {
            serde_json::from_value::<Vec<Item>>(expected.clone()).unwrap()
        });
    }
}

// ---------------------------------------------------------------------------
// Request token
// ---------------------------------------------------------------------------

#[test]
fn request_token_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/request_token.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let req = c
            .build_request_token(
                &str_field(input, "redirect_url").unwrap(),
                &str_field(input, "state").unwrap_or_default(),
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_request_token(simulated_response(&case));
        check_result(name, &case, result, |expected| {
            expected.as_str().unwrap().to_string()
        });
    }
}

// ---------------------------------------------------------------------------
// Authorize
// ---------------------------------------------------------------------------

#[test]
fn authorize_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/authorize.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c
            .build_authorize(&str_field(&case["input"], "request_token").unwrap())
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_authorize(simulated_response(&case));
        check_result(name, &case, result, |expected| {
            serde_json::from_value::<Authorization>(expected.clone()).unwrap()
        });
    }
}
