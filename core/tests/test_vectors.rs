//! Verify request building and status classification against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON so field order does not matter.

use feed_core::client::check_status;
use feed_core::{ApiError, CreatePost, FeedClient, HttpMethod, HttpRequest, HttpResponse, NewComment, UpdateProfile};

const BASE_URL: &str = "http://localhost:3000/api";

fn client() -> FeedClient {
    FeedClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn str_arg<'a>(args: &'a serde_json::Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

fn build(c: &FeedClient, operation: &str, args: &serde_json::Value) -> HttpRequest {
    let post_id = || args["post_id"].as_u64().unwrap();
    match operation {
        "get_profile" => c.build_get_profile(str_arg(args, "wallet_address")),
        "update_profile" => {
            let input: UpdateProfile = serde_json::from_value(args.clone()).unwrap();
            c.build_update_profile(&input).unwrap()
        }
        "get_feed" => c.build_get_feed(),
        "create_post" => {
            let input: CreatePost = serde_json::from_value(args.clone()).unwrap();
            c.build_create_post(&input).unwrap()
        }
        "get_post" => c.build_get_post(post_id()),
        "like_post" => c.build_like_post(post_id(), str_arg(args, "wallet_address")).unwrap(),
        "comment_post" => {
            let input = CreatePost {
                wallet_address: str_arg(args, "wallet_address").to_string(),
                content: str_arg(args, "content").to_string(),
            };
            c.build_comment_post(post_id(), &input).unwrap()
        }
        "get_comments" => c.build_get_comments(str_arg(args, "post_id")),
        "create_comment" => {
            let input = NewComment {
                content: str_arg(args, "content").to_string(),
                wallet_address: str_arg(args, "wallet_address").to_string(),
            };
            c.build_create_comment(str_arg(args, "post_id"), &input).unwrap()
        }
        "delete_comment" => c
            .build_delete_comment(str_arg(args, "comment_id"), str_arg(args, "wallet_address"))
            .unwrap(),
        "like_comment" => c
            .build_like_comment(str_arg(args, "comment_id"), str_arg(args, "wallet_address"))
            .unwrap(),
        "dislike_comment" => c
            .build_dislike_comment(str_arg(args, "comment_id"), str_arg(args, "wallet_address"))
            .unwrap(),
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = build(&c, case["operation"].as_str().unwrap(), &case["args"]);
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

        match req.body.as_deref() {
            None => assert!(expected["body"].is_null(), "{name}: expected a body"),
            Some(body) => {
                let body: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected["body"], "{name}: body");
                assert_eq!(
                    req.headers,
                    vec![("content-type".to_string(), "application/json".to_string())],
                    "{name}: headers"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };

        let result = check_status(&response);
        let Some(expected_error) = case["expected_error"].as_str() else {
            assert!(result.is_ok(), "{name}: expected success");
            continue;
        };

        let err = result.unwrap_err();
        match expected_error {
            "NotFound" => assert!(matches!(err, ApiError::NotFound { .. }), "{name}: expected NotFound"),
            "Server" => assert!(
                matches!(err, ApiError::Server { status, .. } if status == response.status),
                "{name}: expected Server"
            ),
            other => panic!("{name}: unknown expected_error: {other}"),
        }
        assert_eq!(err.to_string(), case["expected_message"].as_str().unwrap(), "{name}: message");
    }
}
