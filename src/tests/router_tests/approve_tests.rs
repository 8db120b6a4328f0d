use crate::tests::utils::{init_test_app, send};
use http::Method;

#[test]
fn approve_then_unapprove() {
    let app = init_test_app("approve_flow");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(r#"{"reviewId": "7453", "approved": true}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["reviewId"], "7453");
    assert_eq!(body["approved"], true);

    let (_, body) = send(&app, Method::GET, "/api/reviews/7453", None);
    assert_eq!(body["review"]["approved"], true);

    let (_, body) = send(&app, Method::GET, "/api/reviews", None);
    assert_eq!(body["totals"]["approvedCount"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(r#"{"reviewId": "7453", "approved": false}"#),
    );
    assert_eq!(status, 200);

    let (_, body) = send(&app, Method::GET, "/api/reviews/approve", None);
    assert_eq!(body["success"], true);
    assert_eq!(body["approvals"]["7453"], false);
}

#[test]
fn numeric_review_id_is_accepted() {
    let app = init_test_app("approve_numeric");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(r#"{"reviewId": 7455, "approved": true}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["reviewId"], "7455");
}

#[test]
fn string_flags_are_read_leniently() {
    let app = init_test_app("approve_string_flag");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(r#"{"reviewId": "7454", "approved": "true"}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["approved"], true);

    let (_, body) = send(&app, Method::GET, "/api/reviews/7454", None);
    assert_eq!(body["review"]["approved"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(r#"{"reviewId": "7454", "approved": "false"}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["approved"], false);
}

#[test]
fn missing_review_id_is_400() {
    let app = init_test_app("approve_missing_id");

    for payload in [r#"{"approved": true}"#, r#"{"reviewId": "  ", "approved": true}"#] {
        let (status, body) = send(&app, Method::POST, "/api/reviews/approve", Some(payload));
        assert_eq!(status, 400, "{payload}");
        assert_eq!(body["error"], "reviewId is required");
    }
}

#[test]
fn non_json_body_is_400() {
    let app = init_test_app("approve_bad_body");
    let (status, body) = send(&app, Method::POST, "/api/reviews/approve", Some("reviewId=7453"));
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/api/reviews/approve", None);
    assert_eq!(status, 400);
}

#[test]
fn approvals_start_empty() {
    let app = init_test_app("approvals_empty");
    let (status, body) = send(&app, Method::GET, "/api/reviews/approve", None);
    assert_eq!(status, 200);
    assert!(body["approvals"].as_object().unwrap().is_empty());
}
