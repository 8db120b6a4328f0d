use crate::tests::utils::{init_test_app, send};
use http::Method;

#[test]
fn google_reviews_fall_back_without_key() {
    let app = init_test_app("google_fallback");
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reviews/google?listingName=Spacious%202%20Bed%20Flat%20in%20Hoxton",
        None,
    );

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["source"], "mock");
    assert_eq!(body["meta"]["fallbackReason"], "Missing GOOGLE_PLACES_API_KEY");
    assert_eq!(body["meta"]["query"], "Spacious 2 Bed Flat in Hoxton");
    assert!(body["meta"].get("placeId").is_none());

    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    assert!(reviews.iter().all(|r| r["channel"] == "google"));
    assert!(reviews
        .iter()
        .all(|r| r["listingId"] == "spacious-2-bed-flat-in-hoxton"));
}

#[test]
fn google_review_approval_is_overlaid() {
    let app = init_test_app("google_approval");
    let id = "google:unresolved:1722506400:tom-alvarez";

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reviews/approve",
        Some(&format!(r#"{{"reviewId": "{id}", "approved": true}}"#)),
    );
    assert_eq!(status, 200);

    let (_, body) = send(&app, Method::GET, "/api/reviews/google?listingName=Hoxton", None);
    let tom = body["reviews"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["guestName"] == "Tom Alvarez")
        .unwrap();
    // listing name differs but the place is unresolved either way
    assert_eq!(tom["id"], id);
    assert_eq!(tom["approved"], true);
}

#[test]
fn listing_name_is_required() {
    let app = init_test_app("google_missing_name");
    let (status, body) = send(&app, Method::GET, "/api/reviews/google", None);
    assert_eq!(status, 400);
    assert_eq!(body["error"], "listingName is required");

    let (status, _) = send(&app, Method::GET, "/api/reviews/google?listingName=", None);
    assert_eq!(status, 400);
}
