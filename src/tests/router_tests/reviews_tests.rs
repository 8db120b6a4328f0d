use crate::tests::utils::{init_test_app, send};
use http::Method;

#[test]
fn dashboard_lists_fallback_listings() {
    let app = init_test_app("dashboard_lists");
    let (status, body) = send(&app, Method::GET, "/api/reviews", None);

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"]["type"], "mock");
    assert_eq!(
        body["source"]["fallback"],
        "Missing HOSTAWAY_ACCOUNT_ID or HOSTAWAY_API_KEY"
    );
    assert_eq!(body["sources"]["hostaway"]["type"], "mock");
    assert_eq!(body["sources"]["google"]["type"], "mock");
    assert_eq!(
        body["sources"]["google"]["fallback"],
        "Missing Google Places API key or Place ID"
    );
    assert_eq!(body["totals"]["totalReviews"], 9);

    let listings = body["listings"].as_array().unwrap();
    assert_eq!(listings.len(), 3);
    let shoreditch = &listings[0];
    assert_eq!(shoreditch["listingId"], "2b-n1-a-29-shoreditch-heights");
    assert_eq!(shoreditch["listingName"], "2B N1 A - 29 Shoreditch Heights");
    assert_eq!(shoreditch["insights"]["recentTrend"], "declining");

    let first = &shoreditch["reviews"][0];
    assert!(first["submittedAt"].as_str().unwrap().starts_with("20"));
    assert!(first["categories"].is_object());
}

#[test]
fn dashboard_filters_and_sorts() {
    let app = init_test_app("dashboard_filters");
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reviews?channel=booking&sortBy=rating&order=asc",
        None,
    );
    assert_eq!(status, 200);

    let ids: Vec<&str> = body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|l| l["reviews"].as_array().unwrap())
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"7458"));
    assert!(ids.contains(&"7461"));
    assert!(body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|l| l["reviews"].as_array().unwrap())
        .all(|r| r["channel"] == "booking"));
}

#[test]
fn dashboard_rejects_bad_params() {
    let app = init_test_app("dashboard_bad_params");

    let (status, body) = send(&app, Method::GET, "/api/reviews?minRating=lots", None);
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid minRating: lots");

    let (status, _) = send(&app, Method::GET, "/api/reviews?sortBy=guest", None);
    assert_eq!(status, 400);
}

#[test]
fn widest_timeframe_keeps_every_review() {
    let app = init_test_app("dashboard_widest_timeframe");
    let (status, body) = send(&app, Method::GET, "/api/reviews?timeframeDays=4294967295", None);

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["listings"].as_array().unwrap().len(), 3);
    let listed: usize = body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["reviews"].as_array().unwrap().len())
        .sum();
    assert_eq!(listed, 9);

    let (status, _) = send(&app, Method::GET, "/api/reviews?timeframeDays=4294967296", None);
    assert_eq!(status, 400);
}

#[test]
fn single_listing_by_slug() {
    let app = init_test_app("single_listing");
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reviews/listings/spacious-2-bed-flat-in-hoxton",
        None,
    );

    assert_eq!(status, 200);
    assert_eq!(body["listing"]["totalReviews"], 3);
    assert_eq!(body["listing"]["avgRating"], 4.5);

    let (status, body) = send(&app, Method::GET, "/api/reviews/listings/unknown-flat", None);
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[test]
fn single_review_by_id() {
    let app = init_test_app("single_review");
    let (status, body) = send(&app, Method::GET, "/api/reviews/7454", None);

    assert_eq!(status, 200);
    assert_eq!(body["review"]["id"], "7454");
    assert_eq!(body["review"]["rating"], 4.5);
    assert_eq!(body["review"]["channel"], "airbnb");
    assert_eq!(body["review"]["approved"], false);

    let (status, _) = send(&app, Method::GET, "/api/reviews/0", None);
    assert_eq!(status, 404);
}

#[test]
fn unknown_route_is_json_404() {
    let app = init_test_app("unknown_route");
    let (status, body) = send(&app, Method::GET, "/nope", None);
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found");
}
