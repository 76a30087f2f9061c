//! End-to-end tests of the REST surface over a seeded in-memory catalog
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`, no
//! socket involved.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;
use toolshed_api::{AppState, create_router};
use toolshed_core::{MemoryStorage, seed};

async fn app() -> Router {
    let storage = MemoryStorage::new();
    seed::seed_if_empty(&storage).await.unwrap();
    create_router(AppState::new(Arc::new(storage)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_list_categories_by_name() {
    let app = app().await;
    let (status, body) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 4, 3, 1, 5, 6]);
    assert_eq!(body[0]["name"], "DIY Decor");
    assert_eq!(body[0]["workshopCount"], 2);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
#[tokio::test]
async fn test_category_workshops_only_contain_that_category(#[case] category_id: i64) {
    let app = app().await;
    let (status, body) = get(&app, &format!("/api/categories/{category_id}/workshops")).await;
    assert_eq!(status, StatusCode::OK);
    for workshop in body.as_array().unwrap() {
        assert_eq!(workshop["categoryId"], category_id);
    }

    let (_, category) = get(&app, &format!("/api/categories/{category_id}")).await;
    assert_eq!(
        category["workshopCount"].as_u64().unwrap() as usize,
        body.as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_category_errors() {
    let app = app().await;

    let (status, body) = get(&app, "/api/categories/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");

    let (status, _) = get(&app, "/api/categories/99/workshops").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/categories/plumbing").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category ID");
}

// =============================================================================
// Workshops
// =============================================================================

#[tokio::test]
async fn test_list_workshops_newest_first() {
    let app = app().await;
    let (status, body) = get(&app, "/api/workshops").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 6, 7, 1, 4, 5]);
    assert_eq!(body[0]["title"], "Garden Planning 101");
    assert_eq!(body[0]["date"], "2023-10-22T09:00:00");
}

#[tokio::test]
async fn test_search_plumbing_matches_case_insensitively() {
    let app = app().await;
    let (_, all) = get(&app, "/api/workshops").await;
    let expected: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .filter(|w| {
            ["title", "description", "location"]
                .iter()
                .any(|f| w[f].as_str().unwrap().to_lowercase().contains("plumbing"))
        })
        .map(|w| w["id"].as_i64().unwrap())
        .collect();

    let (status, body) = get(&app, "/api/workshops?q=plumbing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected);
    assert_eq!(ids(&body), vec![4]);

    let (_, upper) = get(&app, "/api/workshops?q=PLUMBING").await;
    assert_eq!(ids(&upper), vec![4]);
}

#[rstest]
#[case("/api/workshops?q=center", vec![1, 4, 7, 3])]
#[case("/api/workshops?q=community%20center", vec![1, 4, 3])]
#[case("/api/workshops?q=center&categoryId=5", vec![4])]
#[case("/api/workshops?categoryId=2", vec![2, 7])]
#[case("/api/workshops?categoryId=", vec![3, 2, 6, 7, 1, 4, 5])]
#[case("/api/workshops?categoryId=0", vec![3, 2, 6, 7, 1, 4, 5])]
#[case("/api/workshops?q=plumbing&categoryId=0", vec![4])]
#[case("/api/workshops?q=%20%20", vec![3, 2, 6, 7, 1, 4, 5])]
#[case("/api/workshops?q=welding", vec![])]
#[tokio::test]
async fn test_search_combinations(#[case] uri: &str, #[case] expected: Vec<i64>) {
    let app = app().await;
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::OK);
    let mut got = ids(&body);
    let mut want = expected;
    got.sort();
    want.sort();
    assert_eq!(got, want);
}

#[tokio::test]
async fn test_search_with_malformed_category() {
    let app = app().await;
    let (status, body) = get(&app, "/api/workshops?q=paint&categoryId=six").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid category ID");
}

#[rstest]
#[case("/api/workshops?q=a&q=b")]
#[case("/api/workshops?categoryId=1&categoryId=2")]
#[tokio::test]
async fn test_unreadable_query_string_is_json_error(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid query string");
}

#[tokio::test]
async fn test_featured_and_weekend() {
    let app = app().await;

    let (status, featured) = get(&app, "/api/workshops/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&featured), vec![3, 2, 1]);

    let (status, weekend) = get(&app, "/api/workshops/weekend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&weekend), vec![6, 7, 4, 5]);
    assert!(
        weekend
            .as_array()
            .unwrap()
            .iter()
            .all(|w| w["thisWeekend"] == true)
    );
}

#[tokio::test]
async fn test_get_workshop() {
    let app = app().await;

    let (status, body) = get(&app, "/api/workshops/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Basic Electrical Repairs");
    assert_eq!(body["availableSpots"], 8);
    assert_eq!(body["totalSpots"], 20);
    assert_eq!(body["isAvailable"], true);
    assert_eq!(body["hostId"], 1);

    let (status, body) = get(&app, "/api/workshops/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workshop not found");

    let (status, _) = get(&app, "/api/workshops/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Availability
// =============================================================================

async fn patch_spots(app: &Router, id: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PATCH", &format!("/api/workshops/{id}/availability"), Some(body)).await
}

#[tokio::test]
async fn test_patch_to_one_below_capacity_stays_available() {
    let app = app().await;
    let (status, full) = patch_spots(&app, "1", json!({ "availableSpots": 20 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["availableSpots"], full["totalSpots"]);

    let (status, body) = patch_spots(&app, "1", json!({ "availableSpots": 19 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSpots"], 19);
    assert_eq!(body["isAvailable"], true);
}

#[tokio::test]
async fn test_patch_to_zero_marks_unavailable() {
    let app = app().await;
    let (status, body) = patch_spots(&app, "3", json!({ "availableSpots": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSpots"], 0);
    assert_eq!(body["isAvailable"], false);

    let (_, fetched) = get(&app, "/api/workshops/3").await;
    assert_eq!(fetched["isAvailable"], false);
}

#[tokio::test]
async fn test_patch_reopens_sold_out_workshop() {
    let app = app().await;
    let (status, body) = patch_spots(&app, "2", json!({ "availableSpots": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAvailable"], true);
}

#[rstest]
#[case(json!({ "availableSpots": -1 }))]
#[case(json!({ "availableSpots": 2.5 }))]
#[case(json!({ "availableSpots": "3" }))]
#[case(json!({ "spots": 3 }))]
#[case(json!({}))]
#[case(json!(null))]
#[tokio::test]
async fn test_patch_rejects_bad_bodies(#[case] body: Value) {
    let app = app().await;
    let (status, response) = patch_spots(&app, "1", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Invalid request body");

    let (_, workshop) = get(&app, "/api/workshops/1").await;
    assert_eq!(workshop["availableSpots"], 8);
}

#[tokio::test]
async fn test_patch_above_capacity_is_rejected() {
    let app = app().await;
    let (status, body) = patch_spots(&app, "1", json!({ "availableSpots": 21 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "availableSpots must be between 0 and 20");
}

#[tokio::test]
async fn test_patch_missing_or_malformed_workshop() {
    let app = app().await;
    let (status, _) = patch_spots(&app, "99", json!({ "availableSpots": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = patch_spots(&app, "x", json!({ "availableSpots": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid workshop ID");
}

// =============================================================================
// Booking
// =============================================================================

#[tokio::test]
async fn test_book_takes_one_spot() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/api/workshops/4/book", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSpots"], 2);
    assert_eq!(body["isAvailable"], true);
}

#[tokio::test]
async fn test_book_sold_out_is_conflict() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/api/workshops/6/book", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Workshop is fully booked");

    let (_, workshop) = get(&app, "/api/workshops/6").await;
    assert_eq!(workshop["availableSpots"], 0);
}

#[tokio::test]
async fn test_book_missing_workshop() {
    let app = app().await;
    let (status, _) = send(&app, "POST", "/api/workshops/99/book", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_last_spots() {
    let app = app().await;
    // Kitchen Organization has 4 spots left.
    let attempts: Vec<_> = (0..9)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { send(&app, "POST", "/api/workshops/7/book", None).await.0 })
        })
        .collect();

    let mut ok = 0;
    let mut conflict = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflict += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!((ok, conflict), (4, 5));

    let (_, workshop) = get(&app, "/api/workshops/7").await;
    assert_eq!(workshop["availableSpots"], 0);
    assert_eq!(workshop["isAvailable"], false);
}

// =============================================================================
// Hosts, testimonials, health
// =============================================================================

#[tokio::test]
async fn test_hosts() {
    let app = app().await;
    let (status, body) = get(&app, "/api/hosts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 1, 3]);
    assert_eq!(body[0]["reviewCount"], 87);

    let (status, host) = get(&app, "/api/hosts/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(host["name"], "Modern Renovations Co.");

    let (status, body) = get(&app, "/api/hosts/12").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Host not found");

    let (status, _) = get(&app, "/api/hosts/-").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_testimonials_by_rating() {
    let app = app().await;
    let (status, body) = get(&app, "/api/testimonials").await;
    assert_eq!(status, StatusCode::OK);
    let ratings: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["rating"].as_i64().unwrap())
        .collect();
    assert_eq!(ratings, vec![5, 5, 4]);
    assert_eq!(body[2]["initials"], "DK");
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
