use std::str::FromStr;

use dashboard::bookings::BookingsClient;
use gatewatch_core::Booking;
use reqwest::Url;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::helper::{make_token, make_token_with_exp};

fn booking_json(id: i64, user_id: i64, gate_in: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": user_id,
        "gate_in_time": gate_in,
        "status": "fit",
        "arrival_status": "on_time",
    })
}

async fn client_for(server: &MockServer) -> BookingsClient {
    BookingsClient::new(
        Url::from_str(&format!("{}/api/location/active", server.uri())).unwrap(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drivers_only_see_their_own_bookings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                booking_json(1, 7, "2025-11-16T08:00:00Z"),
                booking_json(2, 8, "2025-11-16T07:00:00Z"),
                booking_json(3, 7, "2025-11-16T06:00:00Z"),
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let visible = client
        .visible_bookings(&make_token("driver", "7"))
        .await
        .unwrap();

    assert_eq!(
        vec![3, 1],
        visible.iter().map(|b| b.id).collect::<Vec<_>>()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admins_see_all_bookings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                booking_json(1, 7, "2025-11-16T08:00:00Z"),
                booking_json(2, 8, "2025-11-16T07:00:00Z"),
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let visible = client
        .visible_bookings(&make_token("admin", "1"))
        .await
        .unwrap();

    assert_eq!(2, visible.len());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bare_array_responses_are_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([booking_json(1, 7, "2025-11-16T08:00:00Z")])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let visible: Vec<Booking> = client
        .visible_bookings(&make_token("admin", "1"))
        .await
        .unwrap();

    assert_eq!(1, visible.len());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_requests_carry_the_bearer_token() {
    let server = MockServer::start().await;
    let token = make_token("admin", "1");

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .and(header(
            "authorization",
            format!("Bearer {}", token.token()).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    assert!(client.visible_bookings(&token).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_tokens_fetch_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let expired = make_token_with_exp("admin", "1", 1_000);

    assert!(client.visible_bookings(&expired).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_errors_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/active"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    assert!(client.visible_bookings(&make_token("admin", "1")).await.is_err());
}
