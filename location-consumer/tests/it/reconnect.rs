use std::time::Duration;

use gatewatch_core::Environment;
use location_consumer::{settings::Settings, startup::App};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method, matchers::path};

/// The feed body completes immediately, so every connection closes right
/// away and the app has to reconnect after its fixed delay.
#[tokio::test(flavor = "multi_thread")]
async fn test_closed_feed_connections_are_reopened_after_the_fixed_delay() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"id\":1,\"lat\":-6.2,\"lng\":106.8,\"is_active\":true}\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zones/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let settings = Settings {
        environment: Environment::Local,
        feed_address: format!("{}/ws", server.uri()),
        zones_address: format!("{}/zones/custom", server.uri()),
        reconnect_delay: Duration::from_millis(200),
        frame_interval: Duration::from_millis(5),
        channel_buffer_size: 16,
    };

    let app = App::build(settings).await;
    let _scene = app.scene();
    tokio::spawn(app.run());

    tokio::time::sleep(Duration::from_millis(700)).await;

    let feed_requests = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/ws")
        .count();

    // One initial connection plus reconnections, each spaced by the fixed
    // delay. No duplicate concurrent connections, no runaway hammering.
    assert!(
        (2..=5).contains(&feed_requests),
        "unexpected number of feed connections: {feed_requests}"
    );
}
