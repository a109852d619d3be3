use gatewatch_core::Coordinate;
use location_consumer::models::RawDriverRecord;
use serde_json::json;

use crate::helper::{test, wait_for_scene};

#[tokio::test(flavor = "multi_thread")]
async fn test_wrapped_position_message_renders_one_driver() {
    test(|mut helper| async move {
        helper
            .feed
            .send_json(json!({
                "data": [{"id": 1, "lat": -6.2, "lng": 106.8, "is_active": true}]
            }))
            .await;

        let scene = wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;

        assert_eq!(Coordinate::new(-6.2, 106.8), scene.markers[0].position);
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inactive_update_removes_driver_from_the_scene() {
    test(|mut helper| async move {
        helper
            .feed
            .send_json(json!({"id": 1, "lat": -6.2, "lng": 106.8, "is_active": true}))
            .await;
        wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;

        helper
            .feed
            .send_json(json!({"id": 1, "lat": -6.2, "lng": 106.8, "is_active": false}))
            .await;

        wait_for_scene(&mut helper.scene, |s| s.markers.is_empty()).await;
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_active_flag_defaults_to_visible() {
    test(|mut helper| async move {
        helper
            .feed
            .send_json(json!({"id": 2, "lat": -6.2, "lng": 106.8}))
            .await;

        wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_coordinate_records_are_never_rendered() {
    test(|mut helper| async move {
        helper
            .feed
            .send_json(json!({"id": 1, "lat": 0.0, "lng": 0.0, "is_active": true}))
            .await;
        helper.feed.send_record(&RawDriverRecord::test_default(2)).await;

        let scene = wait_for_scene(&mut helper.scene, |s| !s.markers.is_empty()).await;

        assert_eq!(1, scene.markers.len());
        assert_eq!(2, scene.markers[0].key.id.into_inner());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_legacy_pascal_case_records_are_normalized() {
    test(|mut helper| async move {
        helper
            .feed
            .send_json(json!({
                "ID": 3,
                "UserID": "user-3",
                "Name": "Surya",
                "Lat": -6.2,
                "Lng": 106.8,
                "IsActive": true
            }))
            .await;

        let scene = wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;

        assert_eq!("Surya", scene.markers[0].name);
        assert_eq!("3-user-3", scene.markers[0].key.to_string());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_marker_animates_to_the_new_position() {
    test(|mut helper| async move {
        let mut record = RawDriverRecord::test_default(7);
        helper.feed.send_record(&record).await;
        wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;

        record.lat += 0.1;
        record.lng += 0.1;
        let target = Coordinate::new(record.lat, record.lng);
        helper.feed.send_record(&record).await;

        // The marker settles exactly on the target once all frames have run.
        wait_for_scene(&mut helper.scene, |s| {
            s.markers.len() == 1 && s.markers[0].position == target
        })
        .await;
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_lines_do_not_affect_the_cache() {
    test(|mut helper| async move {
        helper.feed.send_record(&RawDriverRecord::test_default(1)).await;
        wait_for_scene(&mut helper.scene, |s| s.markers.len() == 1).await;

        helper.feed.send_json(json!("not a record")).await;
        helper.feed.send_record(&RawDriverRecord::test_default(2)).await;

        let scene = wait_for_scene(&mut helper.scene, |s| s.markers.len() == 2).await;

        assert_eq!(2, scene.markers.len());
    })
    .await;
}
