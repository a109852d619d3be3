use std::time::Duration;

use futures::{Future, TryStreamExt};
use gatewatch_core::Environment;
use location_consumer::{models::RawDriverRecord, render::MapScene, settings::Settings, startup::App};
use tokio::sync::watch;
use tokio_stream::wrappers::ReceiverStream;

pub struct TestHelper {
    pub feed: FeedSource,
    pub scene: watch::Receiver<MapScene>,
}

pub struct FeedSource {
    out: tokio::sync::mpsc::Sender<Result<String, std::io::Error>>,
}

pub async fn test<T, Fut>(test_closure: T)
where
    T: FnOnce(TestHelper) -> Fut,
    Fut: Future<Output = ()>,
{
    let settings = Settings {
        environment: Environment::Test,
        feed_address: "http://localhost:8080/ws".to_string(),
        zones_address: "http://localhost:8080/zones/custom".to_string(),
        reconnect_delay: Duration::from_millis(50),
        frame_interval: Duration::from_millis(2),
        channel_buffer_size: 16,
    };

    let app = App::build(settings).await;
    let scene = app.scene();

    let (sender, recv) = tokio::sync::mpsc::channel(100);

    let receiver_stream = ReceiverStream::new(recv);
    let compat =
        tokio_util::compat::FuturesAsyncReadCompatExt::compat(receiver_stream.into_async_read());

    tokio::spawn(app.run_test(compat));

    let helper = TestHelper {
        feed: FeedSource { out: sender },
        scene,
    };

    test_closure(helper).await;
}

impl FeedSource {
    pub async fn send_record(&self, record: &RawDriverRecord) {
        self.send_line(serde_json::to_string(record).unwrap()).await;
    }

    pub async fn send_json(&self, value: serde_json::Value) {
        self.send_line(value.to_string()).await;
    }

    async fn send_line(&self, mut val: String) {
        val.push('\n');
        self.out.send(Ok(val)).await.unwrap();
    }
}

/// Waits until the published scene satisfies `predicate`, or panics after a
/// generous timeout.
pub async fn wait_for_scene<F>(scene: &mut watch::Receiver<MapScene>, predicate: F) -> MapScene
where
    F: Fn(&MapScene) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let current = scene.borrow_and_update();
                if predicate(&current) {
                    return MapScene::clone(&current);
                }
            }
            scene.changed().await.unwrap();
        }
    })
    .await
    .unwrap()
}
