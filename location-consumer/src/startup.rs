use std::{str::FromStr, time::Duration};

use async_channel::{Receiver, Sender};
use gatewatch_core::{DataMessage, Environment, Zone};
use reqwest::Url;
use tokio::{io::AsyncRead, sync::watch, task::JoinSet};
use tracing::{error, info, instrument};

use crate::{
    consumer::Consumer,
    error::{Error, Result},
    feed::LocationFeedClient,
    geofence::ZoneClient,
    render::MapScene,
    settings::Settings,
    tracker::DriverTracker,
};

pub struct App {
    consumer: Consumer,
    sender: Sender<DataMessage>,
    receiver: Receiver<DataMessage>,
    feed: Option<LocationFeedClient>,
    zones: ZoneClient,
    reconnect_delay: Duration,
    frame_interval: Duration,
    scene_tx: watch::Sender<MapScene>,
    scene_rx: watch::Receiver<MapScene>,
}

impl App {
    pub async fn build(settings: Settings) -> App {
        let (sender, receiver) =
            async_channel::bounded::<DataMessage>(settings.channel_buffer_size);
        let (scene_tx, scene_rx) = watch::channel(MapScene::default());

        let feed = if let Environment::Test = settings.environment {
            None
        } else {
            Some(LocationFeedClient::new(
                Url::from_str(&settings.feed_address).unwrap(),
            ))
        };

        App {
            consumer: Consumer::new(),
            sender,
            receiver,
            feed,
            zones: ZoneClient::new(Url::from_str(&settings.zones_address).unwrap()),
            reconnect_delay: settings.reconnect_delay,
            frame_interval: settings.frame_interval,
            scene_tx,
            scene_rx,
        }
    }

    /// Latest composed map scene; any consumer surface can watch this.
    pub fn scene(&self) -> watch::Receiver<MapScene> {
        self.scene_rx.clone()
    }

    pub async fn run(self) {
        let App {
            consumer,
            sender,
            receiver,
            feed,
            zones,
            reconnect_delay,
            frame_interval,
            scene_tx,
            scene_rx: _scene_rx,
        } = self;

        let zones = zones.load_or_empty().await;
        let feed = feed.unwrap();

        let mut set = JoinSet::new();

        set.spawn(track_loop(receiver, scene_tx, zones, frame_interval));
        set.spawn(async move {
            loop {
                if let Err(e) = consume_feed(&consumer, &feed, &sender).await {
                    error!("consumer failed: {e:?}");
                }
                // If the feed is unresponsive we want it back, but not by
                // hammering the endpoint.
                tokio::time::sleep(reconnect_delay).await;
            }
        });

        let out = set.join_next().await;
        panic!("feed consume loop or tracking loop exited unexpectedly: {out:?}");
    }

    pub async fn run_test(self, source: impl AsyncRead + Unpin) -> Result<()> {
        let App {
            consumer,
            sender,
            receiver,
            frame_interval,
            scene_tx,
            ..
        } = self;

        tokio::spawn(track_loop(receiver, scene_tx, Vec::new(), frame_interval));

        consumer.run(source, sender).await
    }
}

#[instrument(skip_all)]
async fn consume_feed(
    consumer: &Consumer,
    feed: &LocationFeedClient,
    sender: &Sender<DataMessage>,
) -> Result<()> {
    let source = feed.streamer().await?;
    info!("connected to location feed");

    match consumer.run(source, sender.clone()).await {
        Ok(()) => Ok(()),
        Err(e) => match e {
            // This indicates that the tracking loop has exited and we have
            // no way of recovering so we panic.
            Error::SendError { .. } => panic!("{e:?}"),
            _ => Err(e),
        },
    }
}

/// Owns the tracker: reconciles feed messages and drives animation frames on
/// one task, publishing a fresh scene after every mutation.
async fn track_loop(
    receiver: Receiver<DataMessage>,
    scene: watch::Sender<MapScene>,
    zones: Vec<Zone>,
    frame_interval: Duration,
) {
    let mut tracker = DriverTracker::new();
    let mut interval = tokio::time::interval(frame_interval);

    loop {
        tokio::select! {
            message = receiver.recv() => {
                match message {
                    Ok(message) => {
                        tracker.apply(message);
                        let _ = scene.send(MapScene::compose(&tracker, &zones));
                    }
                    // All senders are gone; the consumer side has exited and
                    // will bring the service down.
                    Err(_) => return,
                }
            }
            _ = interval.tick() => {
                if tracker.has_active_animations() {
                    tracker.tick();
                    let _ = scene.send(MapScene::compose(&tracker, &zones));
                }
            }
        }
    }
}
