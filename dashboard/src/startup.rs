use std::str::FromStr;

use gatewatch_core::Booking;
use reqwest::Url;
use tokio::{sync::watch, task::JoinSet};
use tracing::{info, warn};

use crate::{
    bookings::{BookingsClient, BookingsPoller},
    reports::report_counts,
    settings::Settings,
    token::AccessToken,
};

pub struct App {
    poller: BookingsPoller,
    receiver: watch::Receiver<Vec<Booking>>,
}

impl App {
    pub fn build(settings: Settings) -> App {
        if settings.token.is_none() {
            warn!("no bearer token configured, the bookings view will stay empty");
        }

        let client = BookingsClient::new(Url::from_str(&settings.bookings_address).unwrap());
        let token = AccessToken::new(settings.token.unwrap_or_default());

        let (poller, receiver) = BookingsPoller::new(client, token, settings.poll_interval);

        App { poller, receiver }
    }

    pub async fn run(self) {
        let App {
            poller,
            mut receiver,
        } = self;

        let mut set = JoinSet::new();

        set.spawn(poller.run());
        set.spawn(async move {
            while receiver.changed().await.is_ok() {
                let bookings = receiver.borrow_and_update().clone();
                let counts = report_counts(&bookings);
                info!(
                    num_bookings = bookings.len(),
                    "refreshed bookings view: {counts:?}"
                );
            }
        });

        let out = set.join_next().await;
        panic!("bookings poller or view loop exited unexpectedly: {out:?}");
    }
}
