use std::time::Duration;

use gatewatch_core::{Booking, visible_bookings};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::error;

use crate::{
    error::{Result, error::FailedRequestSnafu},
    token::AccessToken,
};

/// Client for the active bookings endpoint.
pub struct BookingsClient {
    bookings_address: Url,
    client: Client,
}

/// Envelope shapes for the bookings endpoint: `data`-wrapped or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BookingsResponse {
    Wrapped { data: Vec<Booking> },
    Bare(Vec<Booking>),
}

impl BookingsClient {
    pub fn new(bookings_address: Url) -> BookingsClient {
        BookingsClient {
            bookings_address,
            client: Client::new(),
        }
    }

    /// The bookings visible to the holder of `token`, oldest gate-in first.
    /// A malformed or expired token yields an empty list.
    pub async fn visible_bookings(&self, token: &AccessToken) -> Result<Vec<Booking>> {
        let Some(claims) = token.active_claims() else {
            return Ok(Vec::new());
        };

        let bookings = self.active_bookings(token).await?;

        Ok(visible_bookings(
            bookings,
            claims.role,
            claims.numeric_user_id(),
        ))
    }

    async fn active_bookings(&self, token: &AccessToken) -> Result<Vec<Booking>> {
        let response = self
            .client
            .get(self.bookings_address.clone())
            .bearer_auth(token.token())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: self.bookings_address.to_string(),
                status,
                body: response.text().await?,
            }
            .fail();
        }

        let response: BookingsResponse = response.json().await?;

        Ok(match response {
            BookingsResponse::Wrapped { data } => data,
            BookingsResponse::Bare(bookings) => bookings,
        })
    }
}

/// Re-fetches the bookings view on a fixed interval and publishes each
/// result. Fetch failures degrade to an empty list; the poller never stops
/// on its own.
pub struct BookingsPoller {
    client: BookingsClient,
    token: AccessToken,
    poll_interval: Duration,
    sender: watch::Sender<Vec<Booking>>,
}

impl BookingsPoller {
    pub fn new(
        client: BookingsClient,
        token: AccessToken,
        poll_interval: Duration,
    ) -> (BookingsPoller, watch::Receiver<Vec<Booking>>) {
        let (sender, receiver) = watch::channel(Vec::new());
        (
            BookingsPoller {
                client,
                token,
                poll_interval,
                sender,
            },
            receiver,
        )
    }

    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            interval.tick().await;

            let bookings = match self.client.visible_bookings(&self.token).await {
                Ok(bookings) => bookings,
                Err(e) => {
                    error!("failed to fetch bookings: {e:?}");
                    Vec::new()
                }
            };

            if self.sender.send(bookings).is_err() {
                // No watchers left.
                return;
            }
        }
    }
}
