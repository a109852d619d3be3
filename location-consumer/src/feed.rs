use futures::{StreamExt, TryStreamExt};
use reqwest::{Client, Url};
use tokio::io::AsyncRead;

use crate::error::{Result, error::FailedRequestSnafu};

/// Client for the live location feed: one persistent chunked response
/// carrying newline-delimited JSON driver updates.
pub struct LocationFeedClient {
    feed_address: Url,
    client: Client,
}

impl LocationFeedClient {
    pub fn new(feed_address: Url) -> LocationFeedClient {
        LocationFeedClient {
            feed_address,
            client: Client::new(),
        }
    }

    /// Returns the feed as a stream which will continuously receive driver
    /// position updates until the connection closes.
    pub async fn streamer(&self) -> Result<impl AsyncRead> {
        let response = self.client.get(self.feed_address.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: self.feed_address.to_string(),
                status,
                body: response.text().await?,
            }
            .fail();
        }

        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(|e| std::io::Error::other(format!("{e:?}"))))
            .into_async_read();

        Ok(tokio_util::compat::FuturesAsyncReadCompatExt::compat(
            stream,
        ))
    }
}
