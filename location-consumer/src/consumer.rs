use async_channel::Sender;
use futures::StreamExt;
use gatewatch_core::DataMessage;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::warn;

use crate::{
    error::{Result, error::{SendSnafu, StreamClosedSnafu}},
    models::parse_message,
};

/// Feed lines longer than this are malformed and dropped by the codec.
const MAX_MESSAGE_LENGTH: usize = 64 * 1024;

pub struct Consumer;

impl Consumer {
    pub fn new() -> Consumer {
        Consumer
    }

    /// Consumes the feed line by line until the connection closes. Lines are
    /// processed in delivery order; a malformed line is logged and dropped
    /// without affecting the cache.
    pub async fn run(
        &self,
        source: impl AsyncRead + Unpin,
        sender: Sender<DataMessage>,
    ) -> Result<()> {
        let codec = LinesCodec::new_with_max_length(MAX_MESSAGE_LENGTH);
        let mut framed_read = FramedRead::new(source, codec);

        while let Some(message) = framed_read.next().await {
            match message {
                Err(e) => warn!("failed to consume a feed line: {e:?}"),
                Ok(line) => match parse_message(&line) {
                    Err(e) => warn!("{e:?}"),
                    Ok(message) => {
                        if !message.positions.is_empty() {
                            // Can only fail if the tracking loop is gone.
                            sender
                                .send(message)
                                .await
                                .map_err(|error| SendSnafu { error }.build())?;
                        }
                    }
                },
            }
        }

        StreamClosedSnafu.fail()
    }
}

impl Default for Consumer {
    fn default() -> Self {
        Self::new()
    }
}
