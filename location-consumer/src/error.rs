use gatewatch_core::DataMessage;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Location stream closed unexpectedly"))]
    StreamClosed {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Internal tracking channel closed unexpectedly"))]
    SendError {
        #[snafu(implicit)]
        location: Location,
        error: async_channel::SendError<DataMessage>,
    },
    #[snafu(display("Request to the location feed failed"))]
    #[snafu(context(false))]
    Request {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("Received a non-ok response from '{url}', status: {status}, body: {body}"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
#[snafu(display("Failed to parse a tracking message"))]
pub struct TrackingMessageError {
    #[snafu(implicit)]
    location: Location,
    #[snafu(source)]
    error: serde_json::Error,
}
