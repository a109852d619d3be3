use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Bearer token does not have three parts"))]
    InvalidJwtParts {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to base64 decode the token claims segment"))]
    #[snafu(context(false))]
    DecodeClaims {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: base64::DecodeError,
    },
    #[snafu(display("Failed to deserialize the token claims"))]
    #[snafu(context(false))]
    ParseClaims {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Request failed"))]
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
