use bookstand_api::ApiError;
use thiserror::Error;

/// All the ways a read can fail
///
/// A missing book is its own variant so callers can render "not found"
/// differently from "the server is on fire". Note that a 404 on the review
/// listing endpoint never reaches this type - it means "no reviews yet" and
/// is translated into a successful [`crate::ReviewListing::NoReviews`].
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote API failed with status {status}: {message}")]
    RemoteFailure { status: u16, message: String },

    #[error("network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),
}

/// All the ways a mutation can fail
///
/// Each variant is an observable outcome the caller can surface inline - a
/// form keeps the user's input and shows the message next to it.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("invalid review: {0}")]
    ValidationFailure(String),

    #[error("no review was selected to delete")]
    MissingIdentifier,

    #[error("remote API rejected the request with status {status}: {message}")]
    RemoteFailure { status: u16, message: String },

    #[error("network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),
}

impl From<ApiError> for ReadError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(what) => ReadError::NotFound(what),
            ApiError::RequestFailed { status, body } => ReadError::RemoteFailure {
                status: status.as_u16(),
                message: body,
            },
            ApiError::Network(e) => ReadError::NetworkFailure(e),
        }
    }
}

impl From<ApiError> for WriteError {
    fn from(err: ApiError) -> Self {
        match err {
            // The write endpoints have no "absent means empty" reading; a 404
            // there is the server refusing the request.
            ApiError::NotFound(what) => WriteError::RemoteFailure {
                status: 404,
                message: format!("not found: {}", what),
            },
            ApiError::RequestFailed { status, body } => WriteError::RemoteFailure {
                status: status.as_u16(),
                message: body,
            },
            ApiError::Network(e) => WriteError::NetworkFailure(e),
        }
    }
}
