//! Request-level errors and their HTTP status codes.

use crate::{store::StoreError, write::update_item::EmptyUpdate};

use axum::http::StatusCode;

/// Everything that can end a request with an error envelope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path matches no resource.
    #[error("route not found")]
    RouteNotFound,
    /// The resource exists but does not accept the method.
    #[error("method not supported for /{0}")]
    MethodNotAllowed(&'static str),
    /// No record with the requested key.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// An operation that needs an id in the path got none.
    #[error("missing id in URL")]
    MissingId,
    /// The id segment of the path is not valid percent-encoded UTF-8.
    #[error("invalid id in URL: {0}")]
    InvalidId(#[from] std::string::FromUtf8Error),
    /// The body is not valid JSON for the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    /// The body lacks its string primary key.
    #[error("missing {0} in body")]
    MissingKey(&'static str),
    /// The id in the path differs from the key in the body.
    #[error("{field} in URL ({path}) does not match body ({body})")]
    KeyMismatch {
        /// Key attribute name.
        field: &'static str,
        /// Id taken from the path.
        path: String,
        /// Key taken from the body.
        body: String,
    },
    /// A partial update named no field besides the key.
    #[error(transparent)]
    EmptyUpdate(#[from] EmptyUpdate),
    /// The store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingId
            | Self::InvalidId(_)
            | Self::InvalidBody(_)
            | Self::MissingKey(_)
            | Self::KeyMismatch { .. }
            | Self::EmptyUpdate(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
