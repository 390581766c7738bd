//! Errors at the HTTP edge.

use super::MessageResponse;
use crate::libs::messages::Message;
use crate::libs::tagged::TaggedError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", Message::OnlyPostAllowed)]
    MethodNotAllowed,
    #[error("{0}")]
    InvalidBody(String),
    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),
    #[error("failed to encode response: {0}")]
    Encoding(#[from] TaggedError),
    #[error("store worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn invalid_body(reason: impl Into<String>) -> Self {
        ApiError::InvalidBody(Message::InvalidRequestBody(reason.into()).to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Encoding(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            // Internal details go to the log, not to the client.
            tracing::error!(error = %self, "request failed");
            Message::InternalError.to_string()
        } else {
            tracing::debug!(error = %self, "request rejected");
            self.to_string()
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
