//! Web error types for the retrace web server.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::replay::{ReplayError, Token};
use crate::web::render;

/// Error type for JSON API operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The client sent a token the store never issued.
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// The payload did not answer the pending prompt.
    #[error("Invalid input for `{field}`: {message}")]
    MalformedPayload {
        token: Token,
        field: String,
        message: String,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<Token>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_message, details, token) = match &self {
            WebError::UnknownToken(token) => {
                tracing::warn!(%token, "Rejected unknown token");
                (
                    StatusCode::PRECONDITION_FAILED,
                    "Unknown Token",
                    Some(format!("History {token} has not yet been written")),
                    None,
                )
            }
            WebError::MalformedPayload {
                token,
                field,
                message,
            } => {
                tracing::warn!(%token, %field, %message, "Rejected payload");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Malformed Payload",
                    Some(format!("{field}: {message}")),
                    Some(*token),
                )
            }
            WebError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
            token,
        });

        (status, body).into_response()
    }
}

impl From<ReplayError> for WebError {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::UnknownToken(token) => WebError::UnknownToken(token),
            ReplayError::MalformedPayload {
                token,
                prompt,
                source,
            } => WebError::MalformedPayload {
                token,
                field: prompt.field,
                message: source.to_string(),
            },
            other => WebError::Internal(other.to_string()),
        }
    }
}

/// Error type for the HTML form front end. Client errors render a page
/// rather than a JSON body.
#[derive(Debug)]
pub struct PageError(pub ReplayError);

impl From<ReplayError> for PageError {
    fn from(err: ReplayError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0 {
            ReplayError::UnknownToken(token) => {
                tracing::warn!(%token, "Rejected unknown token");
                (
                    StatusCode::PRECONDITION_FAILED,
                    Html(render::page("That history has not yet been written.")),
                )
                    .into_response()
            }
            ReplayError::MalformedPayload {
                token,
                prompt,
                source,
            } => {
                tracing::warn!(%token, field = %prompt.field, error = %source, "Rejected payload");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Html(render::render_retry(token, &prompt, &source.to_string())),
                )
                    .into_response()
            }
            other => WebError::from(other).into_response(),
        }
    }
}
