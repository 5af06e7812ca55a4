// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request-level errors and their HTTP mapping.

use crate::signature::SignatureError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors that end a webhook request.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing signature header")]
    MissingSignature,

    #[error("invalid signature: {0}")]
    InvalidSignature(SignatureError),

    #[error("missing event type header")]
    MissingEventType,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl WebhookError {
    /// HTTP status for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            Self::MissingEventType | Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Label used for the request outcome metric.
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::MissingSignature => "missing_signature",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::MissingEventType => "missing_event",
            Self::MalformedPayload(_) => "malformed_payload",
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Bodies are fixed strings: no secret, computed tag or decoder
        // detail reaches the sender, and malformed vs mismatched signatures
        // look identical.
        let body = match &self {
            Self::MissingSignature => "Missing signature header",
            Self::InvalidSignature(_) => "Invalid signature",
            Self::MissingEventType => "Missing event type header",
            Self::MalformedPayload(_) => "Invalid JSON payload",
        };

        (self.status_code(), body).into_response()
    }
}
