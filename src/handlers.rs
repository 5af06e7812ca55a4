// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the GitHub webhook service.

use crate::config::Config;
use crate::dispatch::{DispatchOutcome, EventDispatcher};
use crate::error::WebhookError;
use crate::metrics::WebhookMetrics;
use crate::signature::{SignatureVerifier, VerificationResult};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Shared application state.
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub dispatcher: EventDispatcher,
    pub metrics: Option<WebhookMetrics>,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "github-webhook-handler",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    let Some(metrics) = &state.metrics else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match metrics.render() {
        Ok(text) => (
            [("Content-Type", "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Receive a GitHub webhook delivery.
///
/// The signature is checked against the untouched body bytes before
/// anything else looks at them.
#[instrument(
    name = "github.webhook",
    skip_all,
    fields(
        event = tracing::field::Empty,
        delivery = tracing::field::Empty,
        repository = tracing::field::Empty,
    )
)]
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let result = process(&state, &headers, &body);

    if let Some(metrics) = &state.metrics {
        match &result {
            Ok(handler) => {
                metrics.record_request("accepted");
                metrics.record_event(handler);
            }
            Err(err) => metrics.record_request(err.outcome()),
        }
    }

    result.map(|_| (StatusCode::OK, "Webhook received successfully"))
}

/// Verify and dispatch one delivery. Returns the name of the handler that
/// processed it.
fn process(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<&'static str, WebhookError> {
    let span = tracing::Span::current();

    if let Some(delivery) = header_str(headers, DELIVERY_HEADER) {
        span.record("delivery", delivery);
    }

    let signature = header_str(headers, SIGNATURE_HEADER);
    if signature.is_none() {
        warn!("Missing X-Hub-Signature-256 header");
        return Err(WebhookError::MissingSignature);
    }

    if let VerificationResult::Rejected(reason) = state.verifier.verify(body, signature) {
        warn!(reason = %reason, "Invalid GitHub webhook signature");
        return Err(WebhookError::InvalidSignature(reason));
    }
    debug!("Signature verified");

    let Some(event) = header_str(headers, EVENT_HEADER) else {
        warn!("Missing X-GitHub-Event header");
        return Err(WebhookError::MissingEventType);
    };
    span.record("event", event);

    match state.dispatcher.dispatch(event, body) {
        DispatchOutcome::Processed(record) => {
            if let Some(repository) = record.repository.as_deref() {
                span.record("repository", repository);
            }
            info!(handler = record.handler, "Webhook processed");
            Ok(record.handler)
        }
        DispatchOutcome::Malformed(err) => Err(WebhookError::MalformedPayload(err.to_string())),
    }
}

/// Non-empty UTF-8 header value.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
