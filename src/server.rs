// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Router assembly and the listening loop.

use crate::config::Config;
use crate::dispatch::EventDispatcher;
use crate::handlers::{health, metrics, receive_webhook, AppState};
use crate::metrics::WebhookMetrics;
use crate::signature::{SignatureVerifier, WebhookSecret};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build application state with the built-in event routes.
///
/// Fails if the configured routes cannot be mounted together.
pub fn app_state(config: Config, secret: WebhookSecret) -> anyhow::Result<AppState> {
    config.validate()?;

    let metrics = if config.metrics.enabled {
        Some(WebhookMetrics::new()?)
    } else {
        None
    };

    Ok(AppState {
        verifier: SignatureVerifier::new(secret),
        dispatcher: EventDispatcher::default(),
        metrics,
        config,
    })
}

/// Build the router for the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let webhook = Router::new()
        .route(&state.config.webhook.path, post(receive_webhook))
        .layer(DefaultBodyLimit::max(state.config.webhook.max_body_bytes));

    let mut app = Router::new()
        .merge(webhook)
        .route("/health", get(health))
        .route("/healthz", get(health));

    if state.metrics.is_some() {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind to the configured address and serve until the listener fails.
pub async fn serve(config: Config, secret: WebhookSecret) -> anyhow::Result<()> {
    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = Arc::new(app_state(config, secret)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "GitHub webhook handler listening");

    axum::serve(listener, app).await?;

    Ok(())
}
