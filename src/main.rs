// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! GitHub Webhook Handler Service
//!
//! Receives GitHub webhook deliveries on `POST /webhook`, verifies their
//! `X-Hub-Signature-256` HMAC and routes them by `X-GitHub-Event`.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `GITHUB_WEBHOOK_SECRET`: shared webhook secret (required)
//! - `PORT`: listening port (default: 8080)
//! - `BIND_ADDR`: full bind address, overrides `PORT`
//! - `MAX_BODY_BYTES`: request body limit (default: 25 MiB)
//! - `METRICS_ENABLED`: expose `/metrics` (default: true)
//! - `RUST_LOG`: log filter (default: info)

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github_webhook_handler::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = config::Config::from_env();
    let secret = config::load_secret(|key| std::env::var(key).ok()).map_err(|e| {
        error!(error = %e, "Refusing to start without a webhook secret");
        e
    })?;

    info!(
        bind_addr = %config.bind_addr,
        webhook_path = %config.webhook.path,
        max_body_bytes = config.webhook.max_body_bytes,
        metrics_enabled = config.metrics.enabled,
        "Starting GitHub webhook handler"
    );

    server::serve(config, secret).await
}
