// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the GitHub webhook handler.
//!
//! Everything except the webhook secret has a default. The secret is loaded
//! separately so that it never ends up in a serialized `Config`.

use crate::signature::WebhookSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the shared webhook secret.
pub const SECRET_ENV: &str = "GITHUB_WEBHOOK_SECRET";

const DEFAULT_PORT: u16 = 8080;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_WEBHOOK_SECRET environment variable is required")]
    MissingSecret,

    #[error("{field} must start with '/', got {path:?}")]
    InvalidPath { field: &'static str, path: String },

    #[error("{field} {path:?} collides with another route")]
    PathConflict { field: &'static str, path: String },
}

/// Routes the service always serves.
const RESERVED_PATHS: &[&str] = &["/health", "/healthz"];

/// Configuration for the webhook handler service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Webhook endpoint configuration
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Webhook endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Route the platform delivers to (default: /webhook). Must start with
    /// `/` and not collide with the health or metrics routes.
    #[serde(default = "default_webhook_path")]
    pub path: String,

    /// Largest accepted request body (default: 25 MiB, GitHub's payload cap)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics). Same rules as the webhook path.
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    format!("0.0.0.0:{DEFAULT_PORT}")
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            webhook: WebhookConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_webhook_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an environment lookup.
    ///
    /// - `BIND_ADDR`: full bind address, takes precedence over `PORT`
    /// - `PORT`: listening port on all interfaces (default: 8080)
    /// - `MAX_BODY_BYTES`: request body limit
    /// - `METRICS_ENABLED`: `true`/`false`
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
            format!("0.0.0.0:{port}")
        });

        Self {
            bind_addr,
            webhook: WebhookConfig {
                max_body_bytes: lookup("MAX_BODY_BYTES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_max_body_bytes),
                ..Default::default()
            },
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(true),
                ..Default::default()
            },
        }
    }
}

impl Config {
    /// Check that the configured routes can be mounted together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut routes = vec![("webhook.path", self.webhook.path.as_str())];
        if self.metrics.enabled {
            routes.push(("metrics.path", self.metrics.path.as_str()));
        }

        for (i, &(field, path)) in routes.iter().enumerate() {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    field,
                    path: path.to_string(),
                });
            }

            let taken = RESERVED_PATHS.iter().any(|&reserved| reserved == path)
                || routes[..i].iter().any(|&(_, earlier)| earlier == path);
            if taken {
                return Err(ConfigError::PathConflict {
                    field,
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Read the webhook secret from an environment lookup.
///
/// An unset or empty secret is rejected; running without one would accept
/// forged deliveries.
pub fn load_secret<F>(lookup: F) -> Result<WebhookSecret, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(SECRET_ENV) {
        Some(secret) if !secret.is_empty() => Ok(WebhookSecret::from(secret)),
        _ => Err(ConfigError::MissingSecret),
    }
}
