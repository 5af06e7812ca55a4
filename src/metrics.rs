// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for webhook traffic.
//!
//! Owned by the HTTP layer. The dispatcher itself keeps no counters.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Webhook request and event counters with their own registry.
#[derive(Clone)]
pub struct WebhookMetrics {
    registry: Registry,
    requests: IntCounterVec,
    events: IntCounterVec,
}

impl WebhookMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(
                "github_webhook_requests_total",
                "Webhook deliveries by request outcome",
            ),
            &["outcome"],
        )?;
        let events = IntCounterVec::new(
            Opts::new(
                "github_webhook_events_total",
                "Processed webhook events by handler",
            ),
            &["handler"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(events.clone()))?;

        Ok(Self {
            registry,
            requests,
            events,
        })
    }

    /// Count one request with the given outcome label.
    pub fn record_request(&self, outcome: &str) {
        self.requests.with_label_values(&[outcome]).inc();
    }

    /// Count one processed event for `handler`.
    pub fn record_event(&self, handler: &str) {
        self.events.with_label_values(&[handler]).inc();
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for WebhookMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookMetrics").finish_non_exhaustive()
    }
}
