// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event routing for verified webhook deliveries.
//!
//! The routing table maps `X-GitHub-Event` tags to handler functions. Tags
//! without a handler go to the fallback, which only logs. The event-type set
//! is open: new tags never fail dispatch.
//!
//! Dispatch is stateless. It decodes, routes and returns; callers must have
//! verified the signature first.

use crate::envelope::EventEnvelope;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Handler for one event type. Receives the event tag and decoded envelope
/// and returns the record it logged.
pub type EventHandler = fn(&str, &EventEnvelope) -> EventRecord;

/// Dispatch error types.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Structured record a handler emits for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Name of the handler that processed the event
    pub handler: &'static str,
    /// Event tag from the `X-GitHub-Event` header
    pub event_type: String,
    pub action: Option<String>,
    pub repository: Option<String>,
    pub sender: Option<String>,
}

impl EventRecord {
    /// Record for `envelope` attributed to `handler`.
    pub fn new(handler: &'static str, event_type: &str, envelope: &EventEnvelope) -> Self {
        Self {
            handler,
            event_type: event_type.to_string(),
            action: envelope.action.clone(),
            repository: envelope.repository_name().map(str::to_string),
            sender: envelope.sender_login().map(str::to_string),
        }
    }
}

/// Result of dispatching one delivery.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The event was routed and handled
    Processed(EventRecord),
    /// The body could not be decoded; nothing was routed
    Malformed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, DispatchOutcome::Processed(_))
    }

    pub fn record(&self) -> Option<&EventRecord> {
        match self {
            DispatchOutcome::Processed(r) => Some(r),
            DispatchOutcome::Malformed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            DispatchOutcome::Processed(_) => None,
            DispatchOutcome::Malformed(e) => Some(e),
        }
    }
}

/// Routes decoded envelopes to handlers by event tag.
pub struct EventDispatcher {
    handlers: HashMap<String, EventHandler>,
    fallback: EventHandler,
}

impl EventDispatcher {
    /// Create a dispatcher with no routes; every event goes to the fallback.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: handle_unhandled,
        }
    }

    /// Add or replace the handler for an event tag.
    pub fn register(&mut self, event_type: impl Into<String>, handler: EventHandler) -> &mut Self {
        self.handlers.insert(event_type.into(), handler);
        self
    }

    /// Whether `event_type` has a dedicated handler.
    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Decode `body` and hand it to the handler for `event_type`.
    pub fn dispatch(&self, event_type: &str, body: &[u8]) -> DispatchOutcome {
        let envelope = match EventEnvelope::from_slice(body) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(event = %event_type, error = %err, "Failed to parse JSON payload");
                return DispatchOutcome::Malformed(err.into());
            }
        };

        info!(event = %event_type, "Received GitHub webhook event");

        let handler = self
            .handlers
            .get(event_type)
            .copied()
            .unwrap_or(self.fallback);

        DispatchOutcome::Processed(handler(event_type, &envelope))
    }
}

impl Default for EventDispatcher {
    /// Dispatcher with the built-in `push`, `pull_request` and `issues` routes.
    fn default() -> Self {
        let mut dispatcher = Self::new();
        dispatcher
            .register("push", handle_push)
            .register("pull_request", handle_pull_request)
            .register("issues", handle_issues);
        dispatcher
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        routes.sort_unstable();
        f.debug_struct("EventDispatcher").field("routes", &routes).finish()
    }
}

pub fn handle_push(event_type: &str, envelope: &EventEnvelope) -> EventRecord {
    let record = EventRecord::new("push", event_type, envelope);
    info!(
        repository = record.repository.as_deref(),
        sender = record.sender.as_deref(),
        "Processing push event"
    );
    record
}

pub fn handle_pull_request(event_type: &str, envelope: &EventEnvelope) -> EventRecord {
    let record = EventRecord::new("pull_request", event_type, envelope);
    info!(
        action = record.action.as_deref(),
        repository = record.repository.as_deref(),
        sender = record.sender.as_deref(),
        "Processing pull request event"
    );
    record
}

pub fn handle_issues(event_type: &str, envelope: &EventEnvelope) -> EventRecord {
    let record = EventRecord::new("issues", event_type, envelope);
    info!(
        action = record.action.as_deref(),
        repository = record.repository.as_deref(),
        sender = record.sender.as_deref(),
        "Processing issues event"
    );
    record
}

/// Fallback for tags without a route. Not an error.
pub fn handle_unhandled(event_type: &str, envelope: &EventEnvelope) -> EventRecord {
    let record = EventRecord::new("unhandled", event_type, envelope);
    info!(
        event = %event_type,
        action = record.action.as_deref(),
        repository = record.repository.as_deref(),
        "Unhandled event type"
    );
    record
}
