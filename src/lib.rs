// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! GitHub Webhook Handler
//!
//! This crate receives GitHub webhook deliveries, authenticates them and
//! routes them by event type:
//!
//! - HMAC-SHA256 signature verification over the raw body (`X-Hub-Signature-256`)
//! - Constant-time signature comparison
//! - Event envelope decoding with open-ended `repository`/`sender` objects
//! - Event routing by `X-GitHub-Event` tag with a logging fallback

pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server;
pub mod signature;

pub use config::Config;
pub use dispatch::{DispatchOutcome, EventDispatcher, EventRecord};
pub use envelope::EventEnvelope;
pub use error::WebhookError;
pub use signature::{SignatureVerifier, VerificationResult, WebhookSecret};
