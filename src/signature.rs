// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Webhook signature verification.
//!
//! GitHub signs every delivery with `X-Hub-Signature-256: sha256=<hex>`, the
//! HMAC-SHA256 of the raw request body keyed by the shared webhook secret.
//! The header is compared against the locally computed value in constant
//! time, over the full `sha256=<hex>` string.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Prefix every GitHub SHA-256 signature header carries.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Shared secret configured on the GitHub webhook.
///
/// Immutable once loaded. `Debug` never prints the bytes.
#[derive(Clone)]
pub struct WebhookSecret(Box<[u8]>);

impl WebhookSecret {
    /// Raw secret bytes, used as the HMAC key.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes().into_boxed_slice())
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self(secret.as_bytes().into())
    }
}

impl From<Vec<u8>> for WebhookSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self(secret.into_boxed_slice())
    }
}

/// Why a signature was rejected.
///
/// Only used for local logs. Callers answering the sender must not reveal
/// which of these happened.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature header missing")]
    Missing,

    #[error("signature header lacks the sha256= prefix")]
    Malformed,

    #[error("signature does not match payload")]
    Mismatch,
}

/// Result of signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    /// Body was signed with the configured secret
    Verified,
    /// Body must be rejected
    Rejected(SignatureError),
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Verified)
    }

    pub fn error(&self) -> Option<SignatureError> {
        match self {
            VerificationResult::Verified => None,
            VerificationResult::Rejected(e) => Some(*e),
        }
    }
}

/// Verifies HMAC-SHA256 webhook signatures against a fixed secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: WebhookSecret,
}

impl SignatureVerifier {
    /// Create a verifier that owns the given secret.
    pub fn new(secret: WebhookSecret) -> Self {
        Self { secret }
    }

    /// Compute the `sha256=<hex>` header value GitHub would send for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose())
            .expect("HMAC can take key of any size");
        mac.update(body);
        format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a raw body against the signature header, if one was supplied.
    pub fn verify(&self, body: &[u8], signature_header: Option<&str>) -> VerificationResult {
        let signature = match signature_header {
            Some(s) if !s.is_empty() => s,
            _ => return VerificationResult::Rejected(SignatureError::Missing),
        };

        if !signature.starts_with(SIGNATURE_PREFIX) {
            debug!("Signature header has no sha256= prefix");
            return VerificationResult::Rejected(SignatureError::Malformed);
        }

        let expected = self.sign(body);

        // Length is not secret; content comparison does not short-circuit.
        if bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
            VerificationResult::Verified
        } else {
            VerificationResult::Rejected(SignatureError::Mismatch)
        }
    }

    /// `true` iff `signature_header` is the valid signature of `body`.
    ///
    /// Any malformed header or wrong secret simply yields `false`.
    pub fn validate(&self, body: &[u8], signature_header: &str) -> bool {
        self.verify(body, Some(signature_header)).is_valid()
    }
}
