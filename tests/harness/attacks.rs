// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Forgery patterns for security testing.

/// How a forged delivery is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forgery {
    /// Signed with the right secret; the control group
    Genuine,
    /// Signed with a guessed secret
    WrongSecret,
    /// Signature of one body replayed on another
    BodySwap,
    /// Right digest without the `sha256=` prefix
    BareDigest,
    /// No signature at all
    Unsigned,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Number of deliveries to attempt
    pub total_requests: usize,
    /// How each delivery is signed
    pub forgery: Forgery,
    /// Secret the attacker signs with for `WrongSecret`
    pub guessed_secret: &'static [u8],
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            forgery: Forgery::Genuine,
            guessed_secret: b"hunter2",
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    pub fn genuine_traffic() -> Self {
        Self::default()
    }

    pub fn secret_guessing() -> Self {
        Self {
            total_requests: 200,
            forgery: Forgery::WrongSecret,
            ..Default::default()
        }
    }

    pub fn body_swap() -> Self {
        Self {
            forgery: Forgery::BodySwap,
            ..Default::default()
        }
    }

    pub fn bare_digest() -> Self {
        Self {
            forgery: Forgery::BareDigest,
            ..Default::default()
        }
    }

    pub fn unsigned() -> Self {
        Self {
            forgery: Forgery::Unsigned,
            ..Default::default()
        }
    }
}
