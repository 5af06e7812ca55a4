// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! The subset of a GitHub webhook payload the handlers read.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Event envelope common to the GitHub events we route.
///
/// `repository` and `sender` are kept as open JSON objects; only a few
/// string sub-fields are ever read and the rest may take any shape.
/// Unknown top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventEnvelope {
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub repository: Option<Map<String, Value>>,

    #[serde(default)]
    pub sender: Option<Map<String, Value>>,
}

impl EventEnvelope {
    /// Decode an envelope from the raw request body.
    ///
    /// A JSON `null` body decodes to an empty envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// `repository.name`, when present and a string.
    pub fn repository_name(&self) -> Option<&str> {
        string_field(self.repository.as_ref(), "name")
    }

    /// `sender.login`, when present and a string.
    pub fn sender_login(&self) -> Option<&str> {
        string_field(self.sender.as_ref(), "login")
    }
}

fn string_field<'a>(object: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    object?.get(key)?.as_str()
}
