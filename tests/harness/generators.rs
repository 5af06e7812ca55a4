// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for forgery simulation.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute a `sha256=<hex>` signature the way GitHub does.
pub fn github_signature(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// Generate a pool of realistic webhook bodies.
pub fn generate_bodies(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!(
                r#"{{"ref":"refs/heads/main","repository":{{"name":"repo-{i}","private":false}},"sender":{{"login":"user-{i}"}}}}"#
            ),
            1 => format!(
                r#"{{"action":"opened","number":{i},"pull_request":{{"title":"PR {i}"}},"repository":{{"name":"repo-{i}"}}}}"#
            ),
            2 => format!(r#"{{"action":"labeled","issue":{{"number":{i}}},"repository":{{"name":"repo-{i}"}}}}"#),
            _ => format!(r#"{{"zen":"Half measures are as bad as nothing at all.","hook_id":{i}}}"#),
        })
        .map(String::into_bytes)
        .collect()
}

/// Every single-bit flip of the signature bytes. Flips of the high bit are
/// not valid UTF-8 and could never arrive as a header string.
pub fn bit_flips(signature: &str) -> Vec<Vec<u8>> {
    let bytes = signature.as_bytes();
    let mut flipped = Vec::with_capacity(bytes.len() * 8);
    for idx in 0..bytes.len() {
        for bit in 0..8 {
            let mut mutated = bytes.to_vec();
            mutated[idx] ^= 1 << bit;
            flipped.push(mutated);
        }
    }
    flipped
}

/// Header variants that carry the right digest but not the exact wire form.
pub fn prefix_variants(signature: &str) -> Vec<String> {
    let hex = signature.strip_prefix("sha256=").unwrap_or(signature);
    vec![
        hex.to_string(),
        format!("sha1={hex}"),
        format!("SHA256={hex}"),
        format!("sha256:{hex}"),
        format!(" sha256={hex}"),
        format!("sha256= {hex}"),
        format!("sha256={}", hex.to_uppercase()),
        format!("sha256=sha256={hex}"),
        format!("{signature}\n"),
    ]
}

/// Wrong signature that shares its first `shared` hex characters with
/// `signature` and differs in every character after that.
pub fn with_shared_prefix(signature: &str, shared: usize) -> String {
    let hex = signature.strip_prefix("sha256=").unwrap_or(signature);
    let tail: String = hex
        .chars()
        .skip(shared)
        .map(|c| if c == '0' { '1' } else { '0' })
        .collect();
    format!("sha256={}{}", &hex[..shared], tail)
}
