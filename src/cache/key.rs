//! Cache Key Derivation
//!
//! Turns a (query text, parameter list) pair into a stable cache key.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::CacheError;

// == Derive Key ==
/// Derives a stable cache key from a query text and its parameters.
///
/// Whitespace runs in the query text are collapsed and the text is lowercased,
/// so cosmetically different but equivalent query strings map to the same key.
/// The normalized text is kept as a readable prefix so that prefix patterns
/// like `^city` match keys during invalidation scans; a SHA-256 digest of the
/// canonical `{query, params}` serialization is appended so distinct
/// parameters always produce distinct keys.
///
/// Pure function: same inputs always produce the same key.
pub fn derive_key(query_text: &str, params: &[Value]) -> Result<String, CacheError> {
    let normalized = normalize_query(query_text);

    let payload = serde_json::to_string(&json!({
        "query": normalized,
        "params": params,
    }))
    .map_err(CacheError::KeyDerivation)?;

    let digest = Sha256::digest(payload.as_bytes());
    Ok(format!("{}::{}", normalized, hex::encode(digest)))
}

// == Normalize Query ==
/// Collapses whitespace runs to single spaces, trims the ends, and lowercases.
pub fn normalize_query(query_text: &str) -> String {
    query_text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
