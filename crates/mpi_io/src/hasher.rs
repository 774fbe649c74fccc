//! crates/mpi_io/src/hasher.rs
//!
//! SHA-256 digests over canonical JSON. Canonicalization recursively sorts
//! object keys, then serializes compactly; keep the same algorithm everywhere
//! a digest lands in an artifact so runs stay comparable across builds.

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as Json};
use sha2::{Digest, Sha256};

use crate::{IoError, IoResult};

/// Recursively sort object keys (arrays keep their order).
fn canonicalize(v: &Json) -> Json {
    match v {
        Json::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = JsonMap::new();
            for k in keys {
                out.insert(k.clone(), canonicalize(&map[k]));
            }
            Json::Object(out)
        }
        Json::Array(items) => Json::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Lowercase-hex SHA-256 of the canonical serialization of `value`.
pub fn sha256_hex_canonical(value: &Json) -> IoResult<String> {
    let canon = canonicalize(value);
    let bytes = serde_json::to_vec(&canon)
        .map_err(|e| IoError::Hash(format!("canonical serialize: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Digest any serializable value via its canonical JSON form.
pub fn digest_json<T: Serialize>(value: &T) -> IoResult<String> {
    let json = serde_json::to_value(value)
        .map_err(|e| IoError::Hash(format!("to_value: {e}")))?;
    sha256_hex_canonical(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_the_digest() {
        let a = json!({"b": 1, "a": {"y": 2, "x": 3}});
        let b = json!({"a": {"x": 3, "y": 2}, "b": 1});
        assert_eq!(
            sha256_hex_canonical(&a).unwrap(),
            sha256_hex_canonical(&b).unwrap()
        );
    }

    #[test]
    fn array_order_does_change_the_digest() {
        let a = json!([1, 2, 3]);
        let b = json!([3, 2, 1]);
        assert_ne!(
            sha256_hex_canonical(&a).unwrap(),
            sha256_hex_canonical(&b).unwrap()
        );
    }

    #[test]
    fn digest_is_lowercase_hex_64() {
        let d = digest_json(&json!({"k": "v"})).unwrap();
        assert_eq!(d.len(), 64);
        assert!(d.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }
}
