//! Structured configuration keys and canonical hashing.
//!
//! Every stateful simulation component describes its construction-time
//! configuration as an [`IdentityKey`]: an ordered record of named values
//! that fully determines the component's output for any simulation id. The
//! contract external caches rely on: two components are interchangeable in
//! their outputs for every id if and only if their keys are equal.
//!
//! Keys stay small: arrays are represented by a content digest, and nested
//! components embed their own keys verbatim rather than re-hashed, so a
//! comparison can report *which* nested parameter changed.
//!
//! The digest is computed as:
//!
//! ```text
//! digest = hex(BLAKE3(canonical_json(key)))
//! ```
//!
//! where `canonical_json` renders with lexicographically sorted object keys,
//! no whitespace, and minimal string escaping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single configuration value inside an [`IdentityKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IdentityValue {
    /// Fixed provenance tag (distinguishes e.g. lensed from unlensed inputs).
    Tag(String),
    /// Integer parameter.
    Int(i64),
    /// Real parameter. Carried at f32 precision: identity should not churn
    /// on sub-single-precision drift in configured levels.
    Float(f32),
    /// Opaque configuration string (path templates, locations).
    Text(String),
    /// Content digest standing in for an array (64-char lowercase hex).
    Digest(String),
    /// A nested component's key, embedded verbatim.
    Nested(IdentityKey),
}

/// Ordered, hashable description of a component's configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey {
    entries: BTreeMap<String, IdentityValue>,
}

impl IdentityKey {
    /// Creates an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a named value, replacing any previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: IdentityValue) -> &mut Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: IdentityValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&IdentityValue> {
        self.entries.get(name)
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IdentityValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the key has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the key as a JSON value (tagged enum representation, so a
    /// `Tag` and a `Text` holding the same string stay distinct).
    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of this type cannot fail: keys are strings and
        // values contain no non-finite floats by the time they matter.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Computes the canonical BLAKE3 digest of this key as a 64-character
    /// lowercase hex string.
    pub fn digest(&self) -> String {
        let canonical = canonical_json(&self.to_value());
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Contract implemented by every stateful simulation component: a pure
/// function from current configuration (never per-call arguments) to an
/// [`IdentityKey`].
pub trait IdentityKeyProvider {
    /// The key fully determining this component's output given an id.
    fn identity_key(&self) -> IdentityKey;
}

impl<T: IdentityKeyProvider + ?Sized> IdentityKeyProvider for &T {
    fn identity_key(&self) -> IdentityKey {
        (**self).identity_key()
    }
}

impl<T: IdentityKeyProvider + ?Sized> IdentityKeyProvider for std::sync::Arc<T> {
    fn identity_key(&self) -> IdentityKey {
        (**self).identity_key()
    }
}

/// Renders a JSON value canonically: object keys sorted lexicographically,
/// no whitespace, minimal string escaping, integers without fraction.
pub fn canonical_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => canonical_number(n),
        serde_json::Value::String(s) => canonical_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let pairs: Vec<String> = keys
                .iter()
                .map(|k| format!("{}:{}", canonical_string(k), canonical_json(&obj[*k])))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            // Shortest round-trip rendering; integral floats keep a marker
            // so they cannot collide with the integer rendering.
            if f == f.trunc() && f.abs() < 1e15 {
                format!("{:.1}", f)
            } else {
                format!("{}", f)
            }
        }
        _ => "null".to_string(),
    }
}

fn canonical_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_key() -> IdentityKey {
        IdentityKey::new()
            .with("nlev_t", IdentityValue::Float(35.0))
            .with("transf", IdentityValue::Digest("ab".repeat(32)))
            .with(
                "pix_phas",
                IdentityValue::Nested(
                    IdentityKey::new()
                        .with("seed", IdentityValue::Int(42))
                        .with("nside", IdentityValue::Int(2048)),
                ),
            )
    }

    #[test]
    fn test_equal_keys_have_equal_digests() {
        assert_eq!(sample_key(), sample_key());
        assert_eq!(sample_key().digest(), sample_key().digest());
    }

    #[test]
    fn test_digest_is_sensitive_to_every_entry() {
        let base = sample_key();
        let changed_float = sample_key().with("nlev_t", IdentityValue::Float(35.5));
        let changed_digest = sample_key().with("transf", IdentityValue::Digest("cd".repeat(32)));
        let changed_nested = sample_key().with(
            "pix_phas",
            IdentityValue::Nested(
                IdentityKey::new()
                    .with("seed", IdentityValue::Int(43))
                    .with("nside", IdentityValue::Int(2048)),
            ),
        );
        for other in [changed_float, changed_digest, changed_nested] {
            assert_ne!(base, other);
            assert_ne!(base.digest(), other.digest());
        }
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let a = IdentityKey::new()
            .with("x", IdentityValue::Int(1))
            .with("y", IdentityValue::Int(2));
        let b = IdentityKey::new()
            .with("y", IdentityValue::Int(2))
            .with("x", IdentityValue::Int(1));
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_tag_and_text_do_not_collide() {
        let a = IdentityKey::new().with("k", IdentityValue::Tag("same".into()));
        let b = IdentityKey::new().with("k", IdentityValue::Text("same".into()));
        assert_ne!(a, b);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_nested_key_is_inspectable() {
        let key = sample_key();
        match key.get("pix_phas") {
            Some(IdentityValue::Nested(inner)) => {
                assert_eq!(inner.get("seed"), Some(&IdentityValue::Int(42)));
            }
            other => panic!("expected nested key, got {:?}", other),
        }
    }

    #[test]
    fn test_canonical_json_sorts_keys_and_strips_whitespace() {
        let value = serde_json::json!({"b": 1, "a": {"d": true, "c": "x"}});
        assert_eq!(canonical_json(&value), r#"{"a":{"c":"x","d":true},"b":1}"#);
    }

    #[test]
    fn test_canonical_number_rendering() {
        let v = serde_json::json!([1, 1.0, 35.5, -2]);
        assert_eq!(canonical_json(&v), "[1,1.0,35.5,-2]");
    }

    #[test]
    fn test_serde_round_trip() {
        let key = sample_key();
        let json = serde_json::to_string(&key).unwrap();
        let back: IdentityKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
