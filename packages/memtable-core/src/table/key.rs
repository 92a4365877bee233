//! Key derivation shared by primary keys and index keys.
//!
//! Key field values are coerced through their field type, stringified and
//! joined with [`KEY_DELIMITER`] in field order. Joined strings of
//! [`DIGEST_THRESHOLD`] bytes or more are replaced by their SHA-1 hex digest;
//! shorter ones are used verbatim. A short verbatim key can in principle
//! equal some other key's digest text.

use std::collections::HashMap;

use sha1::{Digest, Sha1};

use super::field::Field;
use crate::types::{Record, Value};

/// Separator between stringified key values.
pub const KEY_DELIMITER: char = ',';

/// Joined keys at or above this byte length are stored as a digest.
pub const DIGEST_THRESHOLD: usize = 40;

/// Read access to named values of a row, raw or stored.
pub(crate) trait FieldLookup {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl FieldLookup for Record {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Named access into a stored row tuple.
pub(crate) struct SlotLookup<'a> {
    pub positions: &'a HashMap<String, usize>,
    pub slots: &'a [Value],
}

impl FieldLookup for SlotLookup<'_> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.positions
            .get(name)
            .and_then(|&position| self.slots.get(position))
    }
}

/// Derives the key for `source` over `key_fields`.
///
/// # Returns
/// `None` when `key_fields` is empty.
pub(crate) fn derive_key<L: FieldLookup + ?Sized>(key_fields: &[Field], source: &L) -> Option<String> {
    if key_fields.is_empty() {
        return None;
    }

    let empty = Value::String(String::new());
    let mut joined = String::new();
    for (position, field) in key_fields.iter().enumerate() {
        if position > 0 {
            joined.push(KEY_DELIMITER);
        }
        let raw = source.lookup(field.name()).unwrap_or(&empty);
        joined.push_str(&field.coerce(raw).to_text());
    }

    Some(bound_key(joined))
}

/// Applies the length policy to a joined key string.
pub fn bound_key(joined: String) -> String {
    if joined.len() >= DIGEST_THRESHOLD {
        hex::encode(Sha1::digest(joined.as_bytes()))
    } else {
        joined
    }
}
