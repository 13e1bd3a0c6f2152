//! Canonical signable string.
//!
//! The gateway signs a `key=value&key=value` rendering of an envelope's
//! fields. Field names are sorted by byte value, the `sign` field is left
//! out and fields whose trimmed value is empty are skipped entirely, so an
//! empty field behaves as if it were absent.

use std::collections::BTreeMap;

/// Name of the field carrying the signature. Never part of the signed bytes.
pub const SIGN_FIELD: &str = "sign";

/// Field-name → value projection of a signable record.
///
/// `BTreeMap` keeps names in byte order, which is the order the canonical
/// string requires.
pub type FieldMap = BTreeMap<String, String>;

/// An entity that can be signed: it projects itself onto string fields.
///
/// Numeric fields must be rendered as decimal text.
pub trait SignableRecord {
    /// All wire fields of the record, `sign` included.
    fn signable_fields(&self) -> FieldMap;

    /// The base64 signature the record carries (empty when unsigned).
    fn signature(&self) -> &str;
}

impl SignableRecord for FieldMap {
    fn signable_fields(&self) -> FieldMap {
        self.clone()
    }

    fn signature(&self) -> &str {
        self.get(SIGN_FIELD).map(String::as_str).unwrap_or_default()
    }
}

/// Builds the canonical string from `(name, value)` pairs.
///
/// Insertion order does not matter. When a name repeats, the last value wins.
/// Emitted values are trimmed, and `&` is trimmed from both ends of the
/// result.
///
/// # Example
///
/// ```
/// use xpay_lib::canonical::to_canonical_string;
///
/// let s = to_canonical_string([("b", "x"), ("a", ""), ("sign", "abc")]);
/// assert_eq!(s, "b=x");
/// ```
pub fn to_canonical_string<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<String, String> = fields
        .into_iter()
        .filter(|(k, _)| k.as_ref() != SIGN_FIELD)
        .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
        .collect();

    let mut out = String::new();
    for (key, value) in &sorted {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('&');
    }

    out.trim_matches('&').to_owned()
}

/// Canonical string of a [`SignableRecord`].
pub fn canonical_string_of<R: SignableRecord + ?Sized>(record: &R) -> String {
    to_canonical_string(record.signable_fields())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_key() {
        let s = to_canonical_string([("timestamp", "1"), ("code", "0000"), ("msg", "ok")]);
        assert_eq!(s, "code=0000&msg=ok&timestamp=1");
    }

    #[test]
    fn test_empty_and_whitespace_values_excluded() {
        assert_eq!(to_canonical_string([("a", ""), ("b", "x")]), "b=x");
        assert_eq!(to_canonical_string([("a", "   "), ("b", "x")]), "b=x");
        assert_eq!(to_canonical_string([("a", "\t\n")]), "");
    }

    #[test]
    fn test_values_trimmed() {
        assert_eq!(to_canonical_string([("a", "  1 "), ("b", "2")]), "a=1&b=2");
    }

    #[test]
    fn test_sign_field_dropped() {
        let s = to_canonical_string([("sign", "c2lnbg=="), ("a", "1")]);
        assert_eq!(s, "a=1");
        assert!(!s.contains("sign"));
    }

    #[test]
    fn test_byte_order_sorting() {
        // Uppercase sorts before lowercase in byte order
        let s = to_canonical_string([("b", "1"), ("B", "2"), ("_a", "3")]);
        assert_eq!(s, "B=2&_a=3&b=1");
    }

    #[test]
    fn test_deterministic() {
        let mut map = FieldMap::new();
        map.insert("content".into(), "{\"k\":1}".into());
        map.insert("platform_code".into(), "P1".into());
        assert_eq!(canonical_string_of(&map), canonical_string_of(&map));
    }

    #[test]
    fn test_field_map_signature() {
        let mut map = FieldMap::new();
        assert_eq!(map.signature(), "");
        map.insert(SIGN_FIELD.into(), "abc".into());
        assert_eq!(map.signature(), "abc");
    }

    #[test]
    fn test_empty_input() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(to_canonical_string(empty), "");
    }
}
