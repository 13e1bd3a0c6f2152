//! Property tests for the canonical string and signatures.

mod common;

use proptest::prelude::*;
use xpay_lib::canonical::{to_canonical_string, FieldMap, SIGN_FIELD};
use xpay_lib::signing;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,10}".prop_filter("sign is reserved", |k| k != SIGN_FIELD)
}

fn field_map() -> impl Strategy<Value = FieldMap> {
    proptest::collection::btree_map(field_name(), "[ -~]{0,16}", 0..8)
}

proptest! {
    #[test]
    fn canonical_ignores_input_order(fields in field_map()) {
        let forward: Vec<_> = fields.iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        prop_assert_eq!(
            to_canonical_string(forward.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            to_canonical_string(backward.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        );
    }

    #[test]
    fn blank_fields_are_invisible(
        fields in field_map(),
        extra in field_name(),
        blank in "[ \t]{0,4}",
    ) {
        prop_assume!(!fields.contains_key(&extra));
        let mut with_blank = fields.clone();
        with_blank.insert(extra, blank);

        prop_assert_eq!(to_canonical_string(&fields), to_canonical_string(&with_blank));
    }

    #[test]
    fn sign_field_is_invisible(fields in field_map(), sig in "[A-Za-z0-9+/=]{0,32}") {
        let mut with_sign = fields.clone();
        with_sign.insert(SIGN_FIELD.to_string(), sig);

        prop_assert_eq!(to_canonical_string(&fields), to_canonical_string(&with_sign));
    }

    #[test]
    fn canonical_never_has_edge_separators(fields in field_map()) {
        let s = to_canonical_string(&fields);
        prop_assert!(!s.starts_with('&'));
        prop_assert!(!s.ends_with('&'));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_verify_round_trip(fields in field_map()) {
        let sig = signing::sign(&fields, &common::app_private_key()).unwrap();
        prop_assert!(signing::verify(&fields, &common::app_public_key(), &sig));
        prop_assert!(!signing::verify(&fields, &common::gateway_public_key(), &sig));
    }

    #[test]
    fn tampering_breaks_signature(
        fields in field_map(),
        target in field_name(),
        value in "[a-z0-9]{1,8}",
    ) {
        let original = fields.get(&target).map(|v| v.trim().to_string()).unwrap_or_default();
        prop_assume!(original != value);

        let sig = signing::sign(&fields, &common::app_private_key()).unwrap();
        let mut tampered = fields.clone();
        tampered.insert(target, value);

        prop_assert!(!signing::verify(&tampered, &common::app_public_key(), &sig));
    }
}
