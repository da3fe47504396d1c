/// Property-based tests for the value model, the comparator and the union codec.
///
/// Strategies generate:
/// - Arbitrary JSON trees (finite numbers only, up to 3 levels deep)
/// - Contact methods and patch operations with arbitrary strings
///
/// Properties:
/// - `parse(to_json(v)) == v`
/// - `satisfies` is reflexive and tolerates extra actual keys
/// - typed unions survive encode -> decode and always carry a non-empty tag
use payroc_wire::resources::boarding::ContactMethod;
use payroc_wire::union::{encode_union, probe_discriminator};
use payroc_wire::{codec, decode_patch, encode_patch, satisfies, Object, PatchDocument, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_/~]{0,12}").unwrap()
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,24}",
        Just(String::new()),
        Just("caf\u{00e9}".to_string()),
        Just("line1\nline2".to_string()),
        Just("say \"hi\"".to_string()),
    ]
}

/// Integers and short decimals (`n / 10^k`), which parse back to the same `f64`.
fn arb_number() -> impl Strategy<Value = f64> {
    (-1_000_000_000i64..1_000_000_000i64, 0i32..4)
        .prop_map(|(mantissa, decimals)| mantissa as f64 / 10f64.powi(decimals))
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Object> {
    prop::collection::vec((arb_key(), arb_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_contact_method() -> impl Strategy<Value = ContactMethod> {
    (0u8..4, arb_string()).prop_map(|(kind, value)| match kind {
        0 => ContactMethod::email(value),
        1 => ContactMethod::phone(value),
        2 => ContactMethod::mobile(value),
        _ => ContactMethod::fax(value),
    })
}

fn arb_patch() -> impl Strategy<Value = PatchDocument> {
    let path = "(/[a-zA-Z0-9]{1,8}){1,3}";
    prop_oneof![
        path.prop_map(|p| PatchDocument::remove(p)),
        (path, arb_value()).prop_map(|(p, v)| PatchDocument::add(p, v)),
        (path, arb_value()).prop_map(|(p, v)| PatchDocument::replace(p, v)),
        (path, path).prop_map(|(from, to)| PatchDocument::move_from(from, to)),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn value_survives_text_roundtrip(value in arb_value()) {
        let text = value.to_json().unwrap();
        prop_assert_eq!(Value::parse(&text).unwrap(), value);
    }

    #[test]
    fn satisfies_is_reflexive(value in arb_value()) {
        prop_assert!(satisfies(&value, &value));
    }

    #[test]
    fn extra_actual_keys_never_break_satisfaction(
        base in arb_object(),
        extra_key in "x_[a-z]{1,6}",
        extra in arb_value(),
    ) {
        let mut actual = base.clone();
        if !actual.contains_key(&extra_key) {
            actual.insert(extra_key, extra);
        }
        prop_assert!(satisfies(&Value::Object(base), &Value::Object(actual)));
    }

    #[test]
    fn shrinking_an_array_breaks_satisfaction(items in prop::collection::vec(arb_value(), 1..6)) {
        let expected = Value::Array(items.clone());
        let actual = Value::Array(items[..items.len() - 1].to_vec());
        prop_assert!(!satisfies(&expected, &actual));
    }

    #[test]
    fn contact_method_roundtrips(method in arb_contact_method()) {
        let json = codec::encode(&method).unwrap();
        let back: ContactMethod = codec::decode(&json).unwrap();
        prop_assert_eq!(back, method);
    }

    #[test]
    fn encoded_union_always_carries_tag(method in arb_contact_method()) {
        let encoded = encode_union(&method).unwrap();
        let (field, tag) = probe_discriminator(&encoded).unwrap();
        prop_assert_eq!(field, "type");
        prop_assert!(!tag.is_empty());
    }

    #[test]
    fn patch_list_roundtrips(operations in prop::collection::vec(arb_patch(), 0..5)) {
        let json = encode_patch(&operations).unwrap();
        let back = decode_patch(&json).unwrap();
        prop_assert_eq!(back.len(), operations.len());
        for (decoded, original) in back.iter().zip(&operations) {
            prop_assert_eq!(decoded.op(), original.op());
            prop_assert_eq!(decoded.path(), original.path());
            let decoded_value = codec::to_value(decoded).unwrap();
            let original_value = codec::to_value(original).unwrap();
            prop_assert!(satisfies(&original_value, &decoded_value));
        }
    }
}
