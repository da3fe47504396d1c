use payroc_wire::resources::bank_transfer_payments::{Ach, BankTransferPaymentMethod, SecCode};
use payroc_wire::resources::boarding::ContactMethod;
use payroc_wire::resources::card_payments::{CardDetails, CardPaymentMethod};
use payroc_wire::resources::funding::SplitAmount;
use payroc_wire::resources::notifications::Notification;
use payroc_wire::union::{DISCRIMINATOR_PROBE_ORDER, Union};
use payroc_wire::{codec, decode_union, encode_union, probe_discriminator, Value, WireError};

fn parse(text: &str) -> Value {
    Value::parse(text).unwrap()
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn ach_encodes_flat_with_trailing_tag() {
    let method = BankTransferPaymentMethod::Ach(Ach::new(
        "Shara Hazel Hopper",
        "1234567890",
        "123456789",
    ));
    assert_eq!(
        codec::encode(&method).unwrap(),
        r#"{"nameOnAccount":"Shara Hazel Hopper","accountNumber":"1234567890","routingNumber":"123456789","type":"ach"}"#
    );
}

#[test]
fn optional_payload_fields_stay_out_of_union_encoding() {
    let method = BankTransferPaymentMethod::Ach(
        Ach::new("Shara Hazel Hopper", "1234567890", "123456789").with_sec_code(SecCode::Web),
    );
    let value = encode_union(&method).unwrap();
    assert_eq!(value.get("secCode").and_then(Value::as_str), Some("web"));
    assert!(value.get("accountType").is_none());
}

#[test]
fn every_variant_tag_is_non_empty_on_the_wire() {
    let samples = vec![
        encode_union(&ContactMethod::email("a@b.c")).unwrap(),
        encode_union(&ContactMethod::fax("555")).unwrap(),
        encode_union(&Notification::webhook("https://x", "s", "a@b.c")).unwrap(),
        encode_union(&SplitAmount::percentage(12.5)).unwrap(),
        encode_union(&BankTransferPaymentMethod::secure_token("tok")).unwrap(),
    ];
    for value in samples {
        let tag = value.get("type").and_then(Value::as_str).unwrap();
        assert!(!tag.is_empty(), "empty tag in {value}");
    }
}

#[test]
fn custom_discriminator_field_is_used_on_encode() {
    let details = CardDetails::keyed("4111111111111111", "1230");
    let value = encode_union(&details).unwrap();
    assert_eq!(value.get("entryMethod").and_then(Value::as_str), Some("keyed"));
    assert!(value.get("type").is_none());
}

#[test]
fn nested_unions_each_carry_their_own_tag() {
    let method = CardPaymentMethod::card(CardDetails::keyed("4111111111111111", "1230"));
    let json = codec::encode(&method).unwrap();
    assert_eq!(
        json,
        r#"{"cardDetails":{"keyedData":{"cardNumber":"4111111111111111","expiryDate":"1230"},"entryMethod":"keyed"},"type":"card"}"#
    );
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decode_selects_variant_by_tag() {
    let value = parse(r#"{"type":"phone","value":"2025550123"}"#);
    assert_eq!(
        decode_union::<ContactMethod>(value).unwrap(),
        ContactMethod::phone("2025550123")
    );
}

#[test]
fn decode_accepts_tag_in_any_position() {
    let value = parse(r#"{"value":"x@y.z","type":"email"}"#);
    assert_eq!(
        decode_union::<ContactMethod>(value).unwrap(),
        ContactMethod::email("x@y.z")
    );
}

#[test]
fn decode_probes_underscore_type_then_kind() {
    let underscore = parse(r#"{"_type":"mobile","value":"1"}"#);
    assert_eq!(
        decode_union::<ContactMethod>(underscore).unwrap(),
        ContactMethod::mobile("1")
    );
    let kind = parse(r#"{"kind":"fax","value":"2"}"#);
    assert_eq!(
        decode_union::<ContactMethod>(kind).unwrap(),
        ContactMethod::fax("2")
    );
}

#[test]
fn probe_order_constant() {
    assert_eq!(DISCRIMINATOR_PROBE_ORDER, ["type", "_type", "kind"]);
}

#[test]
fn custom_discriminator_does_not_probe_type() {
    let value = parse(r#"{"type":"keyed","keyedData":{"cardNumber":"4","expiryDate":"1230"}}"#);
    assert!(matches!(
        decode_union::<CardDetails>(value),
        Err(WireError::MissingDiscriminator {
            union: "CardDetails",
            field: "entryMethod"
        })
    ));
}

#[test]
fn missing_discriminator_is_an_error() {
    let value = parse(r#"{"value":"x@y.z"}"#);
    assert!(matches!(
        decode_union::<ContactMethod>(value),
        Err(WireError::MissingDiscriminator { field: "type", .. })
    ));
}

#[test]
fn empty_or_non_string_discriminator_is_missing() {
    for text in [
        r#"{"type":"","value":"x"}"#,
        r#"{"type":null,"value":"x"}"#,
        r#"{"type":7,"value":"x"}"#,
    ] {
        assert!(
            matches!(
                decode_union::<ContactMethod>(parse(text)),
                Err(WireError::MissingDiscriminator { .. })
            ),
            "expected missing discriminator for {text}"
        );
    }
}

#[test]
fn unknown_tag_is_reported_with_its_value() {
    let value = parse(r#"{"type":"pager","value":"x"}"#);
    match decode_union::<ContactMethod>(value) {
        Err(WireError::UnknownVariant { union, tag }) => {
            assert_eq!(union, "ContactMethod");
            assert_eq!(tag, "pager");
        }
        other => panic!("expected UnknownVariant, got {other:?}"),
    }
}

#[test]
fn non_object_union_is_a_shape_error() {
    assert!(matches!(
        decode_union::<ContactMethod>(parse(r#"["email"]"#)),
        Err(WireError::Shape { model: "ContactMethod", .. })
    ));
}

#[test]
fn variant_missing_required_payload_field() {
    let value = parse(r#"{"type":"webhook","uri":"https://x","secret":"s"}"#);
    match decode_union::<Notification>(value) {
        Err(WireError::MissingRequiredField { model, field }) => {
            assert_eq!(model, "Notification");
            assert_eq!(field, "supportEmailAddress");
        }
        other => panic!("expected MissingRequiredField, got {other:?}"),
    }
}

#[test]
fn unknown_tag_inside_a_model_names_the_union() {
    let err = codec::decode::<ContactMethod>(r#"{"type":"pager","value":"x"}"#).unwrap_err();
    assert!(err.to_string().contains("pager"), "{err}");
}

#[test]
fn registered_tags_match_encoded_tags() {
    let tags: Vec<&str> = SplitAmount::VARIANTS.iter().map(|(tag, _)| *tag).collect();
    assert_eq!(tags, vec!["percentage", "fixed"]);
    assert_eq!(SplitAmount::percentage(1.0).tag(), "percentage");
}

// ============================================================================
// Probing
// ============================================================================

#[test]
fn probe_reports_field_and_tag() {
    let value = parse(r#"{"kind":"b","_type":"a"}"#);
    assert_eq!(probe_discriminator(&value), Some(("_type", "a")));
}

#[test]
fn probe_rejects_non_objects_and_empty_tags() {
    assert_eq!(probe_discriminator(&parse("[]")), None);
    assert_eq!(probe_discriminator(&parse(r#"{"type":""}"#)), None);
    assert_eq!(probe_discriminator(&parse(r#"{"op":"remove"}"#)), None);
}
