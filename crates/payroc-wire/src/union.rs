//! Discriminated-union codec: closed Rust enums <-> flat, tagged JSON objects.
//!
//! A union variant goes on the wire as its payload fields written flat into one
//! object, plus a discriminator field holding the variant's tag:
//!
//! ```text
//! BankTransferPaymentMethod::Ach(..)  ->  {"nameOnAccount":"..","accountNumber":"..","type":"ach"}
//! ```
//!
//! # Key design decisions
//!
//! - **Registry, not dispatch chains**: each union lists its variants in
//!   [`Union::VARIANTS`] as `(tag, decoder)` pairs. Decoding is a lookup.
//! - **Probe order**: unions keyed on `type`, `_type` or `kind` read whichever
//!   of those appears first in [`DISCRIMINATOR_PROBE_ORDER`]. Unions keyed on
//!   any other field (`op`, `entryMethod`) read only that field.
//! - **Tag wins**: on encode the discriminator overwrites a payload field of
//!   the same name; on decode it is stripped before the payload is handed to
//!   the variant decoder.

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::codec::classify_error;
use crate::error::{Result, WireError};
use crate::value::Value;

/// Candidate discriminator fields, highest priority first.
pub const DISCRIMINATOR_PROBE_ORDER: [&str; 3] = ["type", "_type", "kind"];

/// A variant payload: the flat JSON object minus its discriminator.
///
/// Payloads stay on serde_json's map so integer fields keep full `i64`/`u64`
/// precision between the typed model and the wire.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Turns a variant payload (discriminator already removed) into the union.
pub type VariantDecoder<U> = fn(Payload) -> Result<U>;

/// A closed set of wire variants selected by a discriminator field.
pub trait Union: Sized + 'static {
    /// Union name used in diagnostics.
    const NAME: &'static str;

    /// Field that carries the variant tag on the wire.
    const DISCRIMINATOR: &'static str = "type";

    /// Registered variants, tag -> decoder.
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)];

    /// Wire tag of this variant.
    fn tag(&self) -> &'static str;

    /// Payload of this variant, without the discriminator.
    fn payload(&self) -> Result<Payload>;
}

/// Encode a union value as a flat [`Value`] object carrying its discriminator.
pub fn encode_union<U: Union>(union: &U) -> Result<Value> {
    encode_tagged(union).map(|map| Value::from(serde_json::Value::Object(map)))
}

/// Decode a flat tagged [`Value`] object into the variant its discriminator names.
pub fn decode_union<U: Union>(value: Value) -> Result<U> {
    decode_tagged(value.into())
}

fn encode_tagged<U: Union>(union: &U) -> Result<Payload> {
    let tag = union.tag();
    if tag.is_empty() {
        return Err(WireError::Encode(format!("{} variant has an empty tag", U::NAME)));
    }
    let mut map = union.payload()?;
    map.insert(U::DISCRIMINATOR.to_string(), tag.into());
    Ok(map)
}

fn decode_tagged<U: Union>(value: serde_json::Value) -> Result<U> {
    let mut map = match value {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(WireError::Shape {
                model: U::NAME,
                message: format!("expected an object, found {}", Value::from(other).kind()),
            })
        }
    };

    let missing = || WireError::MissingDiscriminator {
        union: U::NAME,
        field: U::DISCRIMINATOR,
    };
    let field = discriminator_field::<U>(|key| map.contains_key(key)).ok_or_else(missing)?;
    let tag = match map.shift_remove(field) {
        Some(serde_json::Value::String(tag)) if !tag.is_empty() => tag,
        _ => return Err(missing()),
    };

    match U::VARIANTS.iter().find(|(known, _)| *known == tag) {
        Some((_, decode)) => decode(map),
        None => {
            tracing::debug!(union = U::NAME, tag = %tag, "unknown union variant");
            Err(WireError::UnknownVariant { union: U::NAME, tag })
        }
    }
}

/// Which field holds the tag for union `U`, given a key-presence test.
fn discriminator_field<U: Union>(has: impl Fn(&str) -> bool) -> Option<&'static str> {
    if DISCRIMINATOR_PROBE_ORDER.contains(&U::DISCRIMINATOR) {
        DISCRIMINATOR_PROBE_ORDER
            .into_iter()
            .find(|candidate| has(*candidate))
    } else {
        has(U::DISCRIMINATOR).then_some(U::DISCRIMINATOR)
    }
}

/// Find the discriminator of an arbitrary JSON object without knowing its union.
///
/// Returns the first field of [`DISCRIMINATOR_PROBE_ORDER`] present on the
/// object together with its value, provided that value is a non-empty string.
pub fn probe_discriminator(value: &Value) -> Option<(&'static str, &str)> {
    let map = value.as_object()?;
    let field = DISCRIMINATOR_PROBE_ORDER
        .into_iter()
        .find(|candidate| map.contains_key(candidate))?;
    Some(field).zip(tag_of(value, field))
}

/// Non-empty string value of `field`, for unions keyed outside the probe set.
pub fn tag_of<'v>(value: &'v Value, field: &str) -> Option<&'v str> {
    value.get(field)?.as_str().filter(|tag| !tag.is_empty())
}

/// Serialize a variant payload struct into a [`Payload`].
pub fn payload_of<T: Serialize>(payload: &T) -> Result<Payload> {
    match serde_json::to_value(payload) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(WireError::Encode(format!(
            "variant payload must encode as an object, found {}",
            Value::from(other).kind()
        ))),
        Err(err) => Err(WireError::Encode(err.to_string())),
    }
}

/// Deserialize a variant payload of union `U` into its struct.
pub fn variant_payload<U: Union, T: DeserializeOwned>(payload: Payload) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(payload))
        .map_err(|err| classify_error(U::NAME, err))
}

/// serde bridge used by [`union_serde`].
pub fn serialize_union<U: Union, S: Serializer>(
    union: &U,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let map = encode_tagged(union).map_err(serde::ser::Error::custom)?;
    map.serialize(serializer)
}

/// serde bridge used by [`union_serde`].
pub fn deserialize_union<'de, U: Union, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<U, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    decode_tagged(value).map_err(serde::de::Error::custom)
}

/// Implement `Serialize`/`Deserialize` for a [`Union`] so it can sit inside
/// derived models.
macro_rules! union_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                $crate::union::serialize_union(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                $crate::union::deserialize_union(deserializer)
            }
        }
    };
}

pub(crate) use union_serde;

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Label(String),
    }

    impl Union for Shape {
        const NAME: &'static str = "Shape";
        const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
            ("circle", |v| {
                let radius = v.get("radius").and_then(|r| r.as_f64()).unwrap_or_default();
                Ok(Shape::Circle(radius))
            }),
            ("label", |v| {
                let text = v.get("text").and_then(|t| t.as_str()).unwrap_or_default();
                Ok(Shape::Label(text.to_string()))
            }),
        ];

        fn tag(&self) -> &'static str {
            match self {
                Shape::Circle(_) => "circle",
                Shape::Label(_) => "label",
            }
        }

        fn payload(&self) -> Result<Payload> {
            let mut map = Payload::new();
            match self {
                Shape::Circle(r) => map.insert("radius".into(), json!(r)),
                Shape::Label(text) => {
                    // A payload field named like the discriminator loses to the tag.
                    map.insert("type".into(), json!("payload"));
                    map.insert("text".into(), json!(text))
                }
            };
            Ok(map)
        }
    }

    #[test]
    fn tag_overwrites_payload_field() {
        let encoded = encode_union(&Shape::Label("hi".into())).unwrap();
        assert_eq!(encoded.to_json().unwrap(), r#"{"type":"label","text":"hi"}"#);
    }

    #[test]
    fn discriminator_field_prefers_type_over_kind() {
        let value = Value::parse(r#"{"kind":"label","type":"circle","radius":2}"#).unwrap();
        assert_eq!(decode_union::<Shape>(value).unwrap(), Shape::Circle(2.0));
    }

    #[test]
    fn underscore_type_is_probed_before_kind() {
        let value = Value::parse(r#"{"kind":"circle","_type":"label","text":"x"}"#).unwrap();
        assert_eq!(
            decode_union::<Shape>(value).unwrap(),
            Shape::Label("x".into())
        );
    }

    #[test]
    fn tag_of_reads_fields_outside_probe_set() {
        let value = Value::parse(r#"{"op":"remove","path":"/a","entryMethod":""}"#).unwrap();
        assert_eq!(tag_of(&value, "op"), Some("remove"));
        assert_eq!(tag_of(&value, "entryMethod"), None);
        assert_eq!(probe_discriminator(&value), None);
    }
}
