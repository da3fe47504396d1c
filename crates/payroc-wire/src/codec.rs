//! Typed model codec: request and response models <-> JSON wire text.
//!
//! Models are plain serde types; unions inside them go through
//! [`crate::union`]. This module adds the error policy on top of serde_json:
//!
//! - syntax and truncation problems become [`WireError::Parse`]
//! - a missing required field becomes [`WireError::MissingRequiredField`]
//! - any other shape problem becomes [`WireError::Shape`], naming the model
//!
//! # Example
//! ```
//! use payroc_wire::codec;
//! use payroc_wire::resources::boarding::ContactMethod;
//!
//! let method = ContactMethod::email("jane.doe@example.com");
//! let json = codec::encode(&method).unwrap();
//! assert_eq!(json, r#"{"value":"jane.doe@example.com","type":"email"}"#);
//!
//! let back: ContactMethod = codec::decode(&json).unwrap();
//! assert_eq!(back, method);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;

use crate::error::{Result, WireError};
use crate::value::Value;

/// Encode a typed model into compact JSON. Field order follows declaration order.
pub fn encode<M: Serialize>(model: &M) -> Result<String> {
    serde_json::to_string(model).map_err(encode_error)
}

/// Encode a typed model into indented JSON.
pub fn encode_pretty<M: Serialize>(model: &M) -> Result<String> {
    serde_json::to_string_pretty(model).map_err(encode_error)
}

/// Encode a typed model into a [`Value`] tree.
pub fn to_value<M: Serialize>(model: &M) -> Result<Value> {
    serde_json::to_value(model)
        .map(Value::from)
        .map_err(encode_error)
}

/// Decode JSON text into a typed model.
pub fn decode<M: DeserializeOwned>(json: &str) -> Result<M> {
    serde_json::from_str(json).map_err(|err| classify_error(model_name::<M>(), err))
}

/// Decode a [`Value`] tree into a typed model.
pub fn from_value<M: DeserializeOwned>(value: Value) -> Result<M> {
    serde_json::from_value(value.into()).map_err(|err| classify_error(model_name::<M>(), err))
}

/// Sort a serde_json failure into the wire error taxonomy.
pub(crate) fn classify_error(model: &'static str, err: serde_json::Error) -> WireError {
    match err.classify() {
        Category::Syntax | Category::Eof | Category::Io => WireError::Parse(err),
        Category::Data => {
            let message = err.to_string();
            match missing_field(&message) {
                Some(field) => WireError::MissingRequiredField { model, field },
                None => WireError::Shape { model, message },
            }
        }
    }
}

/// Errors on the encode path are never about malformed input text.
fn encode_error(err: serde_json::Error) -> WireError {
    WireError::Encode(err.to_string())
}

/// Extract the field name from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field.to_string())
}

/// Short, generic-free type name: `payroc_wire::x::Paginated<..>` -> `Paginated`.
fn model_name<M>() -> &'static str {
    let full = std::any::type_name::<M>();
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}
