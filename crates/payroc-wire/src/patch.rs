//! Patch documents for partial updates (`PATCH` bodies).
//!
//! A patch is a JSON array of operations, each a union tagged by `op`:
//!
//! ```text
//! [{"path":"/enabled","value":false,"op":"replace"},{"path":"/metadata","op":"remove"}]
//! ```
//!
//! Paths are passed through untouched; the API validates them.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Result;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};
use crate::value::Value;

/// Payload of operations that only name a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchPath {
    pub path: String,
}

/// Payload of operations that carry a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchValue {
    pub path: String,
    pub value: Value,
}

/// Payload of operations that relocate a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchFrom {
    pub from: String,
    pub path: String,
}

/// One patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchDocument {
    Add(PatchValue),
    Remove(PatchPath),
    Replace(PatchValue),
    Move(PatchFrom),
    Copy(PatchFrom),
    Test(PatchValue),
}

impl PatchDocument {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Add(PatchValue {
            path: path.into(),
            value: value.into(),
        })
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::Remove(PatchPath { path: path.into() })
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Replace(PatchValue {
            path: path.into(),
            value: value.into(),
        })
    }

    pub fn move_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Move(PatchFrom {
            from: from.into(),
            path: path.into(),
        })
    }

    pub fn copy_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Copy(PatchFrom {
            from: from.into(),
            path: path.into(),
        })
    }

    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Test(PatchValue {
            path: path.into(),
            value: value.into(),
        })
    }

    /// Target location of the operation.
    pub fn path(&self) -> &str {
        match self {
            Self::Remove(p) => &p.path,
            Self::Add(p) | Self::Replace(p) | Self::Test(p) => &p.path,
            Self::Move(p) | Self::Copy(p) => &p.path,
        }
    }

    /// Wire name of the operation.
    pub fn op(&self) -> &'static str {
        self.tag()
    }
}

impl Union for PatchDocument {
    const NAME: &'static str = "PatchDocument";
    const DISCRIMINATOR: &'static str = "op";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("add", |v| Ok(Self::Add(variant_payload::<Self, _>(v)?))),
        ("remove", |v| Ok(Self::Remove(variant_payload::<Self, _>(v)?))),
        ("replace", |v| Ok(Self::Replace(variant_payload::<Self, _>(v)?))),
        ("move", |v| Ok(Self::Move(variant_payload::<Self, _>(v)?))),
        ("copy", |v| Ok(Self::Copy(variant_payload::<Self, _>(v)?))),
        ("test", |v| Ok(Self::Test(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Replace(_) => "replace",
            Self::Move(_) => "move",
            Self::Copy(_) => "copy",
            Self::Test(_) => "test",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Remove(p) => payload_of(p),
            Self::Add(p) | Self::Replace(p) | Self::Test(p) => payload_of(p),
            Self::Move(p) | Self::Copy(p) => payload_of(p),
        }
    }
}

union_serde!(PatchDocument);

/// Encode a list of operations as a JSON array.
pub fn encode_patch(operations: &[PatchDocument]) -> Result<String> {
    codec::encode(&operations)
}

/// Decode a JSON array of operations. Errors name `PatchDocument` rather than `Vec`.
pub fn decode_patch(json: &str) -> Result<Vec<PatchDocument>> {
    serde_json::from_str(json).map_err(|err| codec::classify_error(PatchDocument::NAME, err))
}
