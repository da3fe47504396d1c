//! Structural comparison -- does an actual payload satisfy an expected one?
//!
//! The check is containment, not equivalence: `expected ⊆ actual`.
//!
//! - Objects: every expected key must be present in actual and satisfied
//!   recursively. Keys only in actual (server defaults, generated ids) are
//!   ignored. Key order never matters.
//! - Arrays: same length, and element `i` of expected must satisfy element
//!   `i` of actual. Order matters.
//! - Numbers: equal within [`NUMERIC_TOLERANCE`], so `100` and `100.0` and
//!   values that drifted through a float round trip still match.
//! - Everything else: exact equality of kind and value.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Absolute difference under which two numbers are considered equal.
pub const NUMERIC_TOLERANCE: f64 = 1e-10;

/// Why a comparison failed at a particular location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// The expected object key is absent on the actual side.
    MissingKey,
    /// The values are of different JSON kinds (e.g. object vs array).
    KindDiffers,
    /// Both sides are arrays but of different lengths.
    LengthDiffers,
    /// Both sides are numbers further apart than the tolerance.
    NumberDiffers,
    /// Both sides are leaves of the same kind with different values.
    ValueDiffers,
    /// Exactly one side was absent at the call site.
    Absent,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MismatchKind::MissingKey => "missing key",
            MismatchKind::KindDiffers => "kind differs",
            MismatchKind::LengthDiffers => "array length differs",
            MismatchKind::NumberDiffers => "number differs",
            MismatchKind::ValueDiffers => "value differs",
            MismatchKind::Absent => "one side absent",
        })
    }
}

/// The first place where `actual` failed to satisfy `expected`.
///
/// `path` is a JSON Pointer (RFC 6901) into the expected document; the empty
/// string is the root.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("structural mismatch at `{path}`: {kind} (expected {}, actual {})", render(Some(.expected)), render(.actual.as_ref()))]
pub struct Mismatch {
    pub path: String,
    pub kind: MismatchKind,
    pub expected: Value,
    pub actual: Option<Value>,
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<absent>".to_string(),
    }
}

/// Whether `actual` satisfies `expected`.
///
/// # Examples
///
/// ```
/// use payroc_wire::{satisfies, Value};
///
/// let expected = Value::parse(r#"{"a":1}"#).unwrap();
/// let actual = Value::parse(r#"{"a":1.0,"b":2}"#).unwrap();
/// assert!(satisfies(&expected, &actual));
/// assert!(!satisfies(&actual, &expected));
/// ```
pub fn satisfies(expected: &Value, actual: &Value) -> bool {
    check(expected, actual).is_ok()
}

/// [`satisfies`] for call sites where either side may be missing entirely.
///
/// Two absent sides satisfy each other; exactly one absent side does not.
pub fn satisfies_optional(expected: Option<&Value>, actual: Option<&Value>) -> bool {
    match (expected, actual) {
        (None, None) => true,
        (Some(e), Some(a)) => satisfies(e, a),
        _ => false,
    }
}

/// Like [`satisfies`], but reports where and why the comparison failed.
pub fn check(expected: &Value, actual: &Value) -> Result<(), Mismatch> {
    let mut path = String::new();
    walk(expected, actual, &mut path)
}

/// Like [`satisfies_optional`], with diagnostics.
pub fn check_optional(expected: Option<&Value>, actual: Option<&Value>) -> Result<(), Mismatch> {
    match (expected, actual) {
        (None, None) => Ok(()),
        (Some(e), Some(a)) => check(e, a),
        (e, a) => Err(Mismatch {
            path: String::new(),
            kind: MismatchKind::Absent,
            expected: e.cloned().unwrap_or_default(),
            actual: a.cloned(),
        }),
    }
}

/// Recursive comparison. `path` holds the pointer to the current node and is
/// restored before returning on success.
fn walk(expected: &Value, actual: &Value, path: &mut String) -> Result<(), Mismatch> {
    if expected == actual {
        return Ok(());
    }
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => {
            if (e - a).abs() < NUMERIC_TOLERANCE {
                Ok(())
            } else {
                Err(mismatch(path, MismatchKind::NumberDiffers, expected, Some(actual)))
            }
        }
        (Value::Object(e_map), Value::Object(a_map)) => {
            for (key, e_child) in e_map.iter() {
                let mark = path.len();
                push_segment(path, key);
                match a_map.get(key) {
                    Some(a_child) => walk(e_child, a_child, path)?,
                    None => return Err(mismatch(path, MismatchKind::MissingKey, e_child, None)),
                }
                path.truncate(mark);
            }
            Ok(())
        }
        (Value::Array(e_items), Value::Array(a_items)) => {
            if e_items.len() != a_items.len() {
                return Err(mismatch(
                    path,
                    MismatchKind::LengthDiffers,
                    expected,
                    Some(actual),
                ));
            }
            for (i, (e_child, a_child)) in e_items.iter().zip(a_items).enumerate() {
                let mark = path.len();
                push_segment(path, &i.to_string());
                walk(e_child, a_child, path)?;
                path.truncate(mark);
            }
            Ok(())
        }
        _ if std::mem::discriminant(expected) == std::mem::discriminant(actual) => Err(mismatch(
            path,
            MismatchKind::ValueDiffers,
            expected,
            Some(actual),
        )),
        _ => Err(mismatch(path, MismatchKind::KindDiffers, expected, Some(actual))),
    }
}

fn mismatch(path: &str, kind: MismatchKind, expected: &Value, actual: Option<&Value>) -> Mismatch {
    Mismatch {
        path: path.to_string(),
        kind,
        expected: expected.clone(),
        actual: actual.cloned(),
    }
}

/// Append `/segment` with RFC 6901 escaping (`~` -> `~0`, `/` -> `~1`).
fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for ch in segment.chars() {
        match ch {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            _ => path.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_segments_are_escaped() {
        let mut path = String::new();
        push_segment(&mut path, "a/b");
        push_segment(&mut path, "c~d");
        assert_eq!(path, "/a~1b/c~0d");
    }

    #[test]
    fn path_is_restored_between_siblings() {
        let expected = Value::parse(r#"{"a":{"x":1},"b":2}"#).unwrap();
        let actual = Value::parse(r#"{"a":{"x":1},"b":3}"#).unwrap();
        let err = check(&expected, &actual).unwrap_err();
        assert_eq!(err.path, "/b");
        assert_eq!(err.kind, MismatchKind::NumberDiffers);
    }
}
