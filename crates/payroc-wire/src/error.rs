//! Error types for wire encoding, decoding and dispatch.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or dispatching a wire payload.
#[derive(Error, Debug)]
pub enum WireError {
    /// The input text was not valid JSON (unterminated strings, bad numbers,
    /// trailing data).
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field of a typed model was absent.
    #[error("missing required field `{field}` on {model}")]
    MissingRequiredField { model: &'static str, field: String },

    /// A union payload carried no usable discriminator (absent, empty or not a string).
    #[error("missing discriminator `{field}` for union {union}")]
    MissingDiscriminator {
        union: &'static str,
        field: &'static str,
    },

    /// The discriminator value does not name a registered variant.
    #[error("unknown variant `{tag}` for union {union}")]
    UnknownVariant { union: &'static str, tag: String },

    /// The JSON was well-formed but did not fit the declared model shape.
    #[error("invalid {model} payload: {message}")]
    Shape { model: &'static str, message: String },

    /// A value could not be turned into its wire form.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Convenience alias used throughout payroc-wire.
pub type Result<T> = std::result::Result<T, WireError>;
