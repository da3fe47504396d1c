//! # payroc-wire
//!
//! Typed JSON wire layer for the Payroc payments API.
//!
//! Requests and responses are plain Rust structs. Polymorphic fields (payment
//! methods, contact methods, notification channels, patch operations) are
//! closed enums that go on the wire as flat objects tagged by a discriminator
//! field such as `"type": "ach"`.
//!
//! ## Quick start
//!
//! ```rust
//! use payroc_wire::resources::bank_transfer_payments::{
//!     Ach, BankTransferOrder, BankTransferPaymentRequest,
//! };
//! use payroc_wire::{codec, satisfies, Value};
//!
//! let request = BankTransferPaymentRequest::new(
//!     "1234001",
//!     BankTransferOrder::new("OrderRef6543", 4999),
//!     Ach::new("Shara Hazel", "1234567890", "123456789"),
//! );
//! let json = codec::encode(&request).unwrap();
//!
//! let expected = Value::parse(
//!     r#"{"processingTerminalId":"1234001","paymentMethod":{"type":"ach","accountNumber":"1234567890"}}"#,
//! )
//! .unwrap();
//! assert!(satisfies(&expected, &Value::parse(&json).unwrap()));
//! ```
//!
//! `satisfies` checks containment: fields present only on the actual side
//! (here `order`, `nameOnAccount`, `routingNumber`) are ignored.
//!
//! ## Modules
//!
//! - [`value`]: dynamic JSON tree with insertion-ordered objects
//! - [`union`]: discriminated-union encode/decode
//! - [`codec`]: typed model encode/decode with classified errors
//! - [`compare`]: structural comparator (`satisfies`, `check`)
//! - [`patch`]: patch documents for `PATCH` bodies
//! - [`resources`]: typed request/response models per API area
//! - [`config`], [`transport`], [`client`]: request dispatch over a pluggable transport
//! - [`error`]: error types

pub mod client;
pub mod codec;
pub mod compare;
pub mod config;
pub mod error;
pub mod patch;
pub mod resources;
pub mod transport;
pub mod union;
pub mod value;

pub use client::PayrocClient;
pub use compare::{check, check_optional, satisfies, satisfies_optional, Mismatch, MismatchKind};
pub use config::ClientConfig;
pub use error::{Result, WireError};
pub use patch::{decode_patch, encode_patch, PatchDocument};
pub use transport::{Method, Transport, WireRequest, WireResponse};
pub use union::{decode_union, encode_union, probe_discriminator, Union};
pub use value::{Object, Value};
