//! Typed request and response models, one module per API area.
//!
//! Every model derives `Serialize`/`Deserialize` with camelCase wire names.
//! Optional fields are `Option<T>` and are omitted from the JSON when `None`.
//! Polymorphic fields are enums implementing [`Union`](crate::union::Union).

pub mod bank_transfer_payments;
pub mod boarding;
pub mod card_payments;
pub mod common;
pub mod funding;
pub mod notifications;
pub mod tokenization;
