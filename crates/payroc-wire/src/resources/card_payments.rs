//! Card payments.
//!
//! Two unions nest here: the payment method (tagged by `type`) and, inside a
//! card payment method, the card details (tagged by `entryMethod`).

use serde::{Deserialize, Serialize};

use crate::client::PayrocClient;
use crate::error::Result;
use crate::resources::bank_transfer_payments::TokenReference;
use crate::resources::common::{Currency, CustomField, Customer, TransactionResult};
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Pos,
    Web,
    Moto,
}

/// Terminal that captured a swiped, dipped or tapped card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub model: String,
    pub serial_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCardDetails {
    pub device: Device,
    pub raw_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedCardData {
    pub card_number: String,
    pub expiry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedCardDetails {
    pub keyed_data: KeyedCardData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
}

/// How the card data was captured. Tagged by `entryMethod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDetails {
    Raw(RawCardDetails),
    Keyed(KeyedCardDetails),
}

impl CardDetails {
    pub fn keyed(card_number: impl Into<String>, expiry_date: impl Into<String>) -> Self {
        Self::Keyed(KeyedCardDetails {
            keyed_data: KeyedCardData {
                card_number: card_number.into(),
                expiry_date: expiry_date.into(),
                cvv: None,
            },
            cardholder_name: None,
        })
    }
}

impl Union for CardDetails {
    const NAME: &'static str = "CardDetails";
    const DISCRIMINATOR: &'static str = "entryMethod";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("raw", |v| Ok(Self::Raw(variant_payload::<Self, _>(v)?))),
        ("keyed", |v| Ok(Self::Keyed(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Keyed(_) => "keyed",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Raw(raw) => payload_of(raw),
            Self::Keyed(keyed) => payload_of(keyed),
        }
    }
}

union_serde!(CardDetails);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub card_details: CardDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletProvider {
    Apple,
    Google,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalWallet {
    pub service_provider: WalletProvider,
    pub encrypted_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
}

/// How a card payment is funded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPaymentMethod {
    Card(CardPayload),
    SecureToken(TokenReference),
    SingleUseToken(TokenReference),
    DigitalWallet(DigitalWallet),
}

impl CardPaymentMethod {
    pub fn card(card_details: CardDetails) -> Self {
        Self::Card(CardPayload { card_details })
    }

    pub fn secure_token(token: impl Into<String>) -> Self {
        Self::SecureToken(TokenReference {
            token: token.into(),
        })
    }
}

impl Union for CardPaymentMethod {
    const NAME: &'static str = "CardPaymentMethod";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("card", |v| Ok(Self::Card(variant_payload::<Self, _>(v)?))),
        ("secureToken", |v| {
            Ok(Self::SecureToken(variant_payload::<Self, _>(v)?))
        }),
        ("singleUseToken", |v| {
            Ok(Self::SingleUseToken(variant_payload::<Self, _>(v)?))
        }),
        ("digitalWallet", |v| {
            Ok(Self::DigitalWallet(variant_payload::<Self, _>(v)?))
        }),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Card(_) => "card",
            Self::SecureToken(_) => "secureToken",
            Self::SingleUseToken(_) => "singleUseToken",
            Self::DigitalWallet(_) => "digitalWallet",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Card(card) => payload_of(card),
            Self::SecureToken(token) | Self::SingleUseToken(token) => payload_of(token),
            Self::DigitalWallet(wallet) => payload_of(wallet),
        }
    }
}

union_serde!(CardPaymentMethod);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl PaymentOrder {
    pub fn new(order_id: impl Into<String>, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            description: None,
            amount,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub channel: Channel,
    pub processing_terminal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub order: PaymentOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub payment_method: CardPaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
}

impl PaymentRequest {
    pub fn new(
        channel: Channel,
        processing_terminal_id: impl Into<String>,
        order: PaymentOrder,
        payment_method: CardPaymentMethod,
    ) -> Self {
        Self {
            channel,
            processing_terminal_id: processing_terminal_id.into(),
            operator: None,
            order,
            customer: None,
            payment_method,
            custom_fields: None,
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }
}

/// Masked card echoed back on a payment. `type` is the card brand, not a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    #[serde(rename = "type")]
    pub card_type: String,
    pub entry_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    pub card_number: String,
    pub expiry_date: String,
}

/// A card payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: String,
    pub processing_terminal_id: String,
    pub order: PaymentOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardSummary>,
    pub transaction_result: TransactionResult,
}

/// `/payments` calls.
pub struct Payments<'a, T> {
    client: &'a PayrocClient<T>,
}

impl<'a, T: Transport> Payments<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>) -> Self {
        Self { client }
    }

    pub fn create(&self, request: &PaymentRequest, idempotency_key: &str) -> Result<Payment> {
        self.client.create("/payments", request, idempotency_key)
    }

    pub fn retrieve(&self, payment_id: &str) -> Result<Payment> {
        self.client
            .get(&format!("/payments/{}", urlencoding::encode(payment_id)))
    }
}
