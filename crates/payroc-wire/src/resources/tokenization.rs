//! Secure tokens: stored payment details scoped to a processing terminal.

use serde::{Deserialize, Serialize};

use crate::client::PayrocClient;
use crate::error::Result;
use crate::patch::PatchDocument;
use crate::resources::bank_transfer_payments::{Ach, AchSummary, Pad, PadSummary};
use crate::resources::card_payments::{CardDetails, CardPayload};
use crate::resources::common::Customer;
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

/// Merchant-initiated transaction agreement the token is saved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MitAgreement {
    Unscheduled,
    Recurring,
    Installment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenStatus {
    Active,
    Inactive,
    NotVerified,
}

/// Payment details to tokenize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Card(CardPayload),
    Ach(Ach),
    Pad(Pad),
}

impl TokenSource {
    pub fn card(card_details: CardDetails) -> Self {
        Self::Card(CardPayload { card_details })
    }
}

impl Union for TokenSource {
    const NAME: &'static str = "TokenSource";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("card", |v| Ok(Self::Card(variant_payload::<Self, _>(v)?))),
        ("ach", |v| Ok(Self::Ach(variant_payload::<Self, _>(v)?))),
        ("pad", |v| Ok(Self::Pad(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Card(_) => "card",
            Self::Ach(_) => "ach",
            Self::Pad(_) => "pad",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Card(card) => payload_of(card),
            Self::Ach(ach) => payload_of(ach),
            Self::Pad(pad) => payload_of(pad),
        }
    }
}

union_serde!(TokenSource);

/// Body of `POST /processing-terminals/{id}/secure-tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureTokenRequest {
    /// Caller-chosen id; the API generates one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mit_agreement: Option<MitAgreement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub source: TokenSource,
}

impl SecureTokenRequest {
    pub fn new(source: TokenSource) -> Self {
        Self {
            secure_token_id: None,
            operator: None,
            mit_agreement: None,
            customer: None,
            source,
        }
    }

    pub fn with_secure_token_id(mut self, id: impl Into<String>) -> Self {
        self.secure_token_id = Some(id.into());
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn with_mit_agreement(mut self, agreement: MitAgreement) -> Self {
        self.mit_agreement = Some(agreement);
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }
}

/// Masked card stored behind a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCardSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    pub card_number: String,
    pub expiry_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSourceSummary {
    Card(TokenCardSummary),
    Ach(AchSummary),
    Pad(PadSummary),
}

impl Union for TokenSourceSummary {
    const NAME: &'static str = "TokenSourceSummary";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("card", |v| Ok(Self::Card(variant_payload::<Self, _>(v)?))),
        ("ach", |v| Ok(Self::Ach(variant_payload::<Self, _>(v)?))),
        ("pad", |v| Ok(Self::Pad(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Card(_) => "card",
            Self::Ach(_) => "ach",
            Self::Pad(_) => "pad",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Card(card) => payload_of(card),
            Self::Ach(ach) => payload_of(ach),
            Self::Pad(pad) => payload_of(pad),
        }
    }
}

union_serde!(TokenSourceSummary);

/// A secure token as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureToken {
    pub secure_token_id: String,
    pub processing_terminal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mit_agreement: Option<MitAgreement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub source: TokenSourceSummary,
    pub token: String,
    pub status: TokenStatus,
}

/// `/processing-terminals/{id}/secure-tokens` calls.
pub struct SecureTokens<'a, T> {
    client: &'a PayrocClient<T>,
    processing_terminal_id: &'a str,
}

impl<'a, T: Transport> SecureTokens<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>, processing_terminal_id: &'a str) -> Self {
        Self {
            client,
            processing_terminal_id,
        }
    }

    pub fn create(&self, request: &SecureTokenRequest, idempotency_key: &str) -> Result<SecureToken> {
        self.client
            .create(&self.collection_path(), request, idempotency_key)
    }

    pub fn retrieve(&self, secure_token_id: &str) -> Result<SecureToken> {
        self.client.get(&self.token_path(secure_token_id))
    }

    pub fn partially_update(
        &self,
        secure_token_id: &str,
        operations: &[PatchDocument],
    ) -> Result<SecureToken> {
        self.client
            .partially_update(&self.token_path(secure_token_id), operations)
    }

    pub fn delete(&self, secure_token_id: &str) -> Result<()> {
        self.client.delete(&self.token_path(secure_token_id))
    }

    fn collection_path(&self) -> String {
        format!(
            "/processing-terminals/{}/secure-tokens",
            urlencoding::encode(self.processing_terminal_id)
        )
    }

    fn token_path(&self, secure_token_id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_path(),
            urlencoding::encode(secure_token_id)
        )
    }
}
