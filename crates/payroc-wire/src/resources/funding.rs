//! Funding instructions: how settled funds are split across recipients.

use serde::{Deserialize, Serialize};

use crate::client::{with_query, PayrocClient};
use crate::error::Result;
use crate::resources::common::{Currency, Link, Metadata, PageParams, Paginated};
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingStatus {
    Accepted,
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FundingPaymentMethod {
    Ach,
    Wire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    pub value: f64,
}

/// `value` is in the currency's minor unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAmount {
    pub value: i64,
    pub currency: Currency,
}

/// Share of the merchant's funds sent to one recipient.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitAmount {
    Percentage(Percentage),
    Fixed(FixedAmount),
}

impl SplitAmount {
    pub fn percentage(value: f64) -> Self {
        Self::Percentage(Percentage { value })
    }

    pub fn fixed(value: i64, currency: Currency) -> Self {
        Self::Fixed(FixedAmount { value, currency })
    }
}

impl Union for SplitAmount {
    const NAME: &'static str = "SplitAmount";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("percentage", |v| {
            Ok(Self::Percentage(variant_payload::<Self, _>(v)?))
        }),
        ("fixed", |v| Ok(Self::Fixed(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Percentage(_) => "percentage",
            Self::Fixed(_) => "fixed",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Percentage(p) => payload_of(p),
            Self::Fixed(f) => payload_of(f),
        }
    }
}

union_serde!(SplitAmount);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRecipient {
    pub funding_account_id: i64,
    pub payment_method: FundingPaymentMethod,
    pub amount: SplitAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FundingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl FundingRecipient {
    pub fn new(
        funding_account_id: i64,
        payment_method: FundingPaymentMethod,
        amount: SplitAmount,
    ) -> Self {
        Self {
            funding_account_id,
            payment_method,
            amount,
            status: None,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInstruction {
    pub merchant_id: String,
    pub recipients: Vec<FundingRecipient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl MerchantInstruction {
    pub fn new(merchant_id: impl Into<String>, recipients: Vec<FundingRecipient>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            recipients,
            link: None,
        }
    }
}

/// Request and response body for `/funding-instructions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingInstruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FundingStatus>,
    pub merchants: Vec<MerchantInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl FundingInstruction {
    pub fn new(merchants: Vec<MerchantInstruction>) -> Self {
        Self {
            instruction_id: None,
            status: None,
            merchants,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Filters for `GET /funding-instructions`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundingInstructionListParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: PageParams,
}

/// `/funding-instructions` calls.
pub struct FundingInstructions<'a, T> {
    client: &'a PayrocClient<T>,
}

impl<'a, T: Transport> FundingInstructions<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>) -> Self {
        Self { client }
    }

    pub fn create(
        &self,
        instruction: &FundingInstruction,
        idempotency_key: &str,
    ) -> Result<FundingInstruction> {
        self.client
            .create("/funding-instructions", instruction, idempotency_key)
    }

    pub fn retrieve(&self, instruction_id: i64) -> Result<FundingInstruction> {
        self.client.get(&instruction_path(instruction_id))
    }

    pub fn list(
        &self,
        params: &FundingInstructionListParams,
    ) -> Result<Paginated<FundingInstruction>> {
        let mut pairs = vec![
            ("dateFrom", params.date_from.clone()),
            ("dateTo", params.date_to.clone()),
        ];
        pairs.extend(params.page.pairs());
        self.client.get(&with_query("/funding-instructions", &pairs))
    }

    pub fn update(&self, instruction_id: i64, instruction: &FundingInstruction) -> Result<()> {
        self.client
            .update(&instruction_path(instruction_id), instruction)
    }

    pub fn delete(&self, instruction_id: i64) -> Result<()> {
        self.client.delete(&instruction_path(instruction_id))
    }
}

fn instruction_path(instruction_id: i64) -> String {
    format!("/funding-instructions/{instruction_id}")
}
