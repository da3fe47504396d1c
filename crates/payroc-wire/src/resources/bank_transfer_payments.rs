//! Bank-transfer payments: ACH (US) and pre-authorized debit (Canada).

use serde::{Deserialize, Serialize};

use crate::client::{with_query, PayrocClient};
use crate::error::Result;
use crate::resources::common::{
    Currency, CustomField, Customer, PageParams, Paginated, TransactionResult,
};
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Checking,
    Savings,
}

/// NACHA standard entry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecCode {
    Web,
    Tel,
    Ccd,
    Ppd,
}

/// US bank account details for an ACH debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ach {
    pub name_on_account: String,
    pub account_number: String,
    pub routing_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_code: Option<SecCode>,
}

impl Ach {
    pub fn new(
        name_on_account: impl Into<String>,
        account_number: impl Into<String>,
        routing_number: impl Into<String>,
    ) -> Self {
        Self {
            name_on_account: name_on_account.into(),
            account_number: account_number.into(),
            routing_number: routing_number.into(),
            account_type: None,
            sec_code: None,
        }
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn with_sec_code(mut self, sec_code: SecCode) -> Self {
        self.sec_code = Some(sec_code);
        self
    }
}

/// Canadian bank account details for a pre-authorized debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pad {
    pub name_on_account: String,
    pub account_number: String,
    pub transit_number: String,
    pub institution_number: String,
}

/// Reference to a stored or single-use token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReference {
    pub token: String,
}

/// How a bank-transfer payment is funded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankTransferPaymentMethod {
    Ach(Ach),
    Pad(Pad),
    SecureToken(TokenReference),
    SingleUseToken(TokenReference),
}

impl BankTransferPaymentMethod {
    pub fn secure_token(token: impl Into<String>) -> Self {
        Self::SecureToken(TokenReference {
            token: token.into(),
        })
    }

    pub fn single_use_token(token: impl Into<String>) -> Self {
        Self::SingleUseToken(TokenReference {
            token: token.into(),
        })
    }
}

impl From<Ach> for BankTransferPaymentMethod {
    fn from(ach: Ach) -> Self {
        Self::Ach(ach)
    }
}

impl From<Pad> for BankTransferPaymentMethod {
    fn from(pad: Pad) -> Self {
        Self::Pad(pad)
    }
}

impl Union for BankTransferPaymentMethod {
    const NAME: &'static str = "BankTransferPaymentMethod";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("ach", |v| Ok(Self::Ach(variant_payload::<Self, _>(v)?))),
        ("pad", |v| Ok(Self::Pad(variant_payload::<Self, _>(v)?))),
        ("secureToken", |v| {
            Ok(Self::SecureToken(variant_payload::<Self, _>(v)?))
        }),
        ("singleUseToken", |v| {
            Ok(Self::SingleUseToken(variant_payload::<Self, _>(v)?))
        }),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Ach(_) => "ach",
            Self::Pad(_) => "pad",
            Self::SecureToken(_) => "secureToken",
            Self::SingleUseToken(_) => "singleUseToken",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Ach(ach) => payload_of(ach),
            Self::Pad(pad) => payload_of(pad),
            Self::SecureToken(token) | Self::SingleUseToken(token) => payload_of(token),
        }
    }
}

union_serde!(BankTransferPaymentMethod);

/// Order details. `amount` is in the currency's minor unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferOrder {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl BankTransferOrder {
    pub fn new(order_id: impl Into<String>, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            description: None,
            amount,
            currency: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }
}

/// Body of `POST /bank-transfer-payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferPaymentRequest {
    pub processing_terminal_id: String,
    pub order: BankTransferOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub payment_method: BankTransferPaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
}

impl BankTransferPaymentRequest {
    pub fn new(
        processing_terminal_id: impl Into<String>,
        order: BankTransferOrder,
        payment_method: impl Into<BankTransferPaymentMethod>,
    ) -> Self {
        Self {
            processing_terminal_id: processing_terminal_id.into(),
            order,
            customer: None,
            payment_method: payment_method.into(),
            custom_fields: None,
        }
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_custom_fields(mut self, custom_fields: Vec<CustomField>) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }
}

/// Masked ACH account echoed back by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchSummary {
    pub name_on_account: String,
    pub account_number: String,
    pub routing_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_code: Option<SecCode>,
}

/// Masked PAD account echoed back by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PadSummary {
    pub name_on_account: String,
    pub account_number: String,
    pub transit_number: String,
    pub institution_number: String,
}

/// Account that funded a bank-transfer payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankAccount {
    Ach(AchSummary),
    Pad(PadSummary),
}

impl Union for BankAccount {
    const NAME: &'static str = "BankAccount";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("ach", |v| Ok(Self::Ach(variant_payload::<Self, _>(v)?))),
        ("pad", |v| Ok(Self::Pad(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Ach(_) => "ach",
            Self::Pad(_) => "pad",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Ach(ach) => payload_of(ach),
            Self::Pad(pad) => payload_of(pad),
        }
    }
}

union_serde!(BankAccount);

/// A bank-transfer payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferPayment {
    pub payment_id: String,
    pub processing_terminal_id: String,
    pub order: BankTransferOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
    pub transaction_result: TransactionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
}

/// Filters for `GET /bank-transfer-payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankTransferPaymentListParams {
    pub processing_terminal_id: Option<String>,
    pub order_id: Option<String>,
    pub page: PageParams,
}

/// `/bank-transfer-payments` calls.
pub struct BankTransferPayments<'a, T> {
    client: &'a PayrocClient<T>,
}

impl<'a, T: Transport> BankTransferPayments<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>) -> Self {
        Self { client }
    }

    pub fn create(
        &self,
        request: &BankTransferPaymentRequest,
        idempotency_key: &str,
    ) -> Result<BankTransferPayment> {
        self.client
            .create("/bank-transfer-payments", request, idempotency_key)
    }

    pub fn retrieve(&self, payment_id: &str) -> Result<BankTransferPayment> {
        self.client.get(&payment_path(payment_id))
    }

    pub fn list(
        &self,
        params: &BankTransferPaymentListParams,
    ) -> Result<Paginated<BankTransferPayment>> {
        let mut pairs = vec![
            (
                "processingTerminalId",
                params.processing_terminal_id.clone(),
            ),
            ("orderId", params.order_id.clone()),
        ];
        pairs.extend(params.page.pairs());
        self.client
            .get(&with_query("/bank-transfer-payments", &pairs))
    }

    /// Reverse a payment that has not yet been sent to the bank.
    pub fn reverse(&self, payment_id: &str, idempotency_key: &str) -> Result<BankTransferPayment> {
        let path = format!("{}/reverse", payment_path(payment_id));
        self.client.submit(&path, idempotency_key)
    }
}

fn payment_path(payment_id: &str) -> String {
    format!("/bank-transfer-payments/{}", urlencoding::encode(payment_id))
}
