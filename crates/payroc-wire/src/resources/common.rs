//! Types shared across resources.

use serde::{Deserialize, Serialize};

use crate::resources::boarding::ContactMethod;
use crate::value::Object;

/// Free-form key/value data attached to a resource. Keys keep insertion order;
/// values may be any JSON, including `null`.
pub type Metadata = Object;

/// ISO 4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
    Eur,
    Gbp,
    Aud,
    Mxn,
}

/// Free-form name/value pair echoed back on the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

impl CustomField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// HATEOAS link to a related resource or page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub method: String,
    pub href: String,
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Link with the given relation, e.g. `"next"`.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.rel == rel)
    }
}

/// Cursor parameters common to every list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl PageParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 3] {
        [
            ("before", self.before.clone()),
            ("after", self.after.clone()),
            ("limit", self.limit.map(|l| l.to_string())),
        ]
    }
}

/// Customer details sent with a payment or token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_methods: Vec<ContactMethod>,
}

impl Customer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notification_language(mut self, language: impl Into<String>) -> Self {
        self.notification_language = Some(language.into());
        self
    }

    pub fn with_contact_method(mut self, method: ContactMethod) -> Self {
        self.contact_methods.push(method);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Payment,
    Refund,
    PreAuthorization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus {
    Ready,
    Pending,
    Declined,
    Complete,
    Returned,
    Reversal,
}

/// Outcome reported by the processor. `type` is plain data, not a union tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
}
