//! Boarding: merchant contacts and the contact-method union.

use serde::{Deserialize, Serialize};

use crate::client::PayrocClient;
use crate::error::Result;
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

/// Payload shared by every contact-method variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactValue {
    pub value: String,
}

/// How to reach a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMethod {
    Email(ContactValue),
    Phone(ContactValue),
    Mobile(ContactValue),
    Fax(ContactValue),
}

impl ContactMethod {
    pub fn email(value: impl Into<String>) -> Self {
        Self::Email(ContactValue {
            value: value.into(),
        })
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self::Phone(ContactValue {
            value: value.into(),
        })
    }

    pub fn mobile(value: impl Into<String>) -> Self {
        Self::Mobile(ContactValue {
            value: value.into(),
        })
    }

    pub fn fax(value: impl Into<String>) -> Self {
        Self::Fax(ContactValue {
            value: value.into(),
        })
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Email(c) | Self::Phone(c) | Self::Mobile(c) | Self::Fax(c) => &c.value,
        }
    }
}

impl Union for ContactMethod {
    const NAME: &'static str = "ContactMethod";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] = &[
        ("email", |v| Ok(Self::Email(variant_payload::<Self, _>(v)?))),
        ("phone", |v| Ok(Self::Phone(variant_payload::<Self, _>(v)?))),
        ("mobile", |v| Ok(Self::Mobile(variant_payload::<Self, _>(v)?))),
        ("fax", |v| Ok(Self::Fax(variant_payload::<Self, _>(v)?))),
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::Mobile(_) => "mobile",
            Self::Fax(_) => "fax",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Email(c) | Self::Phone(c) | Self::Mobile(c) | Self::Fax(c) => payload_of(c),
        }
    }
}

union_serde!(ContactMethod);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactType {
    Manager,
    Representative,
    Others,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierType {
    NationalId,
}

/// Government identifier of a contact. `type` here is plain data, not a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub identifier_type: IdentifierType,
    pub value: String,
}

impl Identifier {
    pub fn national_id(value: impl Into<String>) -> Self {
        Self {
            identifier_type: IdentifierType::NationalId,
            value: value.into(),
        }
    }
}

/// A person associated with a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub identifiers: Vec<Identifier>,
    pub contact_methods: Vec<ContactMethod>,
}

impl Contact {
    pub fn new(
        contact_type: ContactType,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        identifiers: Vec<Identifier>,
        contact_methods: Vec<ContactMethod>,
    ) -> Self {
        Self {
            contact_id: None,
            contact_type,
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            identifiers,
            contact_methods,
        }
    }

    pub fn with_contact_id(mut self, contact_id: i64) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }
}

/// `/contacts` calls.
pub struct Contacts<'a, T> {
    client: &'a PayrocClient<T>,
}

impl<'a, T: Transport> Contacts<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>) -> Self {
        Self { client }
    }

    pub fn retrieve(&self, contact_id: i64) -> Result<Contact> {
        self.client.get(&contact_path(contact_id))
    }

    pub fn update(&self, contact_id: i64, contact: &Contact) -> Result<()> {
        self.client.update(&contact_path(contact_id), contact)
    }

    pub fn delete(&self, contact_id: i64) -> Result<()> {
        self.client.delete(&contact_path(contact_id))
    }
}

fn contact_path(contact_id: i64) -> String {
    format!("/contacts/{contact_id}")
}
