//! Notifications: event subscriptions and their delivery channels.

use serde::{Deserialize, Serialize};

use crate::client::{with_query, PayrocClient};
use crate::error::Result;
use crate::patch::PatchDocument;
use crate::resources::common::{Metadata, PageParams, Paginated};
use crate::transport::Transport;
use crate::union::{payload_of, union_serde, variant_payload, Payload, Union, VariantDecoder};

/// Delivery settings for webhook notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub uri: String,
    pub secret: String,
    pub support_email_address: String,
}

/// Where events are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Webhook(Webhook),
}

impl Notification {
    pub fn webhook(
        uri: impl Into<String>,
        secret: impl Into<String>,
        support_email_address: impl Into<String>,
    ) -> Self {
        Self::Webhook(Webhook {
            uri: uri.into(),
            secret: secret.into(),
            support_email_address: support_email_address.into(),
        })
    }
}

impl Union for Notification {
    const NAME: &'static str = "Notification";
    const VARIANTS: &'static [(&'static str, VariantDecoder<Self>)] =
        &[("webhook", |v| Ok(Self::Webhook(variant_payload::<Self, _>(v)?)))];

    fn tag(&self) -> &'static str {
        match self {
            Self::Webhook(_) => "webhook",
        }
    }

    fn payload(&self) -> Result<Payload> {
        match self {
            Self::Webhook(webhook) => payload_of(webhook),
        }
    }
}

union_serde!(Notification);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionStatus {
    Registered,
    Suspended,
    Failed,
}

/// A subscription to one or more event types. Used as both request and response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    pub event_types: Vec<String>,
    pub notifications: Vec<Notification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl EventSubscription {
    pub fn new(enabled: bool, event_types: Vec<String>, notifications: Vec<Notification>) -> Self {
        Self {
            id: None,
            enabled,
            status: None,
            event_types,
            notifications,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Filters for `GET /event-subscriptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSubscriptionListParams {
    pub status: Option<SubscriptionStatus>,
    pub event: Option<String>,
    pub page: PageParams,
}

/// `/event-subscriptions` calls.
pub struct EventSubscriptions<'a, T> {
    client: &'a PayrocClient<T>,
}

impl<'a, T: Transport> EventSubscriptions<'a, T> {
    pub(crate) fn new(client: &'a PayrocClient<T>) -> Self {
        Self { client }
    }

    pub fn create(
        &self,
        subscription: &EventSubscription,
        idempotency_key: &str,
    ) -> Result<EventSubscription> {
        self.client
            .create("/event-subscriptions", subscription, idempotency_key)
    }

    pub fn retrieve(&self, subscription_id: i64) -> Result<EventSubscription> {
        self.client.get(&subscription_path(subscription_id))
    }

    pub fn list(
        &self,
        params: &EventSubscriptionListParams,
    ) -> Result<Paginated<EventSubscription>> {
        let status = params
            .status
            .map(|s| crate::codec::to_value(&s))
            .transpose()?
            .and_then(|v| v.as_str().map(str::to_string));
        let mut pairs = vec![("status", status), ("event", params.event.clone())];
        pairs.extend(params.page.pairs());
        self.client.get(&with_query("/event-subscriptions", &pairs))
    }

    pub fn update(&self, subscription_id: i64, subscription: &EventSubscription) -> Result<()> {
        self.client
            .update(&subscription_path(subscription_id), subscription)
    }

    pub fn partially_update(
        &self,
        subscription_id: i64,
        operations: &[PatchDocument],
    ) -> Result<EventSubscription> {
        self.client
            .partially_update(&subscription_path(subscription_id), operations)
    }

    pub fn delete(&self, subscription_id: i64) -> Result<()> {
        self.client.delete(&subscription_path(subscription_id))
    }
}

fn subscription_path(subscription_id: i64) -> String {
    format!("/event-subscriptions/{subscription_id}")
}
