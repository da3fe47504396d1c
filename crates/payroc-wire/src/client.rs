//! Resource dispatch: typed calls -> [`WireRequest`]s -> typed responses.
//!
//! [`PayrocClient`] owns the configuration and a [`Transport`]. Resource
//! handles (`client.event_subscriptions()`, ...) borrow it and map each call
//! onto one of a handful of verbs:
//!
//! | verb | method | body | `Idempotency-Key` |
//! |---|---|---|---|
//! | create | `POST` | model | yes |
//! | submit | `POST` | none | yes |
//! | retrieve / list | `GET` | none | no |
//! | update | `PUT` | model | no |
//! | partially update | `PATCH` | patch documents | no |
//! | delete | `DELETE` | none | no |

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;
use url::form_urlencoded;

use crate::codec;
use crate::config::ClientConfig;
use crate::error::{Result, WireError};
use crate::patch::PatchDocument;
use crate::resources::bank_transfer_payments::BankTransferPayments;
use crate::resources::boarding::Contacts;
use crate::resources::card_payments::Payments;
use crate::resources::funding::FundingInstructions;
use crate::resources::notifications::EventSubscriptions;
use crate::resources::tokenization::SecureTokens;
use crate::transport::{Method, Transport, WireRequest, WireResponse};

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Entry point for API calls.
#[derive(Debug)]
pub struct PayrocClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> PayrocClient<T> {
    /// Build a client after validating `config`.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn bank_transfer_payments(&self) -> BankTransferPayments<'_, T> {
        BankTransferPayments::new(self)
    }

    pub fn payments(&self) -> Payments<'_, T> {
        Payments::new(self)
    }

    pub fn event_subscriptions(&self) -> EventSubscriptions<'_, T> {
        EventSubscriptions::new(self)
    }

    pub fn contacts(&self) -> Contacts<'_, T> {
        Contacts::new(self)
    }

    pub fn funding_instructions(&self) -> FundingInstructions<'_, T> {
        FundingInstructions::new(self)
    }

    /// Secure tokens are scoped to a processing terminal.
    pub fn secure_tokens<'a>(&'a self, processing_terminal_id: &'a str) -> SecureTokens<'a, T> {
        SecureTokens::new(self, processing_terminal_id)
    }

    pub(crate) fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.execute(Method::Get, path, None, None)?;
        codec::decode(&response.body)
    }

    /// `POST` with an idempotency key; used by create and submit style calls.
    pub(crate) fn create<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: &str,
    ) -> Result<R> {
        let key = require_idempotency_key(idempotency_key)?;
        let body = codec::encode(body)?;
        let response = self.execute(Method::Post, path, Some(body), Some(key))?;
        codec::decode(&response.body)
    }

    /// Body-less `POST` with an idempotency key; used by action endpoints.
    pub(crate) fn submit<R: DeserializeOwned>(&self, path: &str, idempotency_key: &str) -> Result<R> {
        let key = require_idempotency_key(idempotency_key)?;
        let response = self.execute(Method::Post, path, None, Some(key))?;
        codec::decode(&response.body)
    }

    /// `PUT` a full replacement. The response body is not read.
    pub(crate) fn update<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = codec::encode(body)?;
        self.execute(Method::Put, path, Some(body), None)?;
        Ok(())
    }

    pub(crate) fn partially_update<R: DeserializeOwned>(
        &self,
        path: &str,
        operations: &[PatchDocument],
    ) -> Result<R> {
        let body = codec::encode(&operations)?;
        let response = self.execute(Method::Patch, path, Some(body), None)?;
        codec::decode(&response.body)
    }

    pub(crate) fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::Delete, path, None, None)?;
        Ok(())
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        idempotency_key: Option<&str>,
    ) -> Result<WireResponse> {
        let request = self.build_request(method, path, body, idempotency_key)?;
        let response = self.transport.send(&request)?;
        tracing::debug!(status = response.status, "response received");
        if !response.is_success() {
            tracing::warn!(status = response.status, "request rejected by API");
            return Err(WireError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        idempotency_key: Option<&str>,
    ) -> Result<WireRequest> {
        let mut headers: Vec<(String, String)> = self
            .config
            .default_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.push(("Accept".to_string(), JSON_CONTENT_TYPE.to_string()));
        if body.is_some() {
            headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
        }
        if let Some(key) = idempotency_key {
            headers.push((IDEMPOTENCY_KEY_HEADER.to_string(), key.to_string()));
        }
        Ok(WireRequest {
            method,
            path: path.to_string(),
            url: self.config.url_for(path)?.to_string(),
            headers,
            body,
        })
    }
}

fn require_idempotency_key(key: &str) -> Result<&str> {
    if key.trim().is_empty() {
        return Err(WireError::MissingRequiredField {
            model: "request",
            field: IDEMPOTENCY_KEY_HEADER.to_string(),
        });
    }
    Ok(key)
}

/// Append `?k=v&...` for the pairs present; `path` is returned as-is when none are.
pub(crate) fn with_query(path: &str, pairs: &[(&str, Option<String>)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(
            pairs
                .iter()
                .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value))),
        )
        .finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_form_encoded() {
        let path = with_query("/event-subscriptions", &[("event", Some("a b&c=d".to_string()))]);
        assert_eq!(path, "/event-subscriptions?event=a+b%26c%3Dd");
    }

    #[test]
    fn absent_query_values_are_dropped() {
        let path = with_query(
            "/contacts",
            &[("limit", Some("10".to_string())), ("after", None)],
        );
        assert_eq!(path, "/contacts?limit=10");
        assert_eq!(with_query("/contacts", &[("after", None)]), "/contacts");
    }

    #[test]
    fn blank_idempotency_key_is_rejected() {
        assert!(require_idempotency_key("  ").is_err());
        assert_eq!(require_idempotency_key("8e03978e").unwrap(), "8e03978e");
    }
}
