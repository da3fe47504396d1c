//! Client configuration.
//!
//! Deserializable from JSON so callers can keep it next to their own settings:
//!
//! ```json
//! {
//!   "base_url": "https://api.uat.payroc.com/v1",
//!   "default_headers": { "X-Request-Source": "pos-gateway" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WireError};

/// Production API root.
pub const PRODUCTION_BASE_URL: &str = "https://api.payroc.com/v1";

/// Immutable settings shared by every call made through a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root that resource paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Headers added to every request before per-call headers.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    PRODUCTION_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Check that the base URL is an http(s) URL and that headers are safe to send.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.base()?;
        for (name, value) in &self.default_headers {
            if name.is_empty() || name.contains([':', ' ']) {
                return Err(WireError::Config(format!("invalid header name: {name:?}")));
            }
            if has_line_break(name) || has_line_break(value) {
                return Err(WireError::Config(format!(
                    "header {name:?} contains a line break"
                )));
            }
        }
        Ok(())
    }

    /// Resolve a resource path, query string included, against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base()?
            .join(path.trim_start_matches('/'))
            .map_err(|err| WireError::Config(format!("cannot resolve {path:?}: {err}")))
    }

    /// Parsed base URL whose path ends in `/`, so joins append rather than replace.
    fn base(&self) -> Result<Url> {
        let raw = self.base_url.trim();
        if raw.is_empty() {
            return Err(WireError::Config("base_url is empty".to_string()));
        }
        let mut url = Url::parse(raw)
            .map_err(|err| WireError::Config(format!("invalid base_url {raw:?}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WireError::Config(format!(
                "base_url must use http or https: {raw}"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(WireError::Config(format!(
                "base_url must not carry a query or fragment: {raw}"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_with_single_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            config.url_for("/contacts/1").unwrap().as_str(),
            "http://localhost:8080/v1/contacts/1"
        );
    }

    #[test]
    fn url_for_appends_to_base_path_without_trailing_slash() {
        let config = ClientConfig::default();
        assert_eq!(
            config.url_for("secure-tokens?limit=5").unwrap().as_str(),
            "https://api.payroc.com/v1/secure-tokens?limit=5"
        );
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let config = ClientConfig::default().with_base_url("https://");
        assert!(matches!(config.validate(), Err(WireError::Config(_))));
        let config = ClientConfig::default().with_base_url("https://api.payroc.com/v1?x=1");
        assert!(matches!(config.validate(), Err(WireError::Config(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn header_injection_is_rejected() {
        let config = ClientConfig::default().with_header("X-Test", "a\r\nb");
        assert!(matches!(config.validate(), Err(WireError::Config(_))));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ClientConfig::from_json(r#"{"base_url":"ftp://example.com"}"#).unwrap_err();
        assert!(matches!(err, WireError::Config(_)));
    }
}
