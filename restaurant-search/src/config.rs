//! Provider configuration with sensible defaults.
//!
//! [`SearchConfig`] controls where the relay providers live, how long each
//! relay request may take, and which User-Agent they send. The aggregator
//! itself imposes no timeout; the per-request timeout here is the only
//! bound on a hung relay.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for the provider adapters.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour. Deserializable so hosts can embed
/// it in their own config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Origin of the service exposing the relay endpoints.
    ///
    /// Must be a bare origin (`scheme://host[:port]`). Relay paths are
    /// absolute and replace any path, so a prefix here would be dropped.
    pub relay_base_url: String,
    /// Path of the Yelp scrape relay.
    pub yelp_path: String,
    /// Path of the Google Maps places relay.
    pub google_maps_path: String,
    /// Path of the Apify scraping-actor relay.
    pub apify_path: String,
    /// Per-request HTTP timeout for relay calls, in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string for relay calls.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relay_base_url: "http://127.0.0.1:3001".to_owned(),
            yelp_path: "/api/yelp/restaurants".to_owned(),
            google_maps_path: "/api/google-places/restaurants".to_owned(),
            apify_path: "/api/apify/restaurants".to_owned(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `relay_base_url` is an `http`/`https` origin with no path
    /// - every relay path starts with `/`
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        self.relay_origin()?;
        for (field, path) in [
            ("yelp_path", &self.yelp_path),
            ("google_maps_path", &self.google_maps_path),
            ("apify_path", &self.apify_path),
        ] {
            if !path.starts_with('/') {
                return Err(SearchError::Config(format!("{field} must start with '/'")));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse `relay_base_url`, rejecting anything but a bare http(s) origin.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] describing the first problem found.
    pub fn relay_origin(&self) -> Result<url::Url, SearchError> {
        let base = url::Url::parse(&self.relay_base_url)
            .map_err(|e| SearchError::Config(format!("relay_base_url is invalid: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "relay_base_url must use http or https".into(),
            ));
        }
        if base.path() != "/" || base.query().is_some() || base.fragment().is_some() {
            return Err(SearchError::Config(format!(
                "relay_base_url must be a bare origin without path or query, got {base}"
            )));
        }
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.relay_base_url, "http://127.0.0.1:3001");
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn malformed_base_url_rejected() {
        let config = SearchConfig {
            relay_base_url: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("relay_base_url"));
    }

    #[test]
    fn non_http_scheme_rejected() {
        let config = SearchConfig {
            relay_base_url: "ftp://relay.example".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_with_path_prefix_rejected() {
        for base in [
            "http://gw.local/prefix",
            "http://gw.local/prefix/",
            "http://gw.local/?key=1",
        ] {
            let config = SearchConfig {
                relay_base_url: base.into(),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("bare origin"), "{base}: {err}");
        }
    }

    #[test]
    fn bare_origin_accepted_with_or_without_slash() {
        for base in ["http://gw.local:8080", "https://gw.local/"] {
            let config = SearchConfig {
                relay_base_url: base.into(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{base}");
        }
    }

    #[test]
    fn relative_path_rejected() {
        let config = SearchConfig {
            apify_path: "api/apify".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("apify_path"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"timeout_seconds": 3}"#).expect("deserialize");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.yelp_path, "/api/yelp/restaurants");
    }
}
