//! Endpoint selection
//!
//! Maps (data tier, request kind) to the MapQuest host and path. The table is
//! fixed at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::MapQuestError;

/// Which MapQuest deployment serves the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DataTier {
    /// OpenStreetMap-backed open data
    #[default]
    Open,
    /// Licensed commercial data
    Licensed,
}

impl DataTier {
    /// Hostname serving this tier
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Open => "open.mapquestapi.com",
            Self::Licensed => "www.mapquestapi.com",
        }
    }

    /// Lowercase tier name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Licensed => "licensed",
        }
    }
}

/// Anything other than `licensed` selects the open tier.
impl From<&str> for DataTier {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("licensed") {
            Self::Licensed
        } else {
            Self::Open
        }
    }
}

impl From<String> for DataTier {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for DataTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three geocoding request types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Address to coordinates
    Geocode,
    /// Coordinates to address
    ReverseGeocode,
    /// Several addresses in one call
    BatchGeocode,
}

impl RequestKind {
    /// Path of the geocoding API endpoint for this request kind
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Geocode => "/geocoding/v1/address",
            Self::ReverseGeocode => "/geocoding/v1/reverse",
            Self::BatchGeocode => "/geocoding/v1/batch",
        }
    }

    /// Short name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geocode => "geocode",
            Self::ReverseGeocode => "reverse_geocode",
            Self::BatchGeocode => "batch_geocode",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme for the TLS flag
#[must_use]
pub const fn scheme(ssl: bool) -> &'static str {
    if ssl { "https" } else { "http" }
}

/// Resolved scheme and authority that request paths are appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Resolve the endpoint for a tier and TLS flag
    ///
    /// `base_url` replaces the tier/TLS lookup entirely when given. Only its
    /// scheme and authority are used.
    pub fn new(tier: DataTier, ssl: bool, base_url: Option<&str>) -> Result<Self, MapQuestError> {
        let raw = base_url.map_or_else(
            || format!("{}://{}", scheme(ssl), tier.host()),
            ToString::to_string,
        );

        let base = Url::parse(&raw)
            .map_err(|e| MapQuestError::Configuration(format!("invalid base URL {raw:?}: {e}")))?;

        if base.cannot_be_a_base() {
            return Err(MapQuestError::Configuration(format!(
                "base URL {raw:?} cannot carry a path"
            )));
        }

        Ok(Self { base })
    }

    /// Full URL for a request kind, without a query string
    #[must_use]
    pub fn url(&self, kind: RequestKind) -> Url {
        let mut url = self.base.clone();
        url.set_path(kind.path());
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Scheme in use (`http` or `https`)
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.base.scheme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_hosts() {
        assert_eq!(DataTier::Open.host(), "open.mapquestapi.com");
        assert_eq!(DataTier::Licensed.host(), "www.mapquestapi.com");
    }

    #[test]
    fn test_tier_fallback() {
        assert_eq!(DataTier::from("licensed"), DataTier::Licensed);
        assert_eq!(DataTier::from("LICENSED"), DataTier::Licensed);
        assert_eq!(DataTier::from("open"), DataTier::Open);
        assert_eq!(DataTier::from("premium"), DataTier::Open);
        assert_eq!(DataTier::from(""), DataTier::Open);
    }

    #[test]
    fn test_tier_serde() {
        let tier: DataTier = serde_json::from_str(r#""licensed""#).unwrap();
        assert_eq!(tier, DataTier::Licensed);

        let tier: DataTier = serde_json::from_str(r#""enterprise""#).unwrap();
        assert_eq!(tier, DataTier::Open);

        assert_eq!(serde_json::to_string(&DataTier::Licensed).unwrap(), r#""licensed""#);
    }

    #[test]
    fn test_request_paths() {
        assert_eq!(RequestKind::Geocode.path(), "/geocoding/v1/address");
        assert_eq!(RequestKind::ReverseGeocode.path(), "/geocoding/v1/reverse");
        assert_eq!(RequestKind::BatchGeocode.path(), "/geocoding/v1/batch");
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoint = Endpoint::new(DataTier::Open, false, None).unwrap();
        assert_eq!(
            endpoint.url(RequestKind::Geocode).as_str(),
            "http://open.mapquestapi.com/geocoding/v1/address"
        );

        let endpoint = Endpoint::new(DataTier::Licensed, true, None).unwrap();
        assert_eq!(endpoint.scheme(), "https");
        assert_eq!(
            endpoint.url(RequestKind::BatchGeocode).as_str(),
            "https://www.mapquestapi.com/geocoding/v1/batch"
        );
    }

    #[test]
    fn test_endpoint_base_override() {
        let endpoint =
            Endpoint::new(DataTier::Licensed, true, Some("http://127.0.0.1:8080/ignored")).unwrap();
        assert_eq!(
            endpoint.url(RequestKind::ReverseGeocode).as_str(),
            "http://127.0.0.1:8080/geocoding/v1/reverse"
        );
    }

    #[test]
    fn test_endpoint_invalid_override() {
        let err = Endpoint::new(DataTier::Open, false, Some("not a url")).unwrap_err();
        assert!(matches!(err, MapQuestError::Configuration(_)));

        let err = Endpoint::new(DataTier::Open, false, Some("mailto:geo@example.com")).unwrap_err();
        assert!(matches!(err, MapQuestError::Configuration(_)));
    }
}
