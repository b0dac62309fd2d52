//! Query construction
//!
//! Turns a [`GeocodeRequest`] plus [`GeocodeOptions`] into the JSON body
//! MapQuest expects and the final request URL carrying it.
//!
//! The outer query string always has the same four pairs, in this order:
//! `key`, `inFormat=json`, `outFormat=json`, `json=<body>`.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::endpoint::{Endpoint, RequestKind};
use crate::error::MapQuestError;
use crate::location::{BoundingBox, BoundingBoxInput, Coordinates, LatLng, Location};

/// Limit value meaning "no limit"; the `maxResults` option is left out
pub const UNLIMITED: i32 = -1;

/// Per-call options shared by all request kinds
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeOptions {
    /// Maximum number of results per location, [`UNLIMITED`] for no limit
    pub limit: i32,
    /// Ask the service for a map thumbnail URL per result
    pub thumbnails: bool,
    /// Results inside this box are ranked first
    pub bounding_box: Option<BoundingBoxInput>,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            limit: UNLIMITED,
            thumbnails: true,
            bounding_box: None,
        }
    }
}

impl GeocodeOptions {
    /// Limit the number of results
    #[must_use]
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    /// Enable or disable thumbnail map URLs
    #[must_use]
    pub fn with_thumbnails(mut self, thumbnails: bool) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    /// Rank results inside the given box first
    #[must_use]
    pub fn with_bounding_box(mut self, bounding_box: impl Into<BoundingBoxInput>) -> Self {
        self.bounding_box = Some(bounding_box.into());
        self
    }

    /// Normalize into the wire `options` object
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the bounding box is malformed.
    pub fn to_query_options(&self) -> Result<QueryOptions, MapQuestError> {
        let bounding_box = self
            .bounding_box
            .as_ref()
            .map(BoundingBoxInput::to_bounding_box)
            .transpose()?;

        Ok(QueryOptions {
            max_results: (self.limit != UNLIMITED).then_some(self.limit),
            thumb_maps: (!self.thumbnails).then_some(false),
            bounding_box,
        })
    }
}

/// The `options` object of the JSON body
///
/// Only keys that differ from the service defaults are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// `maxResults`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    /// `thumbMaps`, only ever `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_maps: Option<bool>,
    /// `boundingBox`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl QueryOptions {
    /// True if no option is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_results.is_none() && self.thumb_maps.is_none() && self.bounding_box.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReverseLocation {
    lat_lng: LatLng,
}

/// JSON body sent in the `json` query parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<QueryOptions>,
}

impl QueryBody {
    /// The body as a JSON value
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Serialized body, as embedded in the URL
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the body cannot be serialized.
    pub fn to_json(&self) -> Result<String, MapQuestError> {
        serde_json::to_string(self)
            .map_err(|e| MapQuestError::InvalidInput(format!("query body: {e}")))
    }

    /// Options carried by the body, if any
    #[must_use]
    pub const fn options(&self) -> Option<&QueryOptions> {
        self.options.as_ref()
    }
}

/// A geocoding request before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeRequest {
    /// Forward geocode a single address
    Address(Location),
    /// Reverse geocode a single point
    Reverse(Coordinates),
    /// Forward geocode several addresses at once
    Batch(Vec<Location>),
}

impl GeocodeRequest {
    /// Request kind, which selects the endpoint path
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Address(_) => RequestKind::Geocode,
            Self::Reverse(_) => RequestKind::ReverseGeocode,
            Self::Batch(_) => RequestKind::BatchGeocode,
        }
    }

    /// Build the JSON body for this request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed coordinates or bounding boxes.
    pub fn to_body(&self, options: &GeocodeOptions) -> Result<QueryBody, MapQuestError> {
        let options = options.to_query_options()?;
        let options = (!options.is_empty()).then_some(options);

        let body = match self {
            Self::Address(location) => QueryBody {
                location: Some(location.to_value()),
                locations: None,
                options,
            },
            Self::Reverse(coordinates) => {
                let reverse = ReverseLocation {
                    lat_lng: coordinates.to_lat_lng()?,
                };
                QueryBody {
                    location: Some(
                        serde_json::to_value(reverse)
                            .map_err(|e| MapQuestError::InvalidInput(e.to_string()))?,
                    ),
                    locations: None,
                    options,
                }
            },
            Self::Batch(locations) => QueryBody {
                location: None,
                locations: Some(locations.iter().map(Location::to_value).collect()),
                options,
            },
        };

        Ok(body)
    }
}

/// A fully built request: endpoint URL with query string, plus its body
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    kind: RequestKind,
    url: Url,
    body: QueryBody,
}

impl PreparedQuery {
    /// Request kind
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Full request URL, including the API key
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// The JSON body carried in the `json` parameter
    #[must_use]
    pub const fn body(&self) -> &QueryBody {
        &self.body
    }

    /// Scheme, host and path only; safe to log
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}

/// Builds [`PreparedQuery`] values for one endpoint and API key
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    endpoint: Endpoint,
    api_key: SecretString,
}

impl QueryBuilder {
    /// Create a builder for the given endpoint and (already decoded) API key
    #[must_use]
    pub fn new(endpoint: Endpoint, api_key: SecretString) -> Self {
        Self { endpoint, api_key }
    }

    /// Resolved endpoint
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Normalize the request and assemble its URL
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed coordinates or bounding boxes.
    pub fn build(
        &self,
        request: &GeocodeRequest,
        options: &GeocodeOptions,
    ) -> Result<PreparedQuery, MapQuestError> {
        let kind = request.kind();
        let body = request.to_body(options)?;
        let json = body.to_json()?;

        let mut url = self.endpoint.url(kind);
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret())
            .append_pair("inFormat", "json")
            .append_pair("outFormat", "json")
            .append_pair("json", &json);

        Ok(PreparedQuery { kind, url, body })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::endpoint::DataTier;
    use crate::location::Address;

    fn builder() -> QueryBuilder {
        let endpoint = Endpoint::new(DataTier::Open, false, None).unwrap();
        QueryBuilder::new(endpoint, SecretString::from("test-key".to_string()))
    }

    fn body(request: &GeocodeRequest, options: &GeocodeOptions) -> Value {
        request.to_body(options).unwrap().to_value()
    }

    #[test]
    fn test_geocode_text_body() {
        let request = GeocodeRequest::Address("1555 Blake St,Denver,CO,80202".into());
        assert_eq!(
            body(&request, &GeocodeOptions::default()),
            json!({ "location": { "street": "1555 Blake St,Denver,CO,80202" } })
        );
    }

    #[test]
    fn test_geocode_fields_body() {
        let address = Address::new()
            .street("1555 Blake St")
            .city("Denver")
            .state("CO")
            .postal_code("80202");
        let request = GeocodeRequest::Address(address.into());
        assert_eq!(
            body(&request, &GeocodeOptions::default()),
            json!({
                "location": {
                    "street": "1555 Blake St",
                    "city": "Denver",
                    "state": "CO",
                    "postalCode": "80202"
                }
            })
        );
    }

    #[test]
    fn test_reverse_body_text_and_pair() {
        let expected = json!({
            "location": { "latLng": { "lat": 39.7505568, "lng": -104.9996268 } }
        });

        let request = GeocodeRequest::Reverse("39.7505568,-104.9996268".into());
        assert_eq!(body(&request, &GeocodeOptions::default()), expected);

        let request = GeocodeRequest::Reverse([39.7505568, -104.9996268].into());
        assert_eq!(body(&request, &GeocodeOptions::default()), expected);
    }

    #[test]
    fn test_reverse_body_invalid() {
        let request = GeocodeRequest::Reverse("39.75".into());
        let err = request.to_body(&GeocodeOptions::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_batch_body_mixed() {
        let request = GeocodeRequest::Batch(vec![
            "1555 Blake St,Denver,CO,80202".into(),
            Address::new().street("2590 Pearl St").city("Boulder").into(),
        ]);
        assert_eq!(
            body(&request, &GeocodeOptions::default()),
            json!({
                "locations": [
                    { "street": "1555 Blake St,Denver,CO,80202" },
                    { "street": "2590 Pearl St", "city": "Boulder" }
                ]
            })
        );
    }

    #[test]
    fn test_batch_body_empty() {
        let request = GeocodeRequest::Batch(Vec::new());
        assert_eq!(
            body(&request, &GeocodeOptions::default()),
            json!({ "locations": [] })
        );
    }

    #[test]
    fn test_default_options_omitted() {
        let options = GeocodeOptions::default().to_query_options().unwrap();
        assert!(options.is_empty());

        let request = GeocodeRequest::Address("Red Lion, DE".into());
        let value = body(&request, &GeocodeOptions::default());
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_thumbnails_disabled() {
        let request = GeocodeRequest::Address("Red Lion, DE".into());
        let value = body(&request, &GeocodeOptions::default().with_thumbnails(false));
        assert_eq!(value["options"], json!({ "thumbMaps": false }));
    }

    #[test]
    fn test_thumbnails_enabled_not_sent() {
        let request = GeocodeRequest::Address("Red Lion, DE".into());
        let options = GeocodeOptions::default().with_thumbnails(true).with_limit(3);
        let value = body(&request, &options);
        assert_eq!(value["options"], json!({ "maxResults": 3 }));
    }

    #[test]
    fn test_limit_sentinel() {
        let options = GeocodeOptions::default().with_limit(UNLIMITED);
        assert!(options.to_query_options().unwrap().max_results.is_none());

        let options = GeocodeOptions::default().with_limit(1);
        assert_eq!(options.to_query_options().unwrap().max_results, Some(1));

        // Only the exact sentinel is dropped
        let options = GeocodeOptions::default().with_limit(-5);
        assert_eq!(options.to_query_options().unwrap().max_results, Some(-5));
    }

    #[test]
    fn test_all_options() {
        let options = GeocodeOptions::default()
            .with_limit(1)
            .with_thumbnails(false)
            .with_bounding_box("39.715056,-75.811158,39.5098,-75.491781");
        let request = GeocodeRequest::Address("Red Lion, DE".into());

        assert_eq!(
            body(&request, &options),
            json!({
                "location": { "street": "Red Lion, DE" },
                "options": {
                    "maxResults": 1,
                    "thumbMaps": false,
                    "boundingBox": {
                        "ul": { "lat": 39.715056, "lng": -75.811158 },
                        "lr": { "lat": 39.5098, "lng": -75.491781 }
                    }
                }
            })
        );
    }

    #[test]
    fn test_invalid_bounding_box() {
        let options = GeocodeOptions::default().with_bounding_box("39.7,-75.8");
        let request = GeocodeRequest::Address("Red Lion, DE".into());
        assert!(request.to_body(&options).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_build_url_and_pair_order() {
        let request = GeocodeRequest::Address("1555 Blake St,Denver,CO,80202".into());
        let query = builder().build(&request, &GeocodeOptions::default()).unwrap();

        assert_eq!(query.kind(), RequestKind::Geocode);
        assert_eq!(
            query.redacted_url(),
            "http://open.mapquestapi.com/geocoding/v1/address"
        );

        let pairs: Vec<(String, String)> = query.url().query_pairs().into_owned().collect();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["key", "inFormat", "outFormat", "json"]);
        assert_eq!(pairs[0].1, "test-key");
        assert_eq!(pairs[1].1, "json");
        assert_eq!(pairs[2].1, "json");

        let sent: Value = serde_json::from_str(&pairs[3].1).unwrap();
        assert_eq!(sent, query.body().to_value());
    }

    #[test]
    fn test_build_encodes_json() {
        let request = GeocodeRequest::Address("1555 Blake St,Denver,CO,80202".into());
        let query = builder().build(&request, &GeocodeOptions::default()).unwrap();

        let raw = query.url().query().unwrap();
        assert!(raw.starts_with("key=test-key&inFormat=json&outFormat=json&json="));
        assert!(!raw.contains('{'));
        assert!(!raw.contains(' '));
    }

    #[test]
    fn test_build_paths_per_kind() {
        let builder = builder();
        let options = GeocodeOptions::default();

        let query = builder
            .build(&GeocodeRequest::Reverse((39.75, -104.99).into()), &options)
            .unwrap();
        assert!(query.redacted_url().ends_with("/geocoding/v1/reverse"));

        let query = builder
            .build(&GeocodeRequest::Batch(vec!["Denver, CO".into()]), &options)
            .unwrap();
        assert!(query.redacted_url().ends_with("/geocoding/v1/batch"));
    }

    #[test]
    fn test_redacted_url_hides_key() {
        let request = GeocodeRequest::Address("Denver, CO".into());
        let query = builder().build(&request, &GeocodeOptions::default()).unwrap();
        assert!(!query.redacted_url().contains("test-key"));
    }
}
