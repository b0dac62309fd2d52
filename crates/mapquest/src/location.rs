//! Caller-facing location inputs
//!
//! Each input shape accepted by the geocoding operations is a variant of a
//! small enum. Conversion into the wire form happens once, when the query is
//! built, so the rest of the crate only ever sees normalized values.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MapQuestError;

/// A latitude/longitude pair as sent to MapQuest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate pair
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rectangle used to rank ambiguous results, upper-left and lower-right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Upper-left corner
    pub ul: LatLng,
    /// Lower-right corner
    pub lr: LatLng,
}

/// An address to geocode
///
/// Free text is sent as the `street` field and left to the service to parse.
/// Structured fields are passed through untouched, so any field name the
/// service understands (`adminArea5`, `postalCode`, ...) can be used.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Single-line address, e.g. `"1555 Blake St,Denver,CO,80202"`
    Text(String),
    /// Address split into named fields
    Fields(Map<String, Value>),
}

impl Location {
    /// Wire form of the location
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(text) => {
                let mut fields = Map::new();
                fields.insert("street".to_string(), Value::String(text.clone()));
                Value::Object(fields)
            },
            Self::Fields(fields) => Value::Object(fields.clone()),
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Map<String, Value>> for Location {
    fn from(value: Map<String, Value>) -> Self {
        Self::Fields(value)
    }
}

impl From<HashMap<String, String>> for Location {
    fn from(value: HashMap<String, String>) -> Self {
        // HashMap iteration order is unstable; sort so the payload is reproducible
        let sorted: BTreeMap<String, String> = value.into_iter().collect();
        Self::from(sorted)
    }
}

impl From<BTreeMap<String, String>> for Location {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Fields(
            value
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Location {
    fn from(value: [(&str, &str); N]) -> Self {
        Self::Fields(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        )
    }
}

impl From<Address> for Location {
    fn from(value: Address) -> Self {
        Self::Fields(value.into_fields())
    }
}

/// Typed builder for the common structured address fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    street: Option<String>,
    city: Option<String>,
    county: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl Address {
    /// Empty address
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Street line, e.g. `"1555 Blake St"`
    #[must_use]
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// City name
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// County name
    #[must_use]
    pub fn county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    /// State or province
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Postal / ZIP code
    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Country name or code
    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// True if no field has been set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn into_fields(self) -> Map<String, Value> {
        [
            ("street", self.street),
            ("city", self.city),
            ("county", self.county),
            ("state", self.state),
            ("postalCode", self.postal_code),
            ("country", self.country),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), Value::String(v))))
        .collect()
    }
}

/// A point to reverse geocode
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// `"lat,lng"`
    Text(String),
    /// Ordered `[lat, lng]`
    Sequence(Vec<f64>),
}

impl Coordinates {
    /// Parse into a coordinate pair
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless exactly two finite numbers are present.
    pub fn to_lat_lng(&self) -> Result<LatLng, MapQuestError> {
        let values = match self {
            Self::Text(text) => parse_floats(text, 2, "coordinates")?,
            Self::Sequence(values) => check_floats(values.clone(), 2, "coordinates")?,
        };
        Ok(LatLng::new(values[0], values[1]))
    }
}

impl From<&str> for Coordinates {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Coordinates {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for Coordinates {
    fn from(value: Vec<f64>) -> Self {
        Self::Sequence(value)
    }
}

impl From<&[f64]> for Coordinates {
    fn from(value: &[f64]) -> Self {
        Self::Sequence(value.to_vec())
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from(value: [f64; 2]) -> Self {
        Self::Sequence(value.to_vec())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::Sequence(vec![lat, lng])
    }
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Self::Sequence(vec![value.lat, value.lng])
    }
}

/// A bounding box as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingBoxInput {
    /// `"ul_lat,ul_lng,lr_lat,lr_lng"`
    Text(String),
    /// Ordered `[ul_lat, ul_lng, lr_lat, lr_lng]`
    Sequence(Vec<f64>),
}

impl BoundingBoxInput {
    /// Parse into upper-left / lower-right corners
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless exactly four finite numbers are present.
    pub fn to_bounding_box(&self) -> Result<BoundingBox, MapQuestError> {
        let values = match self {
            Self::Text(text) => parse_floats(text, 4, "bounding box")?,
            Self::Sequence(values) => check_floats(values.clone(), 4, "bounding box")?,
        };
        Ok(BoundingBox {
            ul: LatLng::new(values[0], values[1]),
            lr: LatLng::new(values[2], values[3]),
        })
    }
}

impl From<&str> for BoundingBoxInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BoundingBoxInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for BoundingBoxInput {
    fn from(value: Vec<f64>) -> Self {
        Self::Sequence(value)
    }
}

impl From<[f64; 4]> for BoundingBoxInput {
    fn from(value: [f64; 4]) -> Self {
        Self::Sequence(value.to_vec())
    }
}

impl From<BoundingBox> for BoundingBoxInput {
    fn from(value: BoundingBox) -> Self {
        Self::Sequence(vec![value.ul.lat, value.ul.lng, value.lr.lat, value.lr.lng])
    }
}

/// Split on commas and parse every token as a float
fn parse_floats(text: &str, expected: usize, what: &str) -> Result<Vec<f64>, MapQuestError> {
    let values = text
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| {
                MapQuestError::InvalidInput(format!("{what}: {token:?} is not a number"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_floats(values, expected, what)
}

fn check_floats(values: Vec<f64>, expected: usize, what: &str) -> Result<Vec<f64>, MapQuestError> {
    if values.len() != expected {
        return Err(MapQuestError::InvalidInput(format!(
            "{what}: expected {expected} values, got {}",
            values.len()
        )));
    }

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(MapQuestError::InvalidInput(format!(
            "{what}: {bad} is not a finite number"
        )));
    }

    Ok(values)
}
