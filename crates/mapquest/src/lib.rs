//! MapQuest geocoding client
//!
//! Forward, reverse and batch geocoding against the
//! [MapQuest Geocoding API](https://developer.mapquest.com/documentation/geocoding-api/).
//!
//! # Architecture
//!
//! [`QueryBuilder`] normalizes caller input ([`Location`], [`Coordinates`],
//! [`GeocodeOptions`]) into the JSON body and URL MapQuest expects.
//! [`Transport`] performs the HTTP round trip, implemented by [`HttpTransport`].
//! [`MapQuestClient`] combines both behind the [`GeocodingClient`] trait.
//! Responses are returned as raw JSON; [`ResponseExt`] offers a few accessors.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapquest::{GeocodeOptions, GeocodingClient, MapQuestClient, MapQuestConfig};
//!
//! let client = MapQuestClient::new(&MapQuestConfig::new("my-api-key"))?;
//!
//! let response = client
//!     .geocode("1555 Blake St,Denver,CO,80202".into(), &GeocodeOptions::default())
//!     .await?;
//!
//! let response = client
//!     .reverse_geocode([39.7505568, -104.9996268].into(), &GeocodeOptions::default())
//!     .await?;
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod location;
mod query;
mod response;
mod transport;
mod urlencoding;

pub use client::{GeocodingClient, MapQuestClient};
pub use config::MapQuestConfig;
pub use endpoint::{DataTier, Endpoint, RequestKind};
pub use error::{MapQuestError, TransportError};
pub use location::{Address, BoundingBox, BoundingBoxInput, Coordinates, LatLng, Location};
pub use query::{
    GeocodeOptions, GeocodeRequest, PreparedQuery, QueryBody, QueryBuilder, QueryOptions,
    UNLIMITED,
};
pub use response::ResponseExt;
pub use transport::{HttpTransport, Transport};
