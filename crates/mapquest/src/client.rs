//! MapQuest geocoding client
//!
//! Ties configuration, query building and transport together. Every public
//! operation is exactly one GET round trip; input errors are reported before
//! anything is sent.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::MapQuestConfig;
use crate::endpoint::Endpoint;
use crate::error::MapQuestError;
use crate::location::{Coordinates, Location};
use crate::query::{GeocodeOptions, GeocodeRequest, PreparedQuery, QueryBuilder};
use crate::transport::{HttpTransport, Transport};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Look up the coordinates of an address
    async fn geocode(
        &self,
        location: Location,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError>;

    /// Look up the address at a point
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError>;

    /// Look up several addresses in one request
    async fn batch_geocode(
        &self,
        locations: Vec<Location>,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError>;
}

/// Client for the MapQuest geocoding API
///
/// Holds no mutable state, so one instance can be shared between tasks.
pub struct MapQuestClient {
    builder: QueryBuilder,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for MapQuestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapQuestClient")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl MapQuestClient {
    /// Create a new client backed by an HTTP transport
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &MapQuestConfig) -> Result<Self, MapQuestError> {
        let transport = HttpTransport::new(config.timeout_secs, &config.headers)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid.
    pub fn with_transport(
        config: &MapQuestConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, MapQuestError> {
        config.validate().map_err(MapQuestError::Configuration)?;

        let endpoint = Endpoint::new(config.data, config.ssl, config.base_url.as_deref())?;
        let builder = QueryBuilder::new(endpoint, config.resolved_api_key());

        Ok(Self { builder, transport })
    }

    /// Build the request that an operation would send, without sending it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed coordinates or bounding boxes.
    pub fn prepare(
        &self,
        request: &GeocodeRequest,
        options: &GeocodeOptions,
    ) -> Result<PreparedQuery, MapQuestError> {
        self.builder.build(request, options)
    }

    /// Build and send a request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` before sending anything if the request is
    /// malformed, `Transport` if the round trip fails.
    pub async fn execute(
        &self,
        request: &GeocodeRequest,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError> {
        let query = self.prepare(request, options)?;
        debug!(kind = %query.kind(), url = %query.redacted_url(), "Sending geocoding request");

        let response = self.transport.get_json(query.url()).await?;
        Ok(response)
    }
}

#[async_trait]
impl GeocodingClient for MapQuestClient {
    #[instrument(skip(self, options))]
    async fn geocode(
        &self,
        location: Location,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError> {
        self.execute(&GeocodeRequest::Address(location), options).await
    }

    #[instrument(skip(self, options))]
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError> {
        self.execute(&GeocodeRequest::Reverse(coordinates), options).await
    }

    #[instrument(skip(self, locations, options), fields(count = locations.len()))]
    async fn batch_geocode(
        &self,
        locations: Vec<Location>,
        options: &GeocodeOptions,
    ) -> Result<Value, MapQuestError> {
        self.execute(&GeocodeRequest::Batch(locations), options).await
    }
}
