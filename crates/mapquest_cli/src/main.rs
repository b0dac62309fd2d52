//! MapQuest CLI
//!
//! Forward, reverse and batch geocoding from the command line. Responses are
//! printed as pretty JSON on stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

mod cli;

use anyhow::Context;
use clap::Parser;
use mapquest::{Coordinates, GeocodingClient, Location, MapQuestClient, MapQuestConfig, ResponseExt};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, geocode_location, log_filter_from_verbosity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = MapQuestConfig::load().context("Failed to load MapQuest configuration")?;
    let config = cli.apply(config);

    let client = MapQuestClient::new(&config).context("Failed to create MapQuest client")?;

    let response = match &cli.command {
        Commands::Geocode {
            address,
            fields,
            query,
        } => {
            let location =
                geocode_location(address.as_deref(), fields).map_err(anyhow::Error::msg)?;
            client.geocode(location, &query.to_options()).await?
        },

        Commands::Reverse { coordinates, query } => {
            client
                .reverse_geocode(Coordinates::from(coordinates.as_str()), &query.to_options())
                .await?
        },

        Commands::Batch { addresses, query } => {
            let locations: Vec<Location> = addresses
                .iter()
                .map(|address| Location::from(address.as_str()))
                .collect();
            let submitted = locations.len();

            let response = client.batch_geocode(locations, &query.to_options()).await?;
            info!(
                submitted,
                returned = response.result_count(),
                "Batch geocode finished"
            );
            response
        },
    };

    if let Some(status) = response.status_code()
        && status != 0
    {
        warn!(status, messages = ?response.messages(), "MapQuest reported a problem");
    }

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
