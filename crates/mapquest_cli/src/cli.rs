//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use mapquest::{Address, DataTier, GeocodeOptions, Location, MapQuestConfig, UNLIMITED};

/// MapQuest geocoding CLI
#[derive(Debug, Parser)]
#[command(name = "mapquest")]
#[command(author, version, about = "MapQuest geocoding from the command line", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// MapQuest developer API key (may be percent-encoded)
    #[arg(long, env = "MAPQUEST_API_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// Query licensed data instead of open data
    #[arg(long, global = true)]
    pub licensed: bool,

    /// Use HTTPS
    #[arg(long, global = true)]
    pub ssl: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Extra request header, repeatable
    ///
    /// Example: --header "User-Agent: my-app/1.0"
    #[arg(long = "header", value_name = "NAME:VALUE", value_parser = parse_header, global = true)]
    pub headers: Vec<(String, String)>,

    /// Send requests to this scheme and host instead of MapQuest
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up the coordinates of an address
    ///
    /// Example: mapquest geocode "1555 Blake St,Denver,CO,80202"
    /// Example: mapquest geocode --street "1555 Blake St" --city Denver --state CO
    Geocode {
        /// Single-line address
        address: Option<String>,

        #[command(flatten)]
        fields: AddressArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Look up the address at a point
    ///
    /// Example: mapquest reverse 39.7505568,-104.9996268
    Reverse {
        /// Point as "lat,lng"
        #[arg(allow_hyphen_values = true)]
        coordinates: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Look up several addresses in one request
    ///
    /// Example: mapquest batch "1555 Blake St,Denver,CO" "2590 Pearl St,Boulder,CO"
    Batch {
        /// Single-line addresses
        #[arg(required = true)]
        addresses: Vec<String>,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Structured address fields for `geocode`
#[derive(Debug, Default, Args)]
pub struct AddressArgs {
    /// Street line
    #[arg(long, conflicts_with = "address")]
    pub street: Option<String>,

    /// City
    #[arg(long, conflicts_with = "address")]
    pub city: Option<String>,

    /// State or province
    #[arg(long, conflicts_with = "address")]
    pub state: Option<String>,

    /// Postal code
    #[arg(long, conflicts_with = "address")]
    pub postal_code: Option<String>,

    /// Country
    #[arg(long, conflicts_with = "address")]
    pub country: Option<String>,
}

impl AddressArgs {
    /// Structured address, if any field was given
    pub fn to_address(&self) -> Option<Address> {
        let mut address = Address::new();
        if let Some(street) = &self.street {
            address = address.street(street);
        }
        if let Some(city) = &self.city {
            address = address.city(city);
        }
        if let Some(state) = &self.state {
            address = address.state(state);
        }
        if let Some(postal_code) = &self.postal_code {
            address = address.postal_code(postal_code);
        }
        if let Some(country) = &self.country {
            address = address.country(country);
        }
        (!address.is_empty()).then_some(address)
    }
}

/// Options shared by all subcommands
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Maximum results per location (-1 for unlimited)
    #[arg(long, default_value_t = UNLIMITED, allow_negative_numbers = true)]
    pub limit: i32,

    /// Do not ask for map thumbnail URLs
    #[arg(long)]
    pub no_thumbnails: bool,

    /// Rank results inside this box first
    #[arg(long, value_name = "UL_LAT,UL_LNG,LR_LAT,LR_LNG", allow_hyphen_values = true)]
    pub bounding_box: Option<String>,
}

impl QueryArgs {
    /// Per-call options for the client
    pub fn to_options(&self) -> GeocodeOptions {
        let options = GeocodeOptions::default()
            .with_limit(self.limit)
            .with_thumbnails(!self.no_thumbnails);

        match &self.bounding_box {
            Some(bbox) => options.with_bounding_box(bbox.as_str()),
            None => options,
        }
    }
}

/// Resolve the location for `geocode` from either the positional address or
/// the structured fields
pub fn geocode_location(
    address: Option<&str>,
    fields: &AddressArgs,
) -> Result<Location, &'static str> {
    match (address, fields.to_address()) {
        (Some(text), _) => Ok(Location::from(text)),
        (None, Some(address)) => Ok(Location::from(address)),
        (None, None) => Err("provide an address or at least one address field"),
    }
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: MapQuestConfig) -> MapQuestConfig {
        if let Some(key) = &self.key {
            config = config.with_api_key(key);
        }
        if self.licensed {
            config = config.with_data(DataTier::Licensed);
        }
        if self.ssl {
            config = config.with_ssl(true);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        for (name, value) in &self.headers {
            config = config.with_header(name, value);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        config
    }
}

/// Parse `NAME:VALUE` into a header pair
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {raw:?}"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
