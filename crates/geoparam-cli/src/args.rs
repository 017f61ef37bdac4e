use clap::{Args, Parser, Subcommand};

/// CLI arguments for geoparam
#[derive(Debug, Parser)]
#[command(
    name = "geoparam",
    version,
    about = "CLI for geocoding lookups and per-user parameter maps"
)]
pub struct CliArgs {
    /// Path to the users file (JSON, or .json.gz). Overrides GEOPARAM_STORE.
    #[arg(short = 's', long = "store", global = true)]
    pub store: Option<String>,

    /// Base URL of the geocoding API. Overrides GEOPARAM_GEOCODER_URL.
    #[arg(long = "geocoder-url", global = true)]
    pub geocoder_url: Option<String>,

    /// Log debug events to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the coordinates of an address
    Geocode {
        /// Free-form address (e.g. "8 bd du port, amiens")
        address: String,
    },

    /// Find the address at a position
    Reverse {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Flatten address components offline, applying fallbacks
    Normalize(NormalizeArgs),

    /// Read or change a user's parameters
    #[command(subcommand)]
    Params(ParamsCommand),

    /// Create or remove users in the store
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(long)]
    pub street_number: Option<String>,
    #[arg(long)]
    pub street_name: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ParamsCommand {
    /// Print the parameter map
    Get { user_id: u64 },

    /// Shallow-merge a JSON object into the map
    Set {
        user_id: u64,
        /// JSON value, e.g. '{"theme":"dark"}'
        parameters: String,
    },

    /// Remove one key from the map
    Delete {
        user_id: u64,
        key: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Add a user with an empty (or given) parameter map
    Create {
        user_id: u64,
        /// Initial parameters as a JSON object
        #[arg(long)]
        parameters: Option<String>,
    },

    /// Delete a user and its parameters
    Remove { user_id: u64 },
}
