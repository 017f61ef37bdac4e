//! geoparam — Command-line interface for geoparam-core
//!
//! Runs every public operation from the terminal and prints the JSON body
//! the operation would answer with.
//!
//! Usage examples
//! --------------
//!
//! - Forward and reverse geocoding
//!   $ geoparam geocode "8 bd du port, amiens"
//!   $ geoparam reverse 49.8974 2.2901
//!
//! - Offline address flattening
//!   $ geoparam normalize --street-name "Downing Street" --city London --country UK
//!
//! - Parameter maps
//!   $ geoparam users create 1
//!   $ geoparam params set 1 '{"theme":"dark","notifications":true}'
//!   $ geoparam params delete 1 theme
//!   $ geoparam params get 1
//!
//! Exit status is 0 on success, 2 for client errors (4xx) and 1 for
//! service errors (5xx). Logs go to stderr; stdout only ever carries JSON.
mod args;

use crate::args::{CliArgs, Commands, ParamsCommand, UsersCommand};
use clap::Parser;
use geoparam_core::api::{
    ApiResponse, DeleteParameterRequest, GeocodeRequest, ReverseGeocodeRequest,
    UpdateParametersRequest,
};
use geoparam_core::{
    normalize, parameters, Config, ErrorKind, GeoParamError, Geocoder, JsonFileStore,
    LocationService, ParameterMap, ParameterService, SplitAddress, UserRecord, UserStore,
};
use serde_json::{json, Value};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    // Environment first, flags win
    let mut config = Config::from_env()?;
    if let Some(store) = args.store {
        config.store_path = store.into();
    }
    if let Some(url) = args.geocoder_url {
        config.geocoder.base_url = url;
    }

    let store = JsonFileStore::new(&config.store_path);

    let resp = match args.command {
        Commands::Geocode { address } => {
            let svc = LocationService::new(geocoder(&config)?);
            respond(svc.coordinates(&GeocodeRequest { address }))
        }

        Commands::Reverse {
            latitude,
            longitude,
        } => {
            let svc = LocationService::new(geocoder(&config)?);
            respond(svc.reverse(&ReverseGeocodeRequest {
                latitude,
                longitude,
            }))
        }

        Commands::Normalize(a) => ApiResponse::ok(&normalize(SplitAddress {
            street_number: a.street_number,
            street_name: a.street_name,
            city: a.city,
            country: a.country,
        })),

        Commands::Params(cmd) => {
            let svc = ParameterService::new(&store);
            match cmd {
                ParamsCommand::Get { user_id } => respond(svc.get(user_id)),
                ParamsCommand::Set {
                    user_id,
                    parameters,
                } => respond(parse_json_arg(&parameters).and_then(|patch| {
                    svc.update(
                        user_id,
                        &UpdateParametersRequest {
                            parameters: Some(patch),
                        },
                    )
                })),
                ParamsCommand::Delete { user_id, key } => {
                    respond(svc.delete(user_id, &DeleteParameterRequest { key }))
                }
            }
        }

        Commands::Users(cmd) => match cmd {
            UsersCommand::Create {
                user_id,
                parameters,
            } => respond(create_user(&store, user_id, parameters.as_deref())),
            UsersCommand::Remove { user_id } => respond(
                store
                    .delete_user(user_id)
                    .map(|()| json!({ "message": format!("User {user_id} removed") })),
            ),
        },
    };

    println!("{}", serde_json::to_string_pretty(&resp.body)?);

    Ok(match resp.status {
        200..=299 => ExitCode::SUCCESS,
        400..=499 => ExitCode::from(2),
        _ => ExitCode::from(1),
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn geocoder(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    #[cfg(feature = "http")]
    {
        let provider = geoparam_core::OpenDataFranceGeocoder::new(&config.geocoder)?;
        Ok(Box::new(provider))
    }

    #[cfg(not(feature = "http"))]
    {
        let _ = config;
        anyhow::bail!("geoparam was built without the 'http' feature; geocoding is unavailable")
    }
}

/// Converts an outcome into a response, logging faults the caller won't see.
fn respond<T: serde::Serialize>(result: geoparam_core::Result<T>) -> ApiResponse {
    if let Err(e) = &result {
        if e.kind() == ErrorKind::Service {
            error!(error = %e, "request failed");
        }
    }
    ApiResponse::from(result)
}

fn parse_json_arg(raw: &str) -> geoparam_core::Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| GeoParamError::validation(format!("argument is not valid JSON: {e}")))
}

fn create_user(
    store: &JsonFileStore,
    user_id: u64,
    initial: Option<&str>,
) -> geoparam_core::Result<UserRecord> {
    let parameters = match initial {
        // Same object check as an update
        Some(raw) => parameters::merge(&ParameterMap::new(), Some(&parse_json_arg(raw)?))?,
        None => ParameterMap::new(),
    };

    store.create_user(user_id, parameters.clone())?;
    Ok(UserRecord::new(user_id, parameters))
}
