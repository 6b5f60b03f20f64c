#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for alert normalization.
//!
//! Reads raw alert and zone documents, runs them through the
//! normalization pipeline, and prints canonical alerts as JSON.

use std::path::PathBuf;
use std::str::FromStr;

use alert_map_alert_models::CanonicalAlert;
use alert_map_normalize::{NormalizeConfig, load_raw_alerts, load_zones, normalize_alerts};
use alert_map_severity_models::{SEVERITY_LADDER, UnifiedSeverity};
use alert_map_spatial::AlertIndex;
use alert_map_units::extract_temperatures;
use alert_map_units_models::MeasurementSystem;
use clap::{Parser, Subcommand};

/// Environment variable naming a config file when `--config` is absent.
const CONFIG_ENV_VAR: &str = "ALERT_MAP_CONFIG";

#[derive(Parser)]
#[command(name = "alert_map_cli", about = "Weather alert normalization tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw alert document and print canonical alerts
    Normalize {
        /// Raw alerts: a `GeoJSON` feature collection, an array, or one record
        #[arg(long)]
        alerts: PathBuf,
        /// Zone reference dataset (`GeoJSON` feature collection)
        #[arg(long)]
        zones: Option<PathBuf>,
        /// TOML config file (overrides the `ALERT_MAP_CONFIG` env var)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only print alerts covering this location, as "lng,lat"
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Location>,
        /// Only print alerts at or above this tier (e.g. "moderate")
        #[arg(long)]
        min_severity: Option<UnifiedSeverity>,
    },
    /// Print the unified severity ladder
    Ladder,
    /// Extract temperature mentions from text
    Temperatures {
        /// Text to scan
        text: String,
        /// Measurement system whose unit leads the display string
        #[arg(long, default_value = "metric")]
        system: MeasurementSystem,
    },
}

/// A "lng,lat" pair.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Location {
    lng: f64,
    lat: f64,
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lng,lat\", got {s:?}"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate {part:?}: {e}"))
        };
        Ok(Self {
            lng: parse(lng)?,
            lat: parse(lat)?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            alerts,
            zones,
            config,
            at,
            min_severity,
        } => {
            let config = load_config(config)?;
            let zones = match zones {
                Some(path) => load_zones(path, &config.zones.id_properties)?,
                None => vec![],
            };
            let raws = load_raw_alerts(alerts)?;

            let mut canonical = normalize_alerts(raws, &zones, &config);
            if let Some(min) = min_severity {
                canonical.retain(|alert| alert.unified_severity.at_least(min));
            }

            let index = AlertIndex::new(canonical);
            let selected: Vec<&CanonicalAlert> = match at {
                Some(location) => {
                    let covering = index.alerts_at(location.lng, location.lat);
                    log::info!(
                        "{} of {} alerts cover {},{}",
                        covering.len(),
                        index.len(),
                        location.lng,
                        location.lat
                    );
                    covering
                }
                None => index.alerts().iter().collect(),
            };

            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
        Commands::Ladder => {
            println!("{:<6} {:<10} {:<8} DESCRIPTION", "LEVEL", "TIER", "COLOR");
            println!("{}", "-".repeat(60));
            for tier in SEVERITY_LADDER {
                println!(
                    "{:<6} {:<10} {:<8} {}",
                    tier.level(),
                    tier.label(),
                    tier.color(),
                    tier.description()
                );
            }
        }
        Commands::Temperatures { text, system } => {
            let mentions = extract_temperatures(&text, system);
            println!("{}", serde_json::to_string_pretty(&mentions)?);
        }
    }

    Ok(())
}

/// `--config`, else `ALERT_MAP_CONFIG`, else the embedded defaults.
fn load_config(flag: Option<PathBuf>) -> Result<NormalizeConfig, Box<dyn std::error::Error>> {
    let path = flag.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    Ok(match path {
        Some(path) => NormalizeConfig::load(path)?,
        None => NormalizeConfig::embedded()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_location() {
        assert_eq!(
            "-97.5, 35.2".parse::<Location>(),
            Ok(Location {
                lng: -97.5,
                lat: 35.2
            })
        );
        assert!("-97.5".parse::<Location>().is_err());
        assert!("west,35".parse::<Location>().is_err());
    }

    #[test]
    fn parses_normalize_arguments() {
        let cli = Cli::try_parse_from([
            "alert_map_cli",
            "normalize",
            "--alerts",
            "alerts.json",
            "--at",
            "-97.5,35.2",
            "--min-severity",
            "moderate",
        ])
        .unwrap();
        let Commands::Normalize {
            at, min_severity, ..
        } = cli.command
        else {
            panic!("expected normalize");
        };
        assert_eq!(at, Some(Location { lng: -97.5, lat: 35.2 }));
        assert_eq!(min_severity, Some(UnifiedSeverity::Moderate));
    }

    #[test]
    fn temperatures_default_to_metric() {
        let cli = Cli::try_parse_from(["alert_map_cli", "temperatures", "Low of -5°C"]).unwrap();
        let Commands::Temperatures { system, .. } = cli.command else {
            panic!("expected temperatures");
        };
        assert_eq!(system, MeasurementSystem::Metric);
    }
}
