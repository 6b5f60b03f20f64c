#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Unit harmonization between US-imperial and Canadian-metric alerts.
//!
//! Conversions never produce a value from missing or non-finite input;
//! they return `None` instead, and display helpers render that as
//! [`UNKNOWN_DISPLAY`].

pub mod convert;
pub mod extract;
pub mod format;
pub mod parameters;

pub use convert::{
    celsius_to_fahrenheit, detect_measurement_system, fahrenheit_to_celsius, inches_to_mm,
    km_to_miles, kmh_to_mph, miles_to_km, mm_to_inches, mph_to_kmh, normalize_temperature,
};
pub use extract::extract_temperatures;
pub use format::{
    format_distance_bilingual, format_precipitation_bilingual, format_temperature_bilingual,
    format_wind_speed_bilingual,
};
pub use parameters::harmonize_parameters;

/// Rendered in place of a value that could not be determined.
pub const UNKNOWN_DISPLAY: &str = "N/A";
