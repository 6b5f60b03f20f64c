#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Measurement types used to present US-imperial and Canadian-metric
//! readings side by side.
//!
//! Every harmonized value keeps the reading exactly as the source reported
//! it next to the converted one.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The measurement system an alert authority reports in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MeasurementSystem {
    /// SI units (Canada)
    Metric,
    /// US customary units
    Imperial,
}

impl MeasurementSystem {
    /// Temperature unit this system reports in.
    #[must_use]
    pub const fn temperature_unit(self) -> TemperatureUnit {
        match self {
            Self::Metric => TemperatureUnit::Celsius,
            Self::Imperial => TemperatureUnit::Fahrenheit,
        }
    }

    /// Wind speed unit this system reports in.
    #[must_use]
    pub const fn speed_unit(self) -> SpeedUnit {
        match self {
            Self::Metric => SpeedUnit::KilometersPerHour,
            Self::Imperial => SpeedUnit::MilesPerHour,
        }
    }
}

/// Temperature scale.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[serde(rename = "C")]
    #[strum(to_string = "C", serialize = "celsius", serialize = "°C")]
    Celsius,
    /// Degrees Fahrenheit
    #[serde(rename = "F")]
    #[strum(to_string = "F", serialize = "fahrenheit", serialize = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Display symbol, e.g. `°C`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Wind speed unit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SpeedUnit {
    /// Kilometres per hour
    #[serde(rename = "km/h")]
    #[strum(to_string = "km/h", serialize = "kmh", serialize = "kph")]
    KilometersPerHour,
    /// Miles per hour
    #[serde(rename = "mph")]
    #[strum(to_string = "mph", serialize = "mi/h")]
    MilesPerHour,
}

impl SpeedUnit {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MilesPerHour => "mph",
        }
    }
}

/// Distance unit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DistanceUnit {
    /// Kilometres
    #[serde(rename = "km")]
    #[strum(to_string = "km", serialize = "kilometers", serialize = "kilometres")]
    Kilometers,
    /// Statute miles
    #[serde(rename = "mi")]
    #[strum(to_string = "mi", serialize = "miles")]
    Miles,
}

impl DistanceUnit {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

/// Precipitation depth (and hail size) unit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PrecipitationUnit {
    /// Millimetres
    #[serde(rename = "mm")]
    #[strum(to_string = "mm", serialize = "millimeters", serialize = "millimetres")]
    Millimeters,
    /// Inches
    #[serde(rename = "in")]
    #[strum(to_string = "in", serialize = "inches", serialize = "inch")]
    Inches,
}

impl PrecipitationUnit {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }
}

/// A temperature exactly as the source reported it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureReading {
    /// Reported value, `None` when the source value was missing or not numeric.
    pub value: Option<f64>,
    /// Reported unit.
    pub unit: TemperatureUnit,
}

/// A temperature converted to a display unit, with provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTemperature {
    /// Value in [`Self::unit`], `None` when unknown.
    pub value: Option<f64>,
    /// Target unit.
    pub unit: TemperatureUnit,
    /// The reading before conversion.
    pub original: TemperatureReading,
}

/// A temperature mentioned in free-form bulletin text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureMention {
    /// The matched text, e.g. `"-20°C"`.
    pub original: String,
    /// Byte offset of the match in the scanned text.
    pub position: usize,
    /// Unit the mention was written in.
    pub unit: TemperatureUnit,
    /// Value in degrees Fahrenheit.
    pub fahrenheit: f64,
    /// Value in degrees Celsius.
    pub celsius: f64,
    /// Bilingual display string, primary unit chosen by the source's system.
    pub display: String,
}

/// A structured alert parameter rendered in both measurement systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonizedMeasurement {
    /// Parameter name as it appeared in the alert (e.g. `"maxWindGust"`).
    pub parameter: String,
    /// Parameter value as reported.
    pub original: String,
    /// Display string, e.g. `"60 mph (97 km/h)"`.
    pub display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_from_symbols_and_names() {
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("celsius".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("KM/H".parse::<SpeedUnit>(), Ok(SpeedUnit::KilometersPerHour));
        assert_eq!("MPH".parse::<SpeedUnit>(), Ok(SpeedUnit::MilesPerHour));
        assert_eq!("inches".parse::<PrecipitationUnit>(), Ok(PrecipitationUnit::Inches));
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn system_default_units() {
        assert_eq!(
            MeasurementSystem::Metric.temperature_unit(),
            TemperatureUnit::Celsius
        );
        assert_eq!(
            MeasurementSystem::Imperial.speed_unit(),
            SpeedUnit::MilesPerHour
        );
    }

    #[test]
    fn unit_display_is_short_form() {
        assert_eq!(TemperatureUnit::Celsius.to_string(), "C");
        assert_eq!(DistanceUnit::Miles.to_string(), "mi");
    }
}
