//! Numeric conversions between the two measurement systems.
//!
//! Temperatures and wind speeds round to whole units, distances to one
//! decimal, inches to two decimals and millimetres to one.

use alert_map_units_models::{
    MeasurementSystem, NormalizedTemperature, TemperatureReading, TemperatureUnit,
};

const KM_PER_MILE: f64 = 1.609_344;
const MM_PER_INCH: f64 = 25.4;

/// Default display unit for [`normalize_temperature`].
pub const DEFAULT_TARGET_TEMPERATURE_UNIT: TemperatureUnit = TemperatureUnit::Fahrenheit;

/// Source tags that identify a metric-reporting (Canadian) authority.
/// Matched case-sensitively as substrings.
const METRIC_SOURCE_MARKERS: &[&str] = &["ECCC", "EC", "CA"];

/// Rounds to `decimals` places, folding `-0` into `0`.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor + 0.0
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Applies `f` to a finite input, rejecting results that overflowed.
fn convert(value: f64, f: impl FnOnce(f64) -> f64) -> Option<f64> {
    finite(value).map(f).and_then(finite)
}

/// Degrees Celsius to degrees Fahrenheit, rounded to a whole degree.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> Option<f64> {
    convert(celsius, |v| round_to(v.mul_add(9.0 / 5.0, 32.0), 0))
}

/// Degrees Fahrenheit to degrees Celsius, rounded to a whole degree.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> Option<f64> {
    convert(fahrenheit, |v| round_to((v - 32.0) * 5.0 / 9.0, 0))
}

/// Kilometres per hour to miles per hour, rounded to a whole unit.
#[must_use]
pub fn kmh_to_mph(kmh: f64) -> Option<f64> {
    convert(kmh, |v| round_to(v / KM_PER_MILE, 0))
}

/// Miles per hour to kilometres per hour, rounded to a whole unit.
#[must_use]
pub fn mph_to_kmh(mph: f64) -> Option<f64> {
    convert(mph, |v| round_to(v * KM_PER_MILE, 0))
}

/// Kilometres to miles, rounded to one decimal.
#[must_use]
pub fn km_to_miles(km: f64) -> Option<f64> {
    convert(km, |v| round_to(v / KM_PER_MILE, 1))
}

/// Miles to kilometres, rounded to one decimal.
#[must_use]
pub fn miles_to_km(miles: f64) -> Option<f64> {
    convert(miles, |v| round_to(v * KM_PER_MILE, 1))
}

/// Millimetres to inches, rounded to two decimals.
#[must_use]
pub fn mm_to_inches(mm: f64) -> Option<f64> {
    convert(mm, |v| round_to(v / MM_PER_INCH, 2))
}

/// Inches to millimetres, rounded to one decimal.
#[must_use]
pub fn inches_to_mm(inches: f64) -> Option<f64> {
    convert(inches, |v| round_to(v * MM_PER_INCH, 1))
}

/// Converts a temperature between scales.
///
/// Same-scale input is returned unrounded.
#[must_use]
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> Option<f64> {
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => celsius_to_fahrenheit(value),
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => fahrenheit_to_celsius(value),
        _ => finite(value),
    }
}

/// Converts a reported temperature to `target_unit`, keeping the original
/// reading alongside.
///
/// A missing or non-finite value yields `None` for both the converted and
/// the recorded original value.
#[must_use]
pub fn normalize_temperature(
    value: Option<f64>,
    source_unit: TemperatureUnit,
    target_unit: TemperatureUnit,
) -> NormalizedTemperature {
    let original = value.and_then(finite);
    NormalizedTemperature {
        value: original.and_then(|v| convert_temperature(v, source_unit, target_unit)),
        unit: target_unit,
        original: TemperatureReading {
            value: original,
            unit: source_unit,
        },
    }
}

/// Guesses the measurement system from a source tag.
///
/// Canadian markers (`EC`, `ECCC`, `CA`, or "Environment Canada" in any
/// case) mean metric; everything else is imperial.
#[must_use]
pub fn detect_measurement_system(source: &str) -> MeasurementSystem {
    let canadian = METRIC_SOURCE_MARKERS
        .iter()
        .any(|marker| source.contains(marker))
        || source.to_lowercase().contains("environment canada");

    if canadian {
        MeasurementSystem::Metric
    } else {
        MeasurementSystem::Imperial
    }
}
