//! Structured measurement parameters carried alongside alert text.
//!
//! Both feeds attach a `parameters` map of name to value list. Only the
//! measurement-bearing names are harmonized; everything else is passed over.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use alert_map_units_models::{
    HarmonizedMeasurement, MeasurementSystem, PrecipitationUnit, SpeedUnit,
};
use regex::Regex;

use crate::format::{format_precipitation_bilingual, format_wind_speed_bilingual};

/// An unsigned decimal followed by an optional unit word.
static VALUE_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*([a-z/]*)\.?\s*$").expect("valid regex")
});

const SPEED_PARAMETERS: &[&str] = &["maxWindGust", "windGust", "windSpeed"];
const HAIL_PARAMETERS: &[&str] = &["maxHailSize", "hailSize"];

#[derive(Debug, Clone, Copy)]
enum ParameterKind {
    Speed,
    Hail,
}

fn parameter_kind(name: &str) -> Option<ParameterKind> {
    let matches = |names: &[&str]| names.iter().any(|n| n.eq_ignore_ascii_case(name));
    if matches(SPEED_PARAMETERS) {
        Some(ParameterKind::Speed)
    } else if matches(HAIL_PARAMETERS) {
        Some(ParameterKind::Hail)
    } else {
        None
    }
}

/// Splits `"60 MPH"` into `(60.0, "MPH")`. The unit is empty for a bare
/// number.
fn split_value(raw: &str) -> Option<(f64, &str)> {
    let captures = VALUE_WITH_UNIT.captures(raw)?;
    let value = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2).map_or("", |m| m.as_str());
    Some((value, unit))
}

fn harmonize_value(
    kind: ParameterKind,
    raw: &str,
    system: MeasurementSystem,
) -> Option<String> {
    let (value, unit) = split_value(raw)?;
    match kind {
        ParameterKind::Speed => {
            let unit = if unit.is_empty() {
                system.speed_unit()
            } else {
                unit.parse::<SpeedUnit>().ok()?
            };
            Some(format_wind_speed_bilingual(value, unit))
        }
        ParameterKind::Hail => {
            let unit = if unit.is_empty() {
                match system {
                    MeasurementSystem::Metric => PrecipitationUnit::Millimeters,
                    MeasurementSystem::Imperial => PrecipitationUnit::Inches,
                }
            } else {
                unit.parse::<PrecipitationUnit>().ok()?
            };
            Some(format_precipitation_bilingual(value, unit))
        }
    }
}

/// Harmonizes the wind and hail parameters of an alert.
///
/// Names match case-insensitively. A value without a unit is read in the
/// default unit of `system`. Values that cannot be parsed are skipped.
/// Output follows the map's key order, then each key's value order.
#[must_use]
pub fn harmonize_parameters(
    parameters: &BTreeMap<String, Vec<String>>,
    system: MeasurementSystem,
) -> Vec<HarmonizedMeasurement> {
    parameters
        .iter()
        .filter_map(|(name, values)| parameter_kind(name).map(|kind| (name, kind, values)))
        .flat_map(|(name, kind, values)| {
            values.iter().filter_map(move |raw| {
                let Some(display) = harmonize_value(kind, raw, system) else {
                    log::debug!("Skipping unparseable {name} value {raw:?}");
                    return None;
                };
                Some(HarmonizedMeasurement {
                    parameter: name.clone(),
                    original: raw.clone(),
                    display,
                })
            })
        })
        .collect()
}
