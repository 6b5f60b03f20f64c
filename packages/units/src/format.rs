//! "primary (secondary)" display strings.

use alert_map_units_models::{DistanceUnit, PrecipitationUnit, SpeedUnit, TemperatureUnit};

use crate::UNKNOWN_DISPLAY;
use crate::convert::{
    celsius_to_fahrenheit, fahrenheit_to_celsius, inches_to_mm, km_to_miles, kmh_to_mph,
    miles_to_km, mm_to_inches, mph_to_kmh,
};

/// Formats a number without a trailing `.0` for whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn bilingual(value: f64, unit: &str, secondary: Option<f64>, secondary_unit: &str) -> String {
    if !value.is_finite() {
        return UNKNOWN_DISPLAY.to_string();
    }
    let primary = format_number(value);
    secondary.map_or_else(
        || format!("{primary}{unit}"),
        |other| format!("{primary}{unit} ({}{secondary_unit})", format_number(other)),
    )
}

/// e.g. `"32°F (0°C)"`.
#[must_use]
pub fn format_temperature_bilingual(value: f64, unit: TemperatureUnit) -> String {
    let (secondary, secondary_unit) = match unit {
        TemperatureUnit::Celsius => (celsius_to_fahrenheit(value), TemperatureUnit::Fahrenheit),
        TemperatureUnit::Fahrenheit => (fahrenheit_to_celsius(value), TemperatureUnit::Celsius),
    };
    bilingual(value, unit.symbol(), secondary, secondary_unit.symbol())
}

/// e.g. `"90 km/h (56 mph)"`.
#[must_use]
pub fn format_wind_speed_bilingual(value: f64, unit: SpeedUnit) -> String {
    let (secondary, secondary_unit) = match unit {
        SpeedUnit::KilometersPerHour => (kmh_to_mph(value), SpeedUnit::MilesPerHour),
        SpeedUnit::MilesPerHour => (mph_to_kmh(value), SpeedUnit::KilometersPerHour),
    };
    bilingual(
        value,
        &format!(" {}", unit.symbol()),
        secondary,
        &format!(" {}", secondary_unit.symbol()),
    )
}

/// e.g. `"10 mi (16.1 km)"`.
#[must_use]
pub fn format_distance_bilingual(value: f64, unit: DistanceUnit) -> String {
    let (secondary, secondary_unit) = match unit {
        DistanceUnit::Kilometers => (km_to_miles(value), DistanceUnit::Miles),
        DistanceUnit::Miles => (miles_to_km(value), DistanceUnit::Kilometers),
    };
    bilingual(
        value,
        &format!(" {}", unit.symbol()),
        secondary,
        &format!(" {}", secondary_unit.symbol()),
    )
}

/// e.g. `"25 mm (0.98 in)"`.
#[must_use]
pub fn format_precipitation_bilingual(value: f64, unit: PrecipitationUnit) -> String {
    let (secondary, secondary_unit) = match unit {
        PrecipitationUnit::Millimeters => (mm_to_inches(value), PrecipitationUnit::Inches),
        PrecipitationUnit::Inches => (inches_to_mm(value), PrecipitationUnit::Millimeters),
    };
    bilingual(
        value,
        &format!(" {}", unit.symbol()),
        secondary,
        &format!(" {}", secondary_unit.symbol()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_primary_follows_caller_unit() {
        assert_eq!(
            format_temperature_bilingual(32.0, TemperatureUnit::Fahrenheit),
            "32°F (0°C)"
        );
        assert_eq!(
            format_temperature_bilingual(-5.0, TemperatureUnit::Celsius),
            "-5°C (23°F)"
        );
        assert_eq!(
            format_temperature_bilingual(21.5, TemperatureUnit::Celsius),
            "21.5°C (71°F)"
        );
    }

    #[test]
    fn wind_speed_both_ways() {
        assert_eq!(
            format_wind_speed_bilingual(90.0, SpeedUnit::KilometersPerHour),
            "90 km/h (56 mph)"
        );
        assert_eq!(
            format_wind_speed_bilingual(60.0, SpeedUnit::MilesPerHour),
            "60 mph (97 km/h)"
        );
    }

    #[test]
    fn distance_and_precipitation() {
        assert_eq!(
            format_distance_bilingual(10.0, DistanceUnit::Miles),
            "10 mi (16.1 km)"
        );
        assert_eq!(
            format_precipitation_bilingual(25.0, PrecipitationUnit::Millimeters),
            "25 mm (0.98 in)"
        );
    }

    #[test]
    fn unknown_value_renders_placeholder() {
        assert_eq!(
            format_temperature_bilingual(f64::NAN, TemperatureUnit::Celsius),
            UNKNOWN_DISPLAY
        );
        assert_eq!(
            format_wind_speed_bilingual(f64::INFINITY, SpeedUnit::MilesPerHour),
            UNKNOWN_DISPLAY
        );
    }
}
