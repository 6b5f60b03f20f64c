//! Temperature mentions embedded in bulletin prose.
//!
//! Bulletins state thresholds like "-20°C wind chill" only in text, so the
//! text is scanned and every mention is reported in both scales.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use alert_map_units_models::{MeasurementSystem, TemperatureMention, TemperatureUnit};
use regex::Regex;

use crate::convert::{celsius_to_fahrenheit, fahrenheit_to_celsius};
use crate::format::format_temperature_bilingual;

/// An optionally signed decimal, accepting the Unicode minus sign. The
/// sign and the digits are captured separately.
const NUMBER: &str = r"([-\x{2212}])?(\d+(?:\.\d+)?)";

static TEMPERATURE_PATTERNS: LazyLock<[(Regex, TemperatureUnit); 4]> = LazyLock::new(|| {
    let compile =
        |suffix: &str| Regex::new(&format!(r"(?i){NUMBER}\s*{suffix}")).expect("valid regex");
    [
        (compile(r"°\s*C\b"), TemperatureUnit::Celsius),
        (compile(r"°\s*F\b"), TemperatureUnit::Fahrenheit),
        (compile(r"degrees?\s+celsius\b"), TemperatureUnit::Celsius),
        (compile(r"degrees?\s+fahrenheit\b"), TemperatureUnit::Fahrenheit),
    ]
});

/// Finds temperature mentions in `text`, in order of appearance.
///
/// Each mention carries both scales whichever one was written. The display
/// string leads with the unit of `source_system`. Matches found by more
/// than one pattern at the same position are reported once.
#[must_use]
pub fn extract_temperatures(
    text: &str,
    source_system: MeasurementSystem,
) -> Vec<TemperatureMention> {
    let mut seen = BTreeSet::new();
    let mut mentions = Vec::new();

    for (pattern, unit) in TEMPERATURE_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            let (Some(whole), Some(digits)) = (captures.get(0), captures.get(2)) else {
                continue;
            };
            // A dash right after a digit separates a range ("10-15°C").
            let sign = captures
                .get(1)
                .filter(|sign| !text[..sign.start()].ends_with(|c: char| c.is_ascii_digit()));
            let start = sign.map_or(digits.start(), |sign| sign.start());
            let original = &text[start..whole.end()];
            if !seen.insert((start, original)) {
                continue;
            }
            let Ok(magnitude) = digits.as_str().parse::<f64>() else {
                log::debug!("Skipping unparseable temperature {original:?}");
                continue;
            };
            let value = if sign.is_some() { -magnitude } else { magnitude };
            mentions.extend(build_mention(original, start, value, *unit, source_system));
        }
    }

    mentions.sort_by_key(|m| m.position);
    mentions
}

fn build_mention(
    original: &str,
    position: usize,
    value: f64,
    unit: TemperatureUnit,
    source_system: MeasurementSystem,
) -> Option<TemperatureMention> {
    let (fahrenheit, celsius) = match unit {
        TemperatureUnit::Celsius => (celsius_to_fahrenheit(value)?, value),
        TemperatureUnit::Fahrenheit => (value, fahrenheit_to_celsius(value)?),
    };

    let display = match source_system.temperature_unit() {
        TemperatureUnit::Celsius => format_temperature_bilingual(celsius, TemperatureUnit::Celsius),
        TemperatureUnit::Fahrenheit => {
            format_temperature_bilingual(fahrenheit, TemperatureUnit::Fahrenheit)
        }
    };

    Some(TemperatureMention {
        original: original.to_string(),
        position,
        unit,
        fahrenheit,
        celsius,
        display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_mixed_units() {
        let mentions = extract_temperatures(
            "High of 32°F, low of -5 degrees Celsius",
            MeasurementSystem::Metric,
        );
        assert_eq!(mentions.len(), 2);

        assert_eq!(mentions[0].original, "32°F");
        assert_eq!(mentions[0].fahrenheit, 32.0);
        assert_eq!(mentions[0].celsius, 0.0);
        assert_eq!(mentions[0].unit, TemperatureUnit::Fahrenheit);

        assert_eq!(mentions[1].original, "-5 degrees Celsius");
        assert_eq!(mentions[1].fahrenheit, 23.0);
        assert_eq!(mentions[1].celsius, -5.0);
    }

    #[test]
    fn display_leads_with_source_system() {
        let text = "Wind chill near -20°C tonight.";
        let metric = extract_temperatures(text, MeasurementSystem::Metric);
        assert_eq!(metric[0].display, "-20°C (-4°F)");

        let imperial = extract_temperatures(text, MeasurementSystem::Imperial);
        assert_eq!(imperial[0].display, "-4°F (-20°C)");
    }

    #[test]
    fn mentions_are_ordered_by_position() {
        let mentions = extract_temperatures(
            "Highs 95 degrees fahrenheit, heat index 105 °F, overnight 24°C",
            MeasurementSystem::Imperial,
        );
        let originals: Vec<&str> = mentions.iter().map(|m| m.original.as_str()).collect();
        assert_eq!(originals, ["95 degrees fahrenheit", "105 °F", "24°C"]);
    }

    #[test]
    fn accepts_unicode_minus_and_singular_degree() {
        let mentions = extract_temperatures(
            "Lows of \u{2212}30°C and 1 degree Celsius",
            MeasurementSystem::Metric,
        );
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].celsius, -30.0);
        assert_eq!(mentions[1].celsius, 1.0);
    }

    #[test]
    fn range_dash_is_not_a_minus_sign() {
        let mentions = extract_temperatures("Highs 10-15°C today", MeasurementSystem::Metric);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].original, "15°C");
        assert_eq!(mentions[0].celsius, 15.0);
        assert_eq!(mentions[0].position, 9);

        let mentions = extract_temperatures("from 5 to -15°C", MeasurementSystem::Metric);
        assert_eq!(mentions[0].original, "-15°C");
        assert_eq!(mentions[0].celsius, -15.0);
    }

    #[test]
    fn ignores_text_without_temperatures() {
        assert!(
            extract_temperatures("Winds gusting to 90 km/h.", MeasurementSystem::Metric)
                .is_empty()
        );
        assert!(extract_temperatures("", MeasurementSystem::Imperial).is_empty());
    }
}
