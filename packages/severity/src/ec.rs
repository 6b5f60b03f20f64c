//! Canadian (alert type plus event name) mapping.

use alert_map_severity_models::{
    EC_CRITICAL_EVENTS, EC_HIGH_IMPACT_WATCH_EVENTS, EcAlertType, UnifiedSeverity,
};

use crate::get_severity_by_level;

/// Maps a Canadian alert type and event name onto the unified ladder.
///
/// Warnings for a small set of extreme events are lifted to critical and
/// watches for a few high-impact events to high. Event names are matched
/// as case-insensitive substrings, so "non-tornado" still matches
/// "tornado" while "tornadic" does not. Unrecognized types map to [`UnifiedSeverity::Info`].
#[must_use]
pub fn map_ec_severity(alert_type: &str, event_category: &str) -> UnifiedSeverity {
    let Some(alert_type) = EcAlertType::from_label(alert_type) else {
        return UnifiedSeverity::Info;
    };
    let event = event_category.to_lowercase();

    let level = match alert_type {
        EcAlertType::Warning if contains_any(&event, EC_CRITICAL_EVENTS) => 4,
        EcAlertType::Watch if contains_any(&event, EC_HIGH_IMPACT_WATCH_EVENTS) => 3,
        other => other.base_level(),
    };

    get_severity_by_level(i64::from(level))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tornado_warning_is_critical() {
        assert_eq!(
            map_ec_severity("warning", "Tornado Warning"),
            UnifiedSeverity::Critical
        );
    }

    #[test]
    fn all_critical_events_boost_warnings() {
        for event in EC_CRITICAL_EVENTS {
            assert_eq!(
                map_ec_severity("warning", &format!("{} warning", event.to_uppercase())),
                UnifiedSeverity::Critical,
                "{event} should be critical"
            );
        }
    }

    #[test]
    fn severe_thunderstorm_watch_is_high() {
        assert_eq!(
            map_ec_severity("watch", "Severe Thunderstorm Watch"),
            UnifiedSeverity::High
        );
    }

    #[test]
    fn ordinary_types_use_base_tier() {
        assert_eq!(map_ec_severity("advisory", "Frost Advisory"), UnifiedSeverity::Low);
        assert_eq!(map_ec_severity("warning", "Rainfall Warning"), UnifiedSeverity::High);
        assert_eq!(map_ec_severity("watch", "Winter Storm Watch"), UnifiedSeverity::Moderate);
        assert_eq!(
            map_ec_severity("statement", "Special Weather Statement"),
            UnifiedSeverity::Info
        );
        assert_eq!(map_ec_severity("ended", "Tornado Warning"), UnifiedSeverity::Info);
    }

    #[test]
    fn watch_boost_does_not_apply_to_warning_only_events() {
        assert_eq!(
            map_ec_severity("watch", "Hurricane Watch"),
            UnifiedSeverity::Moderate
        );
    }

    #[test]
    fn substring_matching_is_loose() {
        assert_eq!(
            map_ec_severity("warning", "Non-tornado funnel cloud warning"),
            UnifiedSeverity::Critical
        );
        assert_eq!(
            map_ec_severity("warning", "Non-tornadic funnel cloud warning"),
            UnifiedSeverity::High
        );
    }

    #[test]
    fn unknown_type_is_info() {
        assert_eq!(map_ec_severity("bulletin", "Tornado"), UnifiedSeverity::Info);
        assert_eq!(map_ec_severity("", ""), UnifiedSeverity::Info);
    }
}
