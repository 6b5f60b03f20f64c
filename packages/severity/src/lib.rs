#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Severity unification for US and Canadian alerts.
//!
//! Each authority classifies hazards in its own vocabulary. This crate maps
//! both onto the shared [`UnifiedSeverity`] ladder so alerts from either
//! feed sort and filter together. Every mapper funnels through
//! [`get_severity_by_level`], and unrecognized vocabulary lands on
//! [`UnifiedSeverity::Info`]: visible, but deprioritized.

pub mod ec;
pub mod nws;
pub mod ordering;

use alert_map_alert_models::RawAlert;
pub use alert_map_severity_models::UnifiedSeverity;

pub use ec::map_ec_severity;
pub use nws::map_nws_severity;
pub use ordering::{SeverityRanked, compare_severity, sort_by_severity};

/// Markers in `source` identifying the Canadian authority.
const CANADIAN_SOURCE_MARKERS: &[&str] = &["ec", "canada"];

/// Returns the ladder entry for `level`, clamped into `0..=4`.
#[must_use]
pub const fn get_severity_by_level(level: i64) -> UnifiedSeverity {
    UnifiedSeverity::from_level_clamped(level)
}

/// Whether a source tag names the Canadian authority.
///
/// Matches "EC" or "CANADA" anywhere in the tag, case-insensitively.
#[must_use]
pub fn is_canadian_source(source: &str) -> bool {
    let lower = source.to_lowercase();
    CANADIAN_SOURCE_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Computes the unified severity of a raw alert.
///
/// Canadian records are mapped from their alert type and event category,
/// falling back to the event name and then the nested `info` block; everything else, including
/// records with no source tag, goes through the US mapper.
#[must_use]
pub fn unified_severity_for(alert: &RawAlert) -> UnifiedSeverity {
    if alert.source.as_deref().is_some_and(is_canadian_source) {
        let info = alert.info.as_ref();
        let alert_type = alert
            .alert_type
            .as_deref()
            .or_else(|| info.and_then(|i| i.category.as_deref()))
            .unwrap_or_default();
        let event = alert
            .event_category
            .as_deref()
            .or(alert.event.as_deref())
            .or_else(|| info.and_then(|i| i.event.as_deref()))
            .unwrap_or_default();
        return map_ec_severity(alert_type, event);
    }

    map_nws_severity(
        alert.severity.as_deref().unwrap_or_default(),
        alert.urgency.as_deref().unwrap_or_default(),
        alert.certainty.as_deref().unwrap_or_default(),
    )
}

/// Computes the alert's unified severity and stores it on the record.
pub fn apply_unified_severity(alert: &mut RawAlert) -> UnifiedSeverity {
    let severity = unified_severity_for(alert);
    alert.unified_severity = Some(severity);
    severity
}

/// Converts a free-form severity label to a tier.
///
/// Understands unified tier names, CAP severity names, Canadian alert
/// types, and the red/orange/yellow colour codes. Anything else is tier 0.
#[must_use]
pub fn parse_severity_string(text: &str) -> u8 {
    let level = match text.trim().to_lowercase().as_str() {
        "critical" | "extreme" | "red" => 4,
        "high" | "severe" | "warning" | "orange" => 3,
        "moderate" | "medium" | "watch" | "yellow" => 2,
        "low" | "minor" | "advisory" => 1,
        _ => 0,
    };
    get_severity_by_level(level).level()
}

#[cfg(test)]
mod tests {
    use alert_map_alert_models::AlertInfo;

    use super::*;

    #[test]
    fn level_lookup_clamps() {
        assert_eq!(get_severity_by_level(-1), UnifiedSeverity::Info);
        assert_eq!(get_severity_by_level(3), UnifiedSeverity::High);
        assert_eq!(get_severity_by_level(17), UnifiedSeverity::Critical);
    }

    #[test]
    fn detects_canadian_sources() {
        assert!(is_canadian_source("EC"));
        assert!(is_canadian_source("eccc"));
        assert!(is_canadian_source("Environment Canada"));
        assert!(!is_canadian_source("NWS"));
        assert!(!is_canadian_source(""));
    }

    #[test]
    fn dispatches_canadian_alerts_to_ec_mapper() {
        let mut alert = RawAlert {
            source: Some("ENVIRONMENT CANADA".to_string()),
            alert_type: Some("warning".to_string()),
            event: Some("Extreme Cold Warning".to_string()),
            // US fields are ignored for Canadian records
            severity: Some("Minor".to_string()),
            ..RawAlert::default()
        };
        assert_eq!(apply_unified_severity(&mut alert), UnifiedSeverity::Critical);
        assert_eq!(alert.unified_severity, Some(UnifiedSeverity::Critical));
    }

    #[test]
    fn canadian_alerts_fall_back_to_info_block() {
        let alert = RawAlert {
            source: Some("EC".to_string()),
            info: Some(AlertInfo {
                category: Some("watch".to_string()),
                event: Some("Tornado Watch".to_string()),
            }),
            ..RawAlert::default()
        };
        assert_eq!(unified_severity_for(&alert), UnifiedSeverity::High);
    }

    #[test]
    fn canadian_event_category_wins_over_event() {
        let alert = RawAlert {
            source: Some("EC".to_string()),
            alert_type: Some("warning".to_string()),
            event: Some("wind".to_string()),
            event_category: Some("Tornado Warning".to_string()),
            ..RawAlert::default()
        };
        assert_eq!(unified_severity_for(&alert), UnifiedSeverity::Critical);

        let alert = RawAlert {
            event_category: None,
            event: Some("Tornado Warning".to_string()),
            ..alert
        };
        assert_eq!(unified_severity_for(&alert), UnifiedSeverity::Critical);
    }

    #[test]
    fn missing_source_uses_us_mapper() {
        let alert = RawAlert {
            severity: Some("Severe".to_string()),
            urgency: Some("Future".to_string()),
            certainty: Some("Possible".to_string()),
            ..RawAlert::default()
        };
        assert_eq!(unified_severity_for(&alert), UnifiedSeverity::High);
        assert_eq!(unified_severity_for(&RawAlert::default()), UnifiedSeverity::Info);
    }

    #[test]
    fn parses_severity_strings() {
        assert_eq!(parse_severity_string("CRITICAL"), 4);
        assert_eq!(parse_severity_string("Extreme"), 4);
        assert_eq!(parse_severity_string("severe"), 3);
        assert_eq!(parse_severity_string(" Watch "), 2);
        assert_eq!(parse_severity_string("minor"), 1);
        assert_eq!(parse_severity_string("Unknown"), 0);
        assert_eq!(parse_severity_string("gibberish"), 0);
    }
}
