//! US (CAP severity/urgency/certainty) mapping.

use alert_map_severity_models::{NwsCertainty, NwsSeverity, NwsUrgency, UnifiedSeverity};

use crate::get_severity_by_level;

/// Maps a CAP severity/urgency/certainty triple onto the unified ladder.
///
/// The base tier comes from `severity`; urgency and certainty nudge it up
/// or down, so an immediate, observed moderate event can outrank a severe
/// one expected in the future. The sum is rounded half-to-even and clamped.
/// Unrecognized labels contribute nothing.
#[must_use]
pub fn map_nws_severity(severity: &str, urgency: &str, certainty: &str) -> UnifiedSeverity {
    let score = f64::from(NwsSeverity::from_label(severity).base_level())
        + NwsUrgency::from_label(urgency).adjustment()
        + NwsCertainty::from_label(certainty).adjustment();

    #[allow(clippy::cast_possible_truncation)]
    let level = score.round_ties_even() as i64;
    get_severity_by_level(level)
}
