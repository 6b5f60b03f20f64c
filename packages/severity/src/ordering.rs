//! Severity-ordered presentation.

use std::cmp::Ordering;

use alert_map_alert_models::{CanonicalAlert, RawAlert};
use alert_map_severity_models::UnifiedSeverity;

/// Anything that may carry a unified severity.
pub trait SeverityRanked {
    /// The record's unified severity, if it has been assigned one.
    fn unified_severity(&self) -> Option<UnifiedSeverity>;
}

impl SeverityRanked for RawAlert {
    fn unified_severity(&self) -> Option<UnifiedSeverity> {
        self.unified_severity
    }
}

impl SeverityRanked for CanonicalAlert {
    fn unified_severity(&self) -> Option<UnifiedSeverity> {
        Some(self.unified_severity)
    }
}

impl SeverityRanked for UnifiedSeverity {
    fn unified_severity(&self) -> Option<UnifiedSeverity> {
        Some(*self)
    }
}

/// Descending comparator: the higher tier sorts first. A missing severity
/// counts as [`UnifiedSeverity::Info`].
#[must_use]
pub fn compare_severity(a: Option<UnifiedSeverity>, b: Option<UnifiedSeverity>) -> Ordering {
    b.unwrap_or_default().cmp(&a.unwrap_or_default())
}

/// Stable sort, most severe first.
pub fn sort_by_severity<T: SeverityRanked>(items: &mut [T]) {
    items.sort_by(|a, b| compare_severity(a.unified_severity(), b.unified_severity()));
}
