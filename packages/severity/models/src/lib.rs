#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Unified severity ladder and the native vocabularies of each alert
//! authority.
//!
//! Both the US (CAP severity/urgency/certainty) and Canadian (alert type
//! plus event name) classifications are mapped onto [`UnifiedSeverity`] by
//! `alert_map_severity`. This crate only holds the constant tables.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Unified alert severity, from 0 (informational) to 4 (critical).
///
/// Ordering follows the tier value, so `Critical > High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum UnifiedSeverity {
    /// Tier 0: statements, ended alerts, unclassifiable input
    #[default]
    Info = 0,
    /// Tier 1: advisories and minor hazards
    Low = 1,
    /// Tier 2: watches and moderate hazards
    Moderate = 2,
    /// Tier 3: warnings and severe hazards
    High = 3,
    /// Tier 4: extreme, imminent, or life-threatening hazards
    Critical = 4,
}

/// Highest tier on the ladder.
pub const MAX_SEVERITY_LEVEL: u8 = 4;

/// The full ladder, indexed by tier.
pub const SEVERITY_LADDER: [UnifiedSeverity; 5] = [
    UnifiedSeverity::Info,
    UnifiedSeverity::Low,
    UnifiedSeverity::Moderate,
    UnifiedSeverity::High,
    UnifiedSeverity::Critical,
];

impl UnifiedSeverity {
    /// Returns the numeric tier.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Returns the ladder entry for a tier, clamping into `0..=4`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    pub const fn from_level_clamped(level: i64) -> Self {
        if level <= 0 {
            Self::Info
        } else if level >= MAX_SEVERITY_LEVEL as i64 {
            Self::Critical
        } else {
            SEVERITY_LADDER[level as usize]
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Hex display color used by map layers and cards.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Info => "#6B7280",
            Self::Low => "#3B82F6",
            Self::Moderate => "#EAB308",
            Self::High => "#F97316",
            Self::Critical => "#DC2626",
        }
    }

    /// One-line description of what the tier means for the reader.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Info => "Informational statement; no action expected",
            Self::Low => "Minor hazard; be aware of conditions",
            Self::Moderate => "Hazard possible; be prepared to act",
            Self::High => "Hazardous conditions expected; take protective action",
            Self::Critical => "Life-threatening conditions; act immediately",
        }
    }

    /// Whether this tier is at or above `min`.
    #[must_use]
    pub const fn at_least(self, min: Self) -> bool {
        self.level() >= min.level()
    }
}

/// CAP `severity` values used by the US feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum NwsSeverity {
    /// Extraordinary threat to life or property
    Extreme,
    /// Significant threat to life or property
    Severe,
    /// Possible threat to life or property
    Moderate,
    /// Minimal to no known threat
    Minor,
    /// Severity unknown or not supplied
    Unknown,
}

impl NwsSeverity {
    /// Parses a label, treating anything unrecognized as [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Base tier before urgency and certainty adjustments.
    #[must_use]
    pub const fn base_level(self) -> u8 {
        match self {
            Self::Extreme => 4,
            Self::Severe => 3,
            Self::Moderate => 2,
            Self::Minor => 1,
            Self::Unknown => 0,
        }
    }
}

/// CAP `urgency` values used by the US feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum NwsUrgency {
    /// Responsive action should be taken immediately
    Immediate,
    /// Responsive action should be taken soon (within the next hour)
    Expected,
    /// Responsive action should be taken in the near future
    Future,
    /// Responsive action is no longer required
    Past,
    /// Urgency not known
    Unknown,
}

impl NwsUrgency {
    /// Parses a label, treating anything unrecognized as [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Tier adjustment contributed by this urgency.
    #[must_use]
    pub const fn adjustment(self) -> f64 {
        match self {
            Self::Immediate => 1.0,
            Self::Expected => 0.5,
            Self::Future | Self::Unknown => 0.0,
            Self::Past => -1.0,
        }
    }
}

/// CAP `certainty` values used by the US feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum NwsCertainty {
    /// Determined to have occurred or to be ongoing
    Observed,
    /// Likely (p > ~50%)
    Likely,
    /// Possible but not likely (p <= ~50%)
    Possible,
    /// Not expected to occur (p ~ 0)
    Unlikely,
    /// Certainty unknown
    Unknown,
}

impl NwsCertainty {
    /// Parses a label, treating anything unrecognized as [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Tier adjustment contributed by this certainty.
    #[must_use]
    pub const fn adjustment(self) -> f64 {
        match self {
            Self::Observed => 0.5,
            Self::Likely => 0.25,
            Self::Possible | Self::Unknown => 0.0,
            Self::Unlikely => -0.5,
        }
    }
}

/// Alert types issued by Environment and Climate Change Canada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EcAlertType {
    /// Hazardous weather is occurring or imminent
    Warning,
    /// Conditions are favorable for hazardous weather
    Watch,
    /// Less severe conditions that may cause inconvenience
    Advisory,
    /// Special weather statement
    Statement,
    /// A previously issued alert has ended
    Ended,
}

impl EcAlertType {
    /// Parses a label, returning `None` for anything unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// Base tier before event-specific boosting.
    #[must_use]
    pub const fn base_level(self) -> u8 {
        match self {
            Self::Warning => 3,
            Self::Watch => 2,
            Self::Advisory => 1,
            Self::Statement | Self::Ended => 0,
        }
    }
}

/// Event names that lift a Canadian warning to [`UnifiedSeverity::Critical`].
///
/// Matched as case-insensitive substrings of the event name.
pub const EC_CRITICAL_EVENTS: &[&str] = &[
    "tornado",
    "tsunami",
    "hurricane",
    "typhoon",
    "extreme cold",
    "extreme heat",
    "avalanche",
];

/// Event names that lift a Canadian watch to [`UnifiedSeverity::High`].
pub const EC_HIGH_IMPACT_WATCH_EVENTS: &[&str] = &["tornado", "tsunami", "severe thunderstorm"];
