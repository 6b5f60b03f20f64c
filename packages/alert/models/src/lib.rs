#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw alert records and the canonical normalized alert format.
//!
//! Feed retrieval produces [`RawAlert`] records: the US feed's `GeoJSON`
//! feature properties and the Canadian CAP bulletins, already lifted out of
//! their envelopes. The normalization pipeline turns each one into a
//! [`CanonicalAlert`] with a unified severity and a resolved shape.

use std::collections::BTreeMap;

use alert_map_geometry_models::{Geometry, GeometrySource};
use alert_map_severity_models::UnifiedSeverity;
use alert_map_units_models::{
    HarmonizedMeasurement, MeasurementSystem, NormalizedTemperature, TemperatureMention,
};
use serde::{Deserialize, Serialize};

/// Jurisdiction codes attached to an alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geocode {
    /// Universal Geographic Codes (e.g. `"TXZ211"`).
    #[serde(rename = "UGC", default)]
    pub ugc: Vec<String>,
}

/// Nested CAP `info` block, used as a fallback by Canadian records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInfo {
    /// CAP category, or the alert type when the envelope stores it here.
    pub category: Option<String>,
    /// Event name.
    pub event: Option<String>,
}

/// An alert as extracted from a source feed, before normalization.
///
/// Fields are optional because neither authority fills all of them; the
/// US feed sets `severity`/`urgency`/`certainty` while the Canadian feed
/// sets `type` and the event name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlert {
    /// Source-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Originating authority tag (e.g. `"NWS"`, `"EC"`).
    #[serde(default)]
    pub source: Option<String>,
    /// Short headline.
    #[serde(default)]
    pub headline: Option<String>,
    /// Bulletin body text.
    #[serde(default)]
    pub description: Option<String>,
    /// Recommended actions.
    #[serde(default)]
    pub instruction: Option<String>,
    /// Event name (e.g. `"Tornado Warning"`).
    #[serde(default)]
    pub event: Option<String>,
    /// Canadian free-text event category, preferred over [`Self::event`].
    #[serde(default, rename = "eventCategory")]
    pub event_category: Option<String>,
    /// Canadian alert type: warning, watch, advisory, statement, or ended.
    #[serde(default, rename = "type")]
    pub alert_type: Option<String>,
    /// CAP severity (US).
    #[serde(default)]
    pub severity: Option<String>,
    /// CAP urgency (US).
    #[serde(default)]
    pub urgency: Option<String>,
    /// CAP certainty (US).
    #[serde(default)]
    pub certainty: Option<String>,
    /// Jurisdiction codes.
    #[serde(default)]
    pub geocode: Option<Geocode>,
    /// Untyped `GeoJSON` geometry exactly as the feed supplied it.
    ///
    /// Kept untyped so a malformed shape degrades to "no geometry" instead
    /// of rejecting the whole record.
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    /// Nested CAP info block.
    #[serde(default)]
    pub info: Option<AlertInfo>,
    /// Structured CAP parameters (e.g. `maxWindGust`).
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<String>>,
    /// Severity assigned by a previous pass, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unified_severity: Option<UnifiedSeverity>,
}

impl RawAlert {
    /// Returns the alert's jurisdiction codes, empty when none were supplied.
    #[must_use]
    pub fn jurisdiction_codes(&self) -> &[String] {
        self.geocode
            .as_ref()
            .map(|g| g.ugc.as_slice())
            .unwrap_or_default()
    }

    /// Returns the alert's own geometry when it is present, well-formed,
    /// and non-empty.
    #[must_use]
    pub fn inline_geometry(&self) -> Option<Geometry> {
        self.geometry
            .as_ref()
            .and_then(Geometry::from_json_value)
            .filter(|g| !g.is_empty())
    }

    /// All free-form text of the alert, in reading order.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [&self.headline, &self.description, &self.instruction]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }
}

/// A normalized alert, ready for spatial queries and severity-ordered display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAlert {
    /// The source record.
    pub alert: RawAlert,
    /// Severity on the shared five-tier ladder.
    pub unified_severity: UnifiedSeverity,
    /// Resolved shape, `None` when the alert is not mappable.
    pub geometry: Option<Geometry>,
    /// Which fallback tier produced [`Self::geometry`].
    pub geometry_source: GeometrySource,
    /// The measurement system the source reports in.
    pub measurement_system: MeasurementSystem,
    /// Temperatures mentioned in the alert text.
    #[serde(default)]
    pub temperatures: Vec<TemperatureMention>,
    /// The same temperatures in the configured display unit.
    #[serde(default)]
    pub normalized_temperatures: Vec<NormalizedTemperature>,
    /// Structured measurements rendered in both systems.
    #[serde(default)]
    pub measurements: Vec<HarmonizedMeasurement>,
}

impl CanonicalAlert {
    /// Whether the alert can be drawn on a map.
    #[must_use]
    pub const fn is_mappable(&self) -> bool {
        self.geometry.is_some()
    }
}
