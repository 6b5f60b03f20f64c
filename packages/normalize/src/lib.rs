#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The alert normalization pipeline.
//!
//! A raw record goes through severity unification, geometry resolution,
//! and unit harmonization, and comes out as a [`CanonicalAlert`] ready for
//! map rendering and severity-ordered lists. Normalization never fails: an
//! alert that cannot be placed keeps a `None` geometry and is list-only.
//!
//! This crate also owns the inputs the pipeline needs: [`NormalizeConfig`],
//! the zone reference dataset ([`zones`]), and raw alert documents
//! ([`alerts`]).

pub mod alerts;
pub mod config;
pub mod error;
pub mod zones;

use alert_map_alert_models::{CanonicalAlert, RawAlert};
use alert_map_geometry::{FallbackOptions, resolve_alert_geometry_with, simplify};
use alert_map_geometry_models::{Geometry, GeometrySource, MultiPolygon, Zone};
use alert_map_severity::{apply_unified_severity, sort_by_severity};
use alert_map_units::{
    detect_measurement_system, extract_temperatures, harmonize_parameters, normalize_temperature,
};
use alert_map_units_models::{NormalizedTemperature, TemperatureMention, TemperatureUnit};

pub use alerts::{load_raw_alerts, parse_raw_alerts};
pub use config::NormalizeConfig;
pub use error::NormalizeError;
pub use zones::{load_zones, parse_zones_geojson};

/// Text fields are scanned as one document joined by this separator, so
/// mention positions are offsets into headline, description, and
/// instruction in that order.
const TEXT_SEPARATOR: &str = "\n\n";

/// Normalizes one raw alert against a zone reference set.
#[must_use]
pub fn normalize_alert(raw: RawAlert, zones: &[Zone], config: &NormalizeConfig) -> CanonicalAlert {
    let mut alert = raw;
    let unified_severity = apply_unified_severity(&mut alert);

    let options = FallbackOptions::from(&config.fallback);
    let (geometry, geometry_source) = match resolve_alert_geometry_with(&alert, zones, &options) {
        Some(resolved) => (Some(resolved.geometry), resolved.source),
        None => {
            log::warn!("Alert {:?} has no resolvable geometry, list view only", alert.id);
            (None, GeometrySource::None)
        }
    };
    let geometry = match config.display.simplify_tolerance_deg {
        Some(tolerance) => geometry.map(|g| simplify_geometry(g, tolerance)),
        None => geometry,
    };

    let measurement_system = detect_measurement_system(alert.source.as_deref().unwrap_or_default());
    let text = alert.text_fields().collect::<Vec<_>>().join(TEXT_SEPARATOR);
    let temperatures = extract_temperatures(&text, measurement_system);
    let normalized_temperatures = temperatures
        .iter()
        .map(|mention| normalize_mention(mention, config.target_temperature_unit))
        .collect();
    let measurements = harmonize_parameters(&alert.parameters, measurement_system);

    CanonicalAlert {
        alert,
        unified_severity,
        geometry,
        geometry_source,
        measurement_system,
        temperatures,
        normalized_temperatures,
        measurements,
    }
}

/// Normalizes a batch, most severe first. Alerts of equal tier keep their
/// input order.
#[must_use]
pub fn normalize_alerts(
    raws: impl IntoIterator<Item = RawAlert>,
    zones: &[Zone],
    config: &NormalizeConfig,
) -> Vec<CanonicalAlert> {
    let mut alerts: Vec<CanonicalAlert> = raws
        .into_iter()
        .map(|raw| normalize_alert(raw, zones, config))
        .collect();
    sort_by_severity(&mut alerts);

    let mappable = alerts.iter().filter(|a| a.is_mappable()).count();
    log::info!(
        "Normalized {} alerts ({mappable} mappable, {} list-only)",
        alerts.len(),
        alerts.len() - mappable
    );
    alerts
}

fn simplify_geometry(geometry: Geometry, tolerance: f64) -> Geometry {
    match geometry {
        Geometry::Point(_) => geometry,
        Geometry::Polygon(polygon) => Geometry::Polygon(simplify(&polygon, tolerance)),
        Geometry::MultiPolygon(multi) => Geometry::MultiPolygon(MultiPolygon::new(
            multi
                .polygons
                .iter()
                .map(|polygon| simplify(polygon, tolerance))
                .collect(),
        )),
    }
}

fn normalize_mention(mention: &TemperatureMention, target: TemperatureUnit) -> NormalizedTemperature {
    let written = match mention.unit {
        TemperatureUnit::Celsius => mention.celsius,
        TemperatureUnit::Fahrenheit => mention.fahrenheit,
    };
    normalize_temperature(Some(written), mention.unit, target)
}
