//! Zone reference datasets.
//!
//! Zones arrive as a `GeoJSON` `FeatureCollection`, one feature per
//! forecast zone or county. Features without a usable identifier or shape
//! are skipped so a single bad entry does not lose the dataset.

use std::path::Path;

use alert_map_geometry_models::{Geometry, Zone};
use geojson::{Feature, GeoJson, feature::Id};

use crate::NormalizeError;

/// Parses a zone dataset.
///
/// A zone's identifier is the first of `id_properties` present on the
/// feature as a string or number, falling back to the feature's own `id`.
///
/// # Errors
///
/// * If the text is not `GeoJSON`
/// * If the document is a bare geometry rather than features
pub fn parse_zones_geojson(
    text: &str,
    id_properties: &[String],
) -> Result<Vec<Zone>, NormalizeError> {
    let features = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(NormalizeError::InvalidDocument {
                message: "zone dataset is a bare geometry, expected features".to_string(),
            });
        }
    };

    let total = features.len();
    let zones: Vec<Zone> = features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| zone_from_feature(index, feature, id_properties))
        .collect();

    log::info!("Loaded {} zones ({} skipped)", zones.len(), total - zones.len());
    Ok(zones)
}

/// Reads and parses a zone dataset file.
///
/// # Errors
///
/// * If the file cannot be read
/// * If its contents fail to parse (see [`parse_zones_geojson`])
pub fn load_zones(
    path: impl AsRef<Path>,
    id_properties: &[String],
) -> Result<Vec<Zone>, NormalizeError> {
    let text = std::fs::read_to_string(path)?;
    parse_zones_geojson(&text, id_properties)
}

fn zone_from_feature(index: usize, feature: Feature, id_properties: &[String]) -> Option<Zone> {
    let Some(id) = zone_id(&feature, id_properties) else {
        log::warn!("Skipping zone feature {index}: no identifier");
        return None;
    };
    let Some(geometry) = feature.geometry else {
        log::warn!("Skipping zone {id}: no geometry");
        return None;
    };

    match Geometry::try_from(geometry) {
        Ok(geometry) => Some(Zone::new(id, geometry)),
        Err(e) => {
            log::warn!("Skipping zone {id}: {e}");
            None
        }
    }
}

fn zone_id(feature: &Feature, id_properties: &[String]) -> Option<String> {
    id_properties
        .iter()
        .find_map(|key| feature.property(key).and_then(id_text))
        .or_else(|| match &feature.id {
            Some(Id::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            _ => None,
        })
}

fn id_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
