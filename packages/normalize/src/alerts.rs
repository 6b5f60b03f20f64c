//! Raw alert documents.
//!
//! Accepts the shapes the feeds hand over: a `GeoJSON` `FeatureCollection`
//! whose features carry the alert in `properties` (geometry beside it), a
//! plain array of alert records, or a single record.

use std::path::Path;

use alert_map_alert_models::RawAlert;
use serde_json::Value;

use crate::NormalizeError;

/// Parses a raw alert document, skipping records that do not deserialize.
///
/// # Errors
///
/// * If the text is not JSON
/// * If the top-level value is neither an object nor an array
pub fn parse_raw_alerts(text: &str) -> Result<Vec<RawAlert>, NormalizeError> {
    let document: Value = serde_json::from_str(text)?;

    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("features") {
            Some(Value::Array(features)) => features,
            Some(_) => {
                return Err(NormalizeError::InvalidDocument {
                    message: "\"features\" is not an array".to_string(),
                });
            }
            None => vec![Value::Object(object)],
        },
        other => {
            return Err(NormalizeError::InvalidDocument {
                message: format!("expected an alert object or array, found {other}"),
            });
        }
    };

    let total = records.len();
    let alerts: Vec<RawAlert> = records
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, record)| match serde_json::from_value::<RawAlert>(lift_feature(record)) {
                Ok(alert) => Some(alert),
                Err(e) => {
                    log::warn!("Skipping alert record {index}: {e}");
                    None
                }
            },
        )
        .collect();

    log::info!("Parsed {} alerts ({} skipped)", alerts.len(), total - alerts.len());
    Ok(alerts)
}

/// Reads and parses a raw alert document file.
///
/// # Errors
///
/// * If the file cannot be read
/// * If its contents fail to parse (see [`parse_raw_alerts`])
pub fn load_raw_alerts(path: impl AsRef<Path>) -> Result<Vec<RawAlert>, NormalizeError> {
    let text = std::fs::read_to_string(path)?;
    parse_raw_alerts(&text)
}

/// Turns a `GeoJSON` feature into a flat alert record by moving its
/// geometry into the properties. Other records pass through.
fn lift_feature(record: Value) -> Value {
    let Value::Object(mut feature) = record else {
        return record;
    };
    let Some(Value::Object(mut properties)) = feature.remove("properties") else {
        return Value::Object(feature);
    };

    if let Some(geometry) = feature.remove("geometry").filter(|g| !g.is_null()) {
        properties.entry("geometry").or_insert(geometry);
    }
    if let Some(id) = feature.remove("id") {
        properties.entry("id").or_insert(id);
    }
    Value::Object(properties)
}
