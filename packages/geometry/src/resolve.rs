//! Best-available geometry for an alert.
//!
//! Tiers are tried in order and the first success wins:
//!
//! 1. the alert's own non-empty geometry, unchanged;
//! 2. zones whose identifier equals one of the alert's jurisdiction codes
//!    (case-insensitive), merged into a multi-polygon when several match;
//! 3. the first zone whose identifier contains the leading characters of
//!    any jurisdiction code, replaced by a circular buffer around its
//!    centroid.

use alert_map_alert_models::RawAlert;
use alert_map_geometry_models::{Geometry, GeometrySource, MultiPolygon, Point, Zone};

use crate::measure::{buffer_point, centroid};

/// Tunables for the zone fallback tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackOptions {
    /// Radius of the circle drawn around a loosely matched zone.
    pub buffer_radius_km: f64,
    /// Number of segments approximating that circle.
    pub buffer_segments: usize,
    /// How many leading characters of a jurisdiction code the loose match
    /// looks for.
    pub prefix_len: usize,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            buffer_radius_km: 50.0,
            buffer_segments: 16,
            prefix_len: 3,
        }
    }
}

/// A resolved shape together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    /// The shape.
    pub geometry: Geometry,
    /// The tier that produced it.
    pub source: GeometrySource,
}

/// Resolves an alert's geometry with the default fallback options.
///
/// `None` means the alert cannot be placed on a map and should only be
/// listed.
#[must_use]
pub fn resolve_alert_geometry(alert: &RawAlert, zones: &[Zone]) -> Option<Geometry> {
    resolve_alert_geometry_with(alert, zones, &FallbackOptions::default()).map(|r| r.geometry)
}

/// Resolves an alert's geometry, reporting which tier succeeded.
#[must_use]
pub fn resolve_alert_geometry_with(
    alert: &RawAlert,
    zones: &[Zone],
    options: &FallbackOptions,
) -> Option<ResolvedGeometry> {
    if let Some(geometry) = alert.inline_geometry() {
        return Some(ResolvedGeometry {
            geometry,
            source: GeometrySource::Inline,
        });
    }

    let codes = alert.jurisdiction_codes();
    if codes.is_empty() || zones.is_empty() {
        log::debug!(
            "No geometry for alert {:?}: no inline shape and nothing to match",
            alert.id
        );
        return None;
    }

    if let Some(resolved) = match_exact_zones(codes, zones) {
        log::debug!(
            "Resolved alert {:?} from zones ({})",
            alert.id,
            resolved.source
        );
        return Some(resolved);
    }

    if let Some(resolved) = buffer_prefix_zone(codes, zones, options) {
        log::debug!("Resolved alert {:?} by buffering a prefix-matched zone", alert.id);
        return Some(resolved);
    }

    log::debug!("No zone matched alert {:?} codes {codes:?}", alert.id);
    None
}

fn match_exact_zones(codes: &[String], zones: &[Zone]) -> Option<ResolvedGeometry> {
    let matched: Vec<&Zone> = zones
        .iter()
        .filter(|zone| codes.iter().any(|code| code.eq_ignore_ascii_case(&zone.id)))
        .collect();

    match matched.as_slice() {
        [] => None,
        [single] => Some(ResolvedGeometry {
            geometry: single.geometry.clone(),
            source: GeometrySource::Zone,
        }),
        many => {
            let polygons: Vec<_> = many
                .iter()
                .flat_map(|zone| match &zone.geometry {
                    Geometry::Polygon(polygon) => vec![polygon.clone()],
                    Geometry::MultiPolygon(multi) => multi.polygons.clone(),
                    Geometry::Point(_) => {
                        log::debug!("Skipping point zone {} while merging", zone.id);
                        vec![]
                    }
                })
                .collect();

            if polygons.is_empty() {
                return None;
            }

            Some(ResolvedGeometry {
                geometry: Geometry::MultiPolygon(MultiPolygon::new(polygons)),
                source: GeometrySource::Zones,
            })
        }
    }
}

fn buffer_prefix_zone(
    codes: &[String],
    zones: &[Zone],
    options: &FallbackOptions,
) -> Option<ResolvedGeometry> {
    let prefixes: Vec<String> = codes
        .iter()
        .map(|code| {
            code.chars()
                .take(options.prefix_len)
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|prefix| !prefix.is_empty())
        .collect();

    let zone = zones.iter().find(|zone| {
        let id = zone.id.to_lowercase();
        prefixes.iter().any(|prefix| id.contains(prefix.as_str()))
    })?;

    let anchor = zone_anchor(&zone.geometry)?;
    let polygon = buffer_point(&anchor, options.buffer_radius_km, options.buffer_segments);

    Some(ResolvedGeometry {
        geometry: Geometry::Polygon(polygon),
        source: GeometrySource::BufferedZone,
    })
}

/// Point a buffer is centered on: the vertex centroid of the zone's first
/// ring, or the zone itself when it is a point.
fn zone_anchor(geometry: &Geometry) -> Option<Point> {
    match geometry {
        Geometry::Point(point) => Some(*point),
        Geometry::Polygon(polygon) => centroid(&polygon.ring),
        Geometry::MultiPolygon(multi) => centroid(&multi.polygons.first()?.ring),
    }
}

#[cfg(test)]
mod tests {
    use alert_map_alert_models::Geocode;
    use alert_map_geometry_models::Polygon;

    use super::*;
    use crate::point_in_polygon;

    fn square(min_x: f64, min_y: f64, size: f64) -> Polygon {
        let p = |lng, lat| Point { lng, lat };
        Polygon::new(vec![
            p(min_x, min_y),
            p(min_x + size, min_y),
            p(min_x + size, min_y + size),
            p(min_x, min_y + size),
            p(min_x, min_y),
        ])
    }

    fn zones() -> Vec<Zone> {
        vec![
            Zone::new("TXZ211", Geometry::Polygon(square(-98.0, 30.0, 1.0))),
            Zone::new("TXZ212", Geometry::Polygon(square(-97.0, 30.0, 1.0))),
            Zone::new("OKC109", Geometry::Polygon(square(-97.8, 35.2, 0.5))),
        ]
    }

    fn alert_with_codes(codes: &[&str]) -> RawAlert {
        RawAlert {
            geocode: Some(Geocode {
                ugc: codes.iter().map(ToString::to_string).collect(),
            }),
            ..RawAlert::default()
        }
    }

    #[test]
    fn inline_geometry_is_returned_unchanged() {
        let mut alert = alert_with_codes(&["TXZ211"]);
        alert.geometry = Some(serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[-100.0, 40.0], [-99.0, 40.0], [-99.0, 41.0], [-100.0, 40.0]]]
        }));
        let resolved = resolve_alert_geometry_with(&alert, &zones(), &FallbackOptions::default())
            .unwrap();
        assert_eq!(resolved.source, GeometrySource::Inline);
        let p = |lng, lat| Point { lng, lat };
        assert_eq!(
            resolved.geometry,
            Geometry::Polygon(Polygon::new(vec![
                p(-100.0, 40.0),
                p(-99.0, 40.0),
                p(-99.0, 41.0),
                p(-100.0, 40.0),
            ]))
        );
    }

    #[test]
    fn open_inline_ring_is_not_closed() {
        let mut alert = alert_with_codes(&[]);
        alert.geometry = Some(serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[-100.0, 40.0], [-99.0, 40.0], [-99.0, 41.0]]]
        }));
        let Some(Geometry::Polygon(polygon)) = resolve_alert_geometry(&alert, &[]) else {
            panic!("expected an inline polygon");
        };
        assert_eq!(polygon.ring.len(), 3);
        assert_eq!(polygon.ring[2], Point { lng: -99.0, lat: 41.0 });
    }

    #[test]
    fn single_zone_match_returns_zone_geometry() {
        let zones = zones();
        let alert = alert_with_codes(&["txz212"]);
        assert_eq!(
            resolve_alert_geometry(&alert, &zones),
            Some(zones[1].geometry.clone())
        );
    }

    #[test]
    fn empty_inline_geometry_falls_through() {
        let zones = zones();
        let mut alert = alert_with_codes(&["TXZ211"]);
        alert.geometry = Some(serde_json::json!({ "type": "Polygon", "coordinates": [] }));
        assert_eq!(
            resolve_alert_geometry(&alert, &zones),
            Some(zones[0].geometry.clone())
        );
    }

    #[test]
    fn multiple_zone_matches_merge_in_zone_order() {
        let zones = zones();
        let alert = alert_with_codes(&["TXZ212", "TXZ211"]);
        let resolved = resolve_alert_geometry_with(&alert, &zones, &FallbackOptions::default())
            .unwrap();
        assert_eq!(resolved.source, GeometrySource::Zones);
        assert_eq!(
            resolved.geometry,
            Geometry::MultiPolygon(MultiPolygon::new(vec![
                square(-98.0, 30.0, 1.0),
                square(-97.0, 30.0, 1.0),
            ]))
        );
    }

    #[test]
    fn prefix_match_buffers_zone_centroid() {
        let zones = zones();
        let alert = alert_with_codes(&["OKC999"]);
        let resolved = resolve_alert_geometry_with(&alert, &zones, &FallbackOptions::default())
            .unwrap();
        assert_eq!(resolved.source, GeometrySource::BufferedZone);

        let Geometry::Polygon(polygon) = resolved.geometry else {
            panic!("expected a buffer polygon");
        };
        assert_eq!(polygon.ring.len(), 17);

        let anchor = centroid(&square(-97.8, 35.2, 0.5).ring).unwrap();
        assert!(point_in_polygon(&anchor, &polygon));
        let north = polygon.ring[4];
        assert!((north.lat - anchor.lat - 50.0 / 111.0).abs() < 1e-9);
    }

    #[test]
    fn nothing_resolvable_is_none() {
        let zones = zones();
        assert!(resolve_alert_geometry(&alert_with_codes(&["MNZ001"]), &zones).is_none());
        assert!(resolve_alert_geometry(&RawAlert::default(), &zones).is_none());
        assert!(resolve_alert_geometry(&alert_with_codes(&["TXZ211"]), &[]).is_none());
    }

    #[test]
    fn malformed_inline_geometry_uses_zones() {
        let zones = zones();
        let mut alert = alert_with_codes(&["OKC109"]);
        alert.geometry = Some(serde_json::json!({ "type": "Polygon" }));
        assert_eq!(
            resolve_alert_geometry(&alert, &zones),
            Some(zones[2].geometry.clone())
        );
    }
}
