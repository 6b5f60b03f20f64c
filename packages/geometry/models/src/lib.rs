#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic primitives shared by the alert normalization engine.
//!
//! Coordinates are WGS84 degrees in `(longitude, latitude)` order. Only the
//! outer ring of a polygon is modeled; holes present in source `GeoJSON` are
//! dropped on conversion. [`Geometry`] serializes as a `GeoJSON` geometry
//! object so canonical alerts can be handed straight to a map layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Minimum number of vertices a ring needs to bound an area.
pub const MIN_RING_POINTS: usize = 3;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
}

impl Point {
    /// Creates a point after validating both coordinates.
    ///
    /// The poles and the antimeridian are valid positions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPointError`] if either coordinate is non-finite or
    /// outside its valid range.
    pub fn new(lng: f64, lat: f64) -> Result<Self, InvalidPointError> {
        let point = Self { lng, lat };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(InvalidPointError { lng, lat })
        }
    }

    /// Whether both coordinates are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Error returned when a coordinate pair is not a valid WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidPointError {
    /// The rejected longitude.
    pub lng: f64,
    /// The rejected latitude.
    pub lat: f64,
}

impl std::fmt::Display for InvalidPointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid point ({}, {}): expected longitude in [-180, 180] and latitude in [-90, 90]",
            self.lng, self.lat
        )
    }
}

impl std::error::Error for InvalidPointError {}

/// An ordered boundary of points. Closure (first == last) is not required.
pub type Ring = Vec<Point>;

/// A polygon described by its outer ring only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// The outer boundary.
    pub ring: Ring,
}

impl Polygon {
    /// Creates a polygon from its outer ring.
    #[must_use]
    pub const fn new(ring: Ring) -> Self {
        Self { ring }
    }
}

/// An ordered collection of polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    /// Member polygons in source order.
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a multi-polygon from its members.
    #[must_use]
    pub const fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Western edge (minimum longitude).
    pub min_x: f64,
    /// Southern edge (minimum latitude).
    pub min_y: f64,
    /// Eastern edge (maximum longitude).
    pub max_x: f64,
    /// Northern edge (maximum latitude).
    pub max_y: f64,
}

/// The shape of an alert area.
///
/// Serialized as a `GeoJSON` geometry object (`{"type": ..., "coordinates": ...}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position, typically an observation site.
    Point(Point),
    /// A single area.
    Polygon(Polygon),
    /// Several disjoint areas.
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// Returns the discriminant of this geometry.
    #[must_use]
    pub const fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Whether the geometry carries no coordinates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::Polygon(polygon) => polygon.ring.is_empty(),
            Self::MultiPolygon(multi) => multi.polygons.iter().all(|p| p.ring.is_empty()),
        }
    }

    /// Leniently converts an untyped `GeoJSON` geometry value.
    ///
    /// Returns `None` for anything that is not a well-formed `Point`,
    /// `Polygon`, or `MultiPolygon` with valid coordinates. Polygons keep
    /// only their first ring.
    #[must_use]
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        let geojson: geojson::Geometry = serde_json::from_value(value.clone()).ok()?;
        Self::try_from(geojson).ok()
    }
}

/// Structural kind of a geometry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GeometryType {
    /// `GeoJSON` `Point`
    Point,
    /// `GeoJSON` `Polygon`
    Polygon,
    /// `GeoJSON` `MultiPolygon`
    MultiPolygon,
    /// Anything else, or a missing type tag
    Unknown,
}

impl GeometryType {
    /// Reads the `type` tag of an untyped `GeoJSON` geometry value.
    #[must_use]
    pub fn of_json(value: &serde_json::Value) -> Self {
        value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(Self::Unknown)
    }
}

/// A named reference area (for example a UGC forecast zone) used to
/// reconstruct alert geometry when the alert carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone identifier (e.g. `"TXZ211"`).
    pub id: String,
    /// Zone shape.
    pub geometry: Geometry,
}

impl Zone {
    /// Creates a zone.
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }
}

/// Which fallback tier produced an alert's geometry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometrySource {
    /// The alert carried its own geometry
    Inline,
    /// Exactly one zone matched the alert's jurisdiction codes
    Zone,
    /// Several zones matched and were merged into a multi-polygon
    Zones,
    /// A circular buffer around a loosely matched zone's centroid
    BufferedZone,
    /// Nothing could be resolved; the alert is list-view only
    None,
}

/// Error returned when a foreign geometry cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryConversionError {
    /// The geometry kind is not a point, polygon, or multi-polygon.
    UnsupportedType(String),
    /// A polygon ring has fewer than [`MIN_RING_POINTS`] vertices.
    DegenerateRing(usize),
    /// A multi-polygon has no members.
    EmptyMultiPolygon,
    /// A coordinate is out of range or non-finite.
    InvalidPoint(InvalidPointError),
    /// The `GeoJSON` could not be converted to `geo` types.
    GeoJson(String),
}

impl std::fmt::Display for GeometryConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType(kind) => write!(f, "unsupported geometry type: {kind}"),
            Self::DegenerateRing(len) => write!(
                f,
                "ring has {len} vertices, at least {MIN_RING_POINTS} required"
            ),
            Self::EmptyMultiPolygon => f.write_str("multi-polygon has no members"),
            Self::InvalidPoint(e) => e.fmt(f),
            Self::GeoJson(message) => write!(f, "invalid GeoJSON geometry: {message}"),
        }
    }
}

impl std::error::Error for GeometryConversionError {}

impl From<InvalidPointError> for GeometryConversionError {
    fn from(value: InvalidPointError) -> Self {
        Self::InvalidPoint(value)
    }
}

// ── geo interop ─────────────────────────────────────────────────────────

impl From<&Point> for geo::Point<f64> {
    fn from(value: &Point) -> Self {
        Self::new(value.lng, value.lat)
    }
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        let exterior: geo::LineString<f64> = value
            .ring
            .iter()
            .map(|p| geo::Coord { x: p.lng, y: p.lat })
            .collect();
        Self::new(exterior, vec![])
    }
}

impl From<&MultiPolygon> for geo::MultiPolygon<f64> {
    fn from(value: &MultiPolygon) -> Self {
        Self(value.polygons.iter().map(geo::Polygon::from).collect())
    }
}

impl From<&Geometry> for geo::Geometry<f64> {
    fn from(value: &Geometry) -> Self {
        match value {
            Geometry::Point(p) => Self::Point(p.into()),
            Geometry::Polygon(p) => Self::Polygon(p.into()),
            Geometry::MultiPolygon(mp) => Self::MultiPolygon(mp.into()),
        }
    }
}

/// Vertex count of a ring, not counting a closing repeat of the first.
fn distinct_vertices(ring: &[Point]) -> usize {
    let closed = ring.len() > 1 && ring.first() == ring.last();
    ring.len() - usize::from(closed)
}

fn polygon_from_geo(polygon: &geo::Polygon<f64>) -> Result<Polygon, GeometryConversionError> {
    let ring = polygon
        .exterior()
        .coords()
        .map(|c| Point::new(c.x, c.y))
        .collect::<Result<Ring, _>>()?;
    // geo closes rings on construction.
    let vertices = distinct_vertices(&ring);
    if vertices < MIN_RING_POINTS {
        return Err(GeometryConversionError::DegenerateRing(vertices));
    }
    Ok(Polygon::new(ring))
}

impl TryFrom<&geo::Geometry<f64>> for Geometry {
    type Error = GeometryConversionError;

    fn try_from(value: &geo::Geometry<f64>) -> Result<Self, Self::Error> {
        match value {
            geo::Geometry::Point(p) => Ok(Self::Point(Point::new(p.x(), p.y())?)),
            geo::Geometry::Polygon(p) => Ok(Self::Polygon(polygon_from_geo(p)?)),
            geo::Geometry::Rect(r) => Ok(Self::Polygon(polygon_from_geo(&r.to_polygon())?)),
            geo::Geometry::Triangle(t) => Ok(Self::Polygon(polygon_from_geo(&t.to_polygon())?)),
            geo::Geometry::MultiPolygon(mp) => {
                if mp.0.is_empty() {
                    return Err(GeometryConversionError::EmptyMultiPolygon);
                }
                let polygons = mp
                    .0
                    .iter()
                    .map(polygon_from_geo)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::MultiPolygon(MultiPolygon::new(polygons)))
            }
            other => Err(GeometryConversionError::UnsupportedType(
                geometry_kind_name(other).to_string(),
            )),
        }
    }
}

const fn geometry_kind_name(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

// ── GeoJSON interop ─────────────────────────────────────────────────────

fn position(point: &Point) -> geojson::Position {
    vec![point.lng, point.lat]
}

fn ring_positions(polygon: &Polygon) -> Vec<Vec<geojson::Position>> {
    vec![polygon.ring.iter().map(position).collect()]
}

impl From<&Geometry> for geojson::Geometry {
    fn from(value: &Geometry) -> Self {
        let value = match value {
            Geometry::Point(p) => geojson::Value::Point(position(p)),
            Geometry::Polygon(p) => geojson::Value::Polygon(ring_positions(p)),
            Geometry::MultiPolygon(mp) => {
                geojson::Value::MultiPolygon(mp.polygons.iter().map(ring_positions).collect())
            }
        };
        Self::new(value)
    }
}

fn point_from_position(position: &[f64]) -> Result<Point, GeometryConversionError> {
    let &[lng, lat, ..] = position else {
        return Err(GeometryConversionError::GeoJson(format!(
            "position has {} coordinates, at least 2 required",
            position.len()
        )));
    };
    Ok(Point::new(lng, lat)?)
}

/// Builds a polygon from the first ring, keeping its vertices as given.
fn polygon_from_rings(rings: &[Vec<geojson::Position>]) -> Result<Polygon, GeometryConversionError> {
    let ring = rings
        .first()
        .map(|ring| {
            ring.iter()
                .map(|p| point_from_position(p))
                .collect::<Result<Ring, _>>()
        })
        .transpose()?
        .unwrap_or_default();
    let vertices = distinct_vertices(&ring);
    if vertices < MIN_RING_POINTS {
        return Err(GeometryConversionError::DegenerateRing(vertices));
    }
    Ok(Polygon::new(ring))
}

impl TryFrom<geojson::Geometry> for Geometry {
    type Error = GeometryConversionError;

    fn try_from(value: geojson::Geometry) -> Result<Self, Self::Error> {
        match &value.value {
            geojson::Value::Point(p) => Ok(Self::Point(point_from_position(p)?)),
            geojson::Value::Polygon(rings) => Ok(Self::Polygon(polygon_from_rings(rings)?)),
            geojson::Value::MultiPolygon(members) => {
                if members.is_empty() {
                    return Err(GeometryConversionError::EmptyMultiPolygon);
                }
                let polygons = members
                    .iter()
                    .map(|rings| polygon_from_rings(rings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::MultiPolygon(MultiPolygon::new(polygons)))
            }
            other => Err(GeometryConversionError::UnsupportedType(
                other.type_name().to_string(),
            )),
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        geojson::Geometry::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let geojson = geojson::Geometry::deserialize(deserializer)?;
        Self::try_from(geojson).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_accepts_boundaries() {
        assert!(Point::new(180.0, 90.0).is_ok());
        assert!(Point::new(-180.0, -90.0).is_ok());
    }

    #[test]
    fn point_rejects_out_of_range_and_nan() {
        assert!(Point::new(180.5, 0.0).is_err());
        assert!(Point::new(0.0, -90.1).is_err());
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn converts_polygon_keeping_outer_ring_only() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]
            ]
        });
        let Some(Geometry::Polygon(polygon)) = Geometry::from_json_value(&value) else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.ring.len(), 5);
        assert_eq!(polygon.ring[1], Point { lng: 10.0, lat: 0.0 });
    }

    #[test]
    fn rejects_ring_with_two_distinct_vertices() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]
        });
        assert!(Geometry::from_json_value(&value).is_none());
    }

    #[test]
    fn keeps_open_rings_as_given() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]
        });
        let Some(Geometry::Polygon(polygon)) = Geometry::from_json_value(&value) else {
            panic!("expected a polygon");
        };
        assert_eq!(
            polygon.ring,
            [
                Point { lng: 0.0, lat: 0.0 },
                Point { lng: 1.0, lat: 0.0 },
                Point { lng: 1.0, lat: 1.0 },
            ]
        );
        let json = serde_json::to_value(Geometry::Polygon(polygon)).unwrap();
        assert_eq!(json["coordinates"], value["coordinates"]);
    }

    #[test]
    fn rejects_short_positions() {
        let value = serde_json::json!({ "type": "Point", "coordinates": [1.0] });
        assert!(Geometry::from_json_value(&value).is_none());
    }

    #[test]
    fn converts_from_geo_closing_rings() {
        let open = geo::Polygon::new(
            geo::LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            vec![],
        );
        let Ok(Geometry::Polygon(polygon)) = Geometry::try_from(&geo::Geometry::Polygon(open))
        else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.ring.len(), 4);
        assert_eq!(polygon.ring.first(), polygon.ring.last());

        let line = geo::Geometry::LineString(geo::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(
            Geometry::try_from(&line),
            Err(GeometryConversionError::UnsupportedType("LineString".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let value = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [200.0, 0.0], [10.0, 10.0], [0.0, 0.0]]]
        });
        assert!(Geometry::from_json_value(&value).is_none());
    }

    #[test]
    fn rejects_null_and_unsupported_geometry() {
        assert!(Geometry::from_json_value(&serde_json::Value::Null).is_none());
        let line = serde_json::json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0], [1.0, 1.0]]
        });
        assert!(Geometry::from_json_value(&line).is_none());
    }

    #[test]
    fn serializes_as_geojson() {
        let geometry = Geometry::Point(Point { lng: -97.5, lat: 35.2 });
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"], serde_json::json!([-97.5, 35.2]));
    }

    #[test]
    fn deserializes_multipolygon() {
        let json = r#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                [[[5, 5], [6, 5], [6, 6], [5, 5]]]
            ]
        }"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::MultiPolygon);
        let Geometry::MultiPolygon(multi) = geometry else {
            panic!("expected a multi-polygon");
        };
        assert_eq!(multi.polygons.len(), 2);
    }

    #[test]
    fn geometry_type_of_raw_json() {
        let value = serde_json::json!({"type": "MultiPolygon", "coordinates": []});
        assert_eq!(GeometryType::of_json(&value), GeometryType::MultiPolygon);
        let value = serde_json::json!({"type": "GeometryCollection"});
        assert_eq!(GeometryType::of_json(&value), GeometryType::Unknown);
        assert_eq!(
            GeometryType::of_json(&serde_json::json!({})),
            GeometryType::Unknown
        );
    }
}
