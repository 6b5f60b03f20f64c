//! Containment and overlap predicates.
//!
//! All predicates treat a polygon as its outer ring and return `false` for
//! degenerate input (rings shorter than three points, non-finite points).

use alert_map_geometry_models::{
    BoundingBox, Geometry, MIN_RING_POINTS, MultiPolygon, Point, Polygon,
};

/// Ray-casting point-in-polygon test over the outer ring.
///
/// Points exactly on an edge may land on either side.
#[must_use]
pub fn point_in_polygon(point: &Point, polygon: &Polygon) -> bool {
    let ring = &polygon.ring;
    if ring.len() < MIN_RING_POINTS || !point.lng.is_finite() || !point.lat.is_finite() {
        return false;
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);

        if (yi > y) != (yj > y) {
            let crossing_x = (xj - xi) * (y - yi) / (yj - yi) + xi;
            if x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Whether any member polygon contains the point.
#[must_use]
pub fn point_in_multi_polygon(point: &Point, multi_polygon: &MultiPolygon) -> bool {
    multi_polygon
        .polygons
        .iter()
        .any(|polygon| point_in_polygon(point, polygon))
}

/// Min/max scan over a ring. `None` for an empty ring.
#[must_use]
pub fn bounding_box(ring: &[Point]) -> Option<BoundingBox> {
    let first = ring.first()?;
    let init = BoundingBox {
        min_x: first.lng,
        min_y: first.lat,
        max_x: first.lng,
        max_y: first.lat,
    };

    Some(ring.iter().skip(1).fold(init, |bbox, p| BoundingBox {
        min_x: bbox.min_x.min(p.lng),
        min_y: bbox.min_y.min(p.lat),
        max_x: bbox.max_x.max(p.lng),
        max_y: bbox.max_y.max(p.lat),
    }))
}

/// Axis-aligned overlap test. Touching edges count as overlapping.
#[must_use]
pub fn bounding_boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.max_x < b.min_x || b.max_x < a.min_x || a.max_y < b.min_y || b.max_y < a.min_y)
}

/// Approximate polygon overlap test.
///
/// Rejects on bounding boxes first, then reports overlap when any vertex of
/// one polygon lies inside the other. Known limitation: two polygons that
/// cross without either containing a vertex of the other (an "X" of two
/// thin bars) are reported as disjoint.
#[must_use]
pub fn polygons_intersect(p1: &Polygon, p2: &Polygon) -> bool {
    let (Some(a), Some(b)) = (bounding_box(&p1.ring), bounding_box(&p2.ring)) else {
        return false;
    };
    if !bounding_boxes_intersect(&a, &b) {
        return false;
    }

    p1.ring.iter().any(|p| point_in_polygon(p, p2))
        || p2.ring.iter().any(|p| point_in_polygon(p, p1))
}

/// Structural validity: a finite point, a ring of at least three points, or
/// a non-empty list of such rings. Ring closure and winding are not checked.
#[must_use]
pub fn is_valid_geometry(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(point) => point.is_valid(),
        Geometry::Polygon(polygon) => polygon.ring.len() >= MIN_RING_POINTS,
        Geometry::MultiPolygon(multi) => {
            !multi.polygons.is_empty()
                && multi
                    .polygons
                    .iter()
                    .all(|p| p.ring.len() >= MIN_RING_POINTS)
        }
    }
}
