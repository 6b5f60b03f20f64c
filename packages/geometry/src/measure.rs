//! Planar measurements and shape builders.
//!
//! Distances use a flat equirectangular approximation with
//! [`KM_PER_DEGREE`] kilometres per degree, which distorts noticeably at
//! high latitudes.

use std::f64::consts::TAU;

use alert_map_geometry_models::{MIN_RING_POINTS, Point, Polygon};

use crate::KM_PER_DEGREE;

/// Smallest longitude scale factor used by [`buffer_point`], so buffers
/// near the poles stay finite.
const MIN_LONGITUDE_SCALE: f64 = 0.01;

/// Vertex centroid (arithmetic mean of the ring's points).
///
/// This is not the area-weighted centroid; a closed ring counts its
/// repeated first vertex twice.
#[must_use]
pub fn centroid(ring: &[Point]) -> Option<Point> {
    if ring.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = ring.len() as f64;
    let (sum_x, sum_y) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.lng, sy + p.lat));

    let center = Point {
        lng: sum_x / count,
        lat: sum_y / count,
    };
    (center.lng.is_finite() && center.lat.is_finite()).then_some(center)
}

/// Regular `segments`-gon approximating a circle of `radius_km` around
/// `point`.
///
/// The ring is closed (its last vertex repeats the first), so it holds
/// `segments + 1` points. Fewer than three segments are raised to three.
#[must_use]
pub fn buffer_point(point: &Point, radius_km: f64, segments: usize) -> Polygon {
    let segments = segments.max(MIN_RING_POINTS);
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lng_scale = point.lat.to_radians().cos().abs().max(MIN_LONGITUDE_SCALE);
    let lng_delta = radius_km / (KM_PER_DEGREE * lng_scale);

    #[allow(clippy::cast_precision_loss)]
    let step = TAU / segments as f64;

    let mut ring: Vec<Point> = (0..segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            Point {
                lng: point.lng + lng_delta * angle.cos(),
                lat: point.lat + lat_delta * angle.sin(),
            }
        })
        .collect();
    ring.push(ring[0]);

    Polygon::new(ring)
}

/// Shoelace area of the outer ring in square kilometres.
#[must_use]
pub fn area(polygon: &Polygon) -> f64 {
    let ring = &polygon.ring;
    if ring.len() < MIN_RING_POINTS {
        return 0.0;
    }

    let twice_area: f64 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.lng.mul_add(b.lat, -(b.lng * a.lat)))
        .sum();

    (twice_area.abs() / 2.0) * KM_PER_DEGREE * KM_PER_DEGREE
}

/// Greedy single-pass vertex reduction.
///
/// Keeps the first and last vertices, and any intermediate vertex farther
/// than `tolerance_deg` from the last kept one. Order-dependent, and not
/// Douglas-Peucker. Returns the input unchanged if the result would no
/// longer bound an area.
#[must_use]
pub fn simplify(polygon: &Polygon, tolerance_deg: f64) -> Polygon {
    let ring = &polygon.ring;
    let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
        return polygon.clone();
    };
    if ring.len() <= 2 {
        return polygon.clone();
    }

    let mut kept = vec![*first];
    for p in &ring[1..ring.len() - 1] {
        let anchor = kept[kept.len() - 1];
        if distance_deg(&anchor, p) > tolerance_deg {
            kept.push(*p);
        }
    }
    kept.push(*last);

    let closed = first == last;
    let min_len = MIN_RING_POINTS + usize::from(closed);
    if kept.len() < min_len {
        return polygon.clone();
    }

    Polygon::new(kept)
}

/// Straight-line distance in degrees.
fn distance_deg(a: &Point, b: &Point) -> f64 {
    (a.lng - b.lng).hypot(a.lat - b.lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_in_polygon;

    fn pt(lng: f64, lat: f64) -> Point {
        Point { lng, lat }
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let c = centroid(&[pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0)]).unwrap();
        assert!((c.lng - 2.0).abs() < 1e-12);
        assert!((c.lat - 1.0).abs() < 1e-12);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn buffer_has_segments_plus_closing_vertex() {
        let center = pt(-97.0, 35.0);
        let polygon = buffer_point(&center, 50.0, 16);
        assert_eq!(polygon.ring.len(), 17);
        assert_eq!(polygon.ring.first(), polygon.ring.last());
        assert!(point_in_polygon(&center, &polygon));
    }

    #[test]
    fn buffer_vertices_sit_at_radius() {
        let center = pt(10.0, 0.0);
        let polygon = buffer_point(&center, 111.0, 8);
        // At the equator one degree is 111 km in both directions.
        for p in &polygon.ring {
            let d = distance_deg(&center, p);
            assert!((d - 1.0).abs() < 1e-9, "vertex {p:?} at {d} degrees");
        }
    }

    #[test]
    fn buffer_stretches_longitude_away_from_equator() {
        let polygon = buffer_point(&pt(0.0, 60.0), 111.0, 4);
        // cos(60 deg) = 0.5, so the east vertex sits two degrees out.
        assert!((polygon.ring[0].lng - 2.0).abs() < 1e-9);
        assert!((polygon.ring[1].lat - 61.0).abs() < 1e-9);
    }

    #[test]
    fn buffer_raises_segment_count() {
        assert_eq!(buffer_point(&pt(0.0, 0.0), 10.0, 1).ring.len(), 4);
    }

    #[test]
    fn area_of_one_degree_square() {
        let polygon = Polygon::new(vec![
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(1.0, 1.0),
            pt(0.0, 1.0),
            pt(0.0, 0.0),
        ]);
        assert!((area(&polygon) - 12_321.0).abs() < 1e-6);
        assert!(area(&Polygon::new(vec![pt(0.0, 0.0)])).abs() < f64::EPSILON);
    }

    #[test]
    fn area_ignores_winding() {
        let ccw = Polygon::new(vec![pt(0.0, 0.0), pt(2.0, 0.0), pt(0.0, 2.0)]);
        let cw = Polygon::new(vec![pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 0.0)]);
        assert!((area(&ccw) - area(&cw)).abs() < 1e-9);
    }

    #[test]
    fn simplify_drops_close_vertices() {
        let polygon = Polygon::new(vec![
            pt(0.0, 0.0),
            pt(0.001, 0.0),
            pt(1.0, 0.0),
            pt(1.0, 1.0),
            pt(1.0, 1.005),
            pt(0.0, 1.0),
            pt(0.0, 0.0),
        ]);
        let simplified = simplify(&polygon, 0.01);
        assert_eq!(
            simplified.ring,
            vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0), pt(0.0, 0.0)]
        );
    }

    #[test]
    fn simplify_keeps_shape_that_would_collapse() {
        let tiny = Polygon::new(vec![
            pt(0.0, 0.0),
            pt(0.001, 0.0),
            pt(0.001, 0.001),
            pt(0.0, 0.0),
        ]);
        assert_eq!(simplify(&tiny, 0.01), tiny);
    }
}
