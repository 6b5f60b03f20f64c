#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index over normalized alerts.
//!
//! Bulk-loads the bounding boxes of every mappable alert into an R-tree,
//! then answers "which alerts cover this point" and "which alerts touch
//! this area" with the polygon predicates from [`alert_map_geometry`].
//! Alerts without geometry are kept for list views but never returned by
//! a spatial query.

use std::cmp::Ordering;

use alert_map_alert_models::CanonicalAlert;
use alert_map_geometry::{
    bounding_box, point_in_multi_polygon, point_in_polygon, polygons_intersect,
};
use alert_map_geometry_models::{BoundingBox, Geometry, Point, Polygon};
use alert_map_severity::compare_severity;
use rstar::{AABB, RTree, RTreeObject};

/// An alert's envelope stored in the R-tree, pointing back into
/// [`AlertIndex::alerts`].
struct AlertEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for AlertEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Normalized alerts with an R-tree over their shapes.
pub struct AlertIndex {
    alerts: Vec<CanonicalAlert>,
    tree: RTree<AlertEntry>,
    unindexed: usize,
}

impl AlertIndex {
    /// Builds the index. Input order is kept and breaks severity ties in
    /// query results.
    #[must_use]
    pub fn new(alerts: Vec<CanonicalAlert>) -> Self {
        let entries: Vec<AlertEntry> = alerts
            .iter()
            .enumerate()
            .filter_map(|(position, alert)| {
                let envelope = alert.geometry.as_ref().and_then(geometry_envelope)?;
                Some(AlertEntry { position, envelope })
            })
            .collect();

        let unindexed = alerts.len() - entries.len();
        let tree = RTree::bulk_load(entries);
        log::info!(
            "Indexed {} alerts ({unindexed} without geometry)",
            tree.size()
        );

        Self {
            alerts,
            tree,
            unindexed,
        }
    }

    /// Every alert, in input order, including list-only ones.
    #[must_use]
    pub fn alerts(&self) -> &[CanonicalAlert] {
        &self.alerts
    }

    /// Number of alerts held, mappable or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether the index holds no alerts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Number of alerts that had no geometry and so were not indexed.
    #[must_use]
    pub const fn unindexed_len(&self) -> usize {
        self.unindexed
    }

    /// Alerts that cannot be placed on a map.
    pub fn list_only(&self) -> impl Iterator<Item = &CanonicalAlert> {
        self.alerts.iter().filter(|alert| !alert.is_mappable())
    }

    /// Alerts whose area contains the location, most severe first.
    ///
    /// Point alerts have no area and never match.
    #[must_use]
    pub fn alerts_at(&self, lng: f64, lat: f64) -> Vec<&CanonicalAlert> {
        if !lng.is_finite() || !lat.is_finite() {
            return vec![];
        }
        let point = Point { lng, lat };
        let query = AABB::from_point([lng, lat]);

        self.matching(&query, |geometry| match geometry {
            Geometry::Point(_) => false,
            Geometry::Polygon(polygon) => point_in_polygon(&point, polygon),
            Geometry::MultiPolygon(multi) => point_in_multi_polygon(&point, multi),
        })
    }

    /// Alerts whose shape overlaps `area`, most severe first.
    ///
    /// Overlap follows [`polygons_intersect`], so shapes that cross without
    /// sharing a contained vertex are missed.
    #[must_use]
    pub fn alerts_intersecting(&self, area: &Polygon) -> Vec<&CanonicalAlert> {
        let Some(bbox) = bounding_box(&area.ring) else {
            return vec![];
        };

        self.matching(&bbox_envelope(&bbox), |geometry| match geometry {
            Geometry::Point(point) => point_in_polygon(point, area),
            Geometry::Polygon(polygon) => polygons_intersect(polygon, area),
            Geometry::MultiPolygon(multi) => multi
                .polygons
                .iter()
                .any(|polygon| polygons_intersect(polygon, area)),
        })
    }

    fn matching(
        &self,
        query: &AABB<[f64; 2]>,
        predicate: impl Fn(&Geometry) -> bool,
    ) -> Vec<&CanonicalAlert> {
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(query)
            .map(|entry| entry.position)
            .filter(|&position| {
                self.alerts[position]
                    .geometry
                    .as_ref()
                    .is_some_and(&predicate)
            })
            .collect();
        positions.sort_unstable();

        let mut matches: Vec<&CanonicalAlert> =
            positions.into_iter().map(|p| &self.alerts[p]).collect();
        matches.sort_by(|a, b| by_severity(a, b));
        matches
    }
}

fn by_severity(a: &CanonicalAlert, b: &CanonicalAlert) -> Ordering {
    compare_severity(Some(a.unified_severity), Some(b.unified_severity))
}

fn bbox_envelope(bbox: &BoundingBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

fn geometry_envelope(geometry: &Geometry) -> Option<AABB<[f64; 2]>> {
    match geometry {
        Geometry::Point(point) => Some(AABB::from_point([point.lng, point.lat])),
        Geometry::Polygon(polygon) => bounding_box(&polygon.ring).map(|b| bbox_envelope(&b)),
        Geometry::MultiPolygon(multi) => multi
            .polygons
            .iter()
            .filter_map(|polygon| bounding_box(&polygon.ring))
            .reduce(|a, b| BoundingBox {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
            .map(|b| bbox_envelope(&b)),
    }
}
