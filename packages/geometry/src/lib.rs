#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometric predicates and alert geometry resolution.
//!
//! Everything here is planar math over WGS84 degrees, good enough for map
//! display and coarse spatial filtering but not for surveying. Malformed
//! input never panics: predicates answer `false` and shape builders answer
//! `None`.
//!
//! [`resolve::resolve_alert_geometry`] reconstructs a displayable shape
//! for alerts that arrive without one, falling back from inline geometry to
//! exact zone matches to a buffer around a loosely matched zone.

pub mod measure;
pub mod predicates;
pub mod resolve;

pub use measure::{area, buffer_point, centroid, simplify};
pub use predicates::{
    bounding_box, bounding_boxes_intersect, is_valid_geometry, point_in_multi_polygon,
    point_in_polygon, polygons_intersect,
};
pub use resolve::{
    FallbackOptions, ResolvedGeometry, resolve_alert_geometry, resolve_alert_geometry_with,
};

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.0;
