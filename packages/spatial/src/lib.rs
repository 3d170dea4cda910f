#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Point-in-polygon evaluation for client-submitted query rings.
//!
//! A query feature carries one polygon ring as raw `[longitude, latitude]`
//! pairs. This crate turns that ring into a [`geo::Polygon`] and provides
//! the containment test used to filter sample locations, plus the ring's
//! bounding rectangle used as a coarse SQL prefilter.

use geo::{BoundingRect, Contains, Coord, LineString, Point, Polygon, Rect};

/// A single query ring prepared for repeated containment tests.
///
/// Built once per structured query and checked against every candidate
/// sample location. The ring is used as-is: closure and winding order are
/// the caller's responsibility, and no hole rings exist at this level.
pub struct RingLocator {
    polygon: Polygon<f64>,
}

impl RingLocator {
    /// Builds a locator from a ring of `[longitude, latitude]` pairs.
    ///
    /// `geo` closes the exterior ring implicitly, so an unclosed ring
    /// behaves as if the first point were appended. A degenerate ring
    /// (fewer than 3 points) contains nothing.
    #[must_use]
    pub fn new(ring: &[[f64; 2]]) -> Self {
        let exterior = LineString::from(
            ring.iter()
                .map(|p| Coord { x: p[0], y: p[1] })
                .collect::<Vec<_>>(),
        );
        Self {
            polygon: Polygon::new(exterior, Vec::new()),
        }
    }

    /// Whether the point lies within the ring.
    #[must_use]
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        self.polygon.contains(&Point::new(lng, lat))
    }

    /// The ring's axis-aligned bounding rectangle, or `None` for an empty
    /// ring.
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }
}
