#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! GeoJSON query translation and result aggregation.
//!
//! A request body is a GeoJSON `FeatureCollection` where each feature
//! carries one polygon and optional filter properties (`sample_type`,
//! `refdate_from`, `refdate_to`). Each feature becomes one
//! [`SampleQuery`](sample_map_database_models::SampleQuery), executed
//! against the store in feature order; per-feature results are concatenated
//! into one flat output with no cross-feature sort and no de-duplication.
//!
//! Any failure — a malformed date, a feature without usable geometry, a
//! store error — aborts the whole request. Partial results are never
//! returned.

pub mod collect;
pub mod filter;

pub use collect::collect_samples;
pub use filter::{SampleFilter, build_query};

use sample_map_database::DbError;

/// Errors that can occur while translating or executing a query request.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A filter property held a date that is not `DD.MM.YYYY`.
    #[error("Invalid date '{value}': expected DD.MM.YYYY")]
    BadDate {
        /// The offending property value.
        value: String,
    },

    /// The feature has no geometry at all.
    #[error("Feature has no geometry")]
    MissingGeometry,

    /// The feature's polygon has zero rings.
    #[error("Feature geometry has no rings")]
    EmptyGeometry,

    /// The feature's geometry is not a polygon.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    /// A ring position with fewer than two coordinates.
    #[error("Malformed coordinate pair in polygon ring")]
    BadCoordinate,

    /// Store failure while executing a feature's query.
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}
