#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types and query parameter definitions.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the `SQLite` database. They are distinct from the API response types in
//! `sample_map_server_models`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for querying samples from the database.
///
/// One `SampleQuery` is built per submitted feature. The polygon ring is the
/// feature's outer ring only; the optional filters come from the feature's
/// properties, decoded once at the request boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleQuery {
    /// Polygon ring as `[longitude, latitude]` pairs. The first and last
    /// points conceptually coincide; closure is not validated here.
    pub ring: Vec<[f64; 2]>,
    /// Exact-match sample type filter.
    pub sample_type: Option<String>,
    /// Inclusive lower reference-date bound.
    pub refdate_from: Option<NaiveDate>,
    /// Exclusive upper reference-date bound.
    pub refdate_to: Option<NaiveDate>,
}

/// A sample measurement row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// Primary key.
    pub id: i64,
    /// Measured activity.
    pub activity: f64,
    /// Measurement error margin.
    pub uncertainty: f64,
    /// Confidence level of the measurement.
    pub sigma: i32,
    /// Reference date of the measurement (day precision).
    pub refdate: NaiveDate,
    /// Sample type label (open vocabulary).
    pub sample_type: String,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

/// A sample measurement to be inserted, before the store assigns an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSample {
    /// Measured activity.
    pub activity: f64,
    /// Measurement error margin.
    pub uncertainty: f64,
    /// Confidence level of the measurement.
    pub sigma: i32,
    /// Reference date of the measurement (day precision).
    pub refdate: NaiveDate,
    /// Sample type label (open vocabulary).
    pub sample_type: String,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

/// A user row as retrieved from the database.
///
/// Used only by the credential check; the query path never touches users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    /// Primary key.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
}
