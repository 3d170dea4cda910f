#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the sample map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the database row types to allow independent evolution of the API
//! contract.
//!
//! `ApiSample` keeps the `PascalCase` field names (`Id`, `Activity`,
//! `RefDate`, `Location.Coordinates`) that the existing map frontend
//! expects; newer endpoints use `camelCase`.

use sample_map_database_models::SampleRow;
use serde::{Deserialize, Serialize};

/// A sample measurement as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiSample {
    /// Unique sample ID.
    pub id: i64,
    /// Measured activity.
    pub activity: f64,
    /// Measurement error margin.
    pub uncertainty: f64,
    /// Confidence level.
    pub sigma: i32,
    /// Reference date as an RFC 3339 timestamp at midnight UTC.
    pub ref_date: String,
    /// Sample type label.
    pub sample_type: String,
    /// Sample location.
    pub location: ApiLocation,
}

/// A sample's location on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiLocation {
    /// `[longitude, latitude]` in WGS84.
    pub coordinates: [f64; 2],
}

impl From<SampleRow> for ApiSample {
    fn from(row: SampleRow) -> Self {
        Self {
            id: row.id,
            activity: row.activity,
            uncertainty: row.uncertainty,
            sigma: row.sigma,
            ref_date: format!("{}T00:00:00Z", row.refdate.format("%Y-%m-%d")),
            sample_type: row.sample_type,
            location: ApiLocation {
                coordinates: [row.longitude, row.latitude],
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn sample_uses_frontend_wire_names() {
        let row = SampleRow {
            id: 7,
            activity: 1.25,
            uncertainty: 0.5,
            sigma: 2,
            refdate: NaiveDate::from_ymd_opt(2016, 3, 15).unwrap(),
            sample_type: "soil".to_string(),
            longitude: 10.5,
            latitude: 59.9,
        };

        let value = serde_json::to_value(ApiSample::from(row)).unwrap();
        assert_eq!(value["Id"], 7);
        assert_eq!(value["SampleType"], "soil");
        assert_eq!(value["RefDate"], "2016-03-15T00:00:00Z");
        assert_eq!(value["Location"]["Coordinates"][0], 10.5);
        assert_eq!(value["Location"]["Coordinates"][1], 59.9);
    }
}
