//! Feature decoding: filter properties and outer-ring extraction.
//!
//! Properties arrive as an untyped JSON map. They are decoded exactly once,
//! here, into a typed [`SampleFilter`] so the rest of the pipeline never
//! re-checks string emptiness or date formats.

use chrono::NaiveDate;
use geojson::{Feature, JsonObject, Value};
use sample_map_database_models::SampleQuery;

use crate::QueryError;

/// Date format used by the filter properties, e.g. `15.03.2016`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Typed filter properties decoded from one feature.
///
/// A missing key, a non-string value, and an empty string all mean "no
/// filter" for that key. Date values must parse or the whole request fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFilter {
    /// Exact-match sample type.
    pub sample_type: Option<String>,
    /// Inclusive lower reference-date bound.
    pub refdate_from: Option<NaiveDate>,
    /// Exclusive upper reference-date bound.
    pub refdate_to: Option<NaiveDate>,
}

impl SampleFilter {
    /// Decodes the filter from a feature's `properties` map.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::BadDate`] if a present, non-empty date
    /// property is not in `DD.MM.YYYY` format.
    pub fn from_properties(properties: Option<&JsonObject>) -> Result<Self, QueryError> {
        let sample_type = prop_str(properties, "sample_type").map(ToString::to_string);
        let refdate_from = prop_str(properties, "refdate_from")
            .map(parse_refdate)
            .transpose()?;
        let refdate_to = prop_str(properties, "refdate_to")
            .map(parse_refdate)
            .transpose()?;

        Ok(Self {
            sample_type,
            refdate_from,
            refdate_to,
        })
    }
}

/// Translates one feature into a structured sample query.
///
/// Only the polygon's first ring is used; inner rings (holes) are silently
/// ignored.
///
/// # Errors
///
/// Returns [`QueryError`] if the feature has no usable polygon geometry or
/// a date property fails to parse.
pub fn build_query(feature: &Feature) -> Result<SampleQuery, QueryError> {
    let ring = outer_ring(feature)?;
    let filter = SampleFilter::from_properties(feature.properties.as_ref())?;

    Ok(SampleQuery {
        ring,
        sample_type: filter.sample_type,
        refdate_from: filter.refdate_from,
        refdate_to: filter.refdate_to,
    })
}

/// Parses a `DD.MM.YYYY` date property value.
///
/// # Errors
///
/// Returns [`QueryError::BadDate`] if the value does not match the format.
pub fn parse_refdate(value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| QueryError::BadDate {
        value: value.to_string(),
    })
}

/// Returns a present, non-empty string property.
fn prop_str<'a>(properties: Option<&'a JsonObject>, key: &str) -> Option<&'a str> {
    let value = properties?.get(key)?.as_str()?;
    (!value.is_empty()).then_some(value)
}

fn outer_ring(feature: &Feature) -> Result<Vec<[f64; 2]>, QueryError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(QueryError::MissingGeometry)?;

    let rings = match &geometry.value {
        Value::Polygon(rings) => rings,
        other => {
            return Err(QueryError::UnsupportedGeometry(
                other.type_name().to_string(),
            ));
        }
    };

    let ring = rings.first().ok_or(QueryError::EmptyGeometry)?;

    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok([*x, *y]),
            _ => Err(QueryError::BadCoordinate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    fn polygon_feature(properties: serde_json::Value) -> Feature {
        feature(json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]
            }
        }))
    }

    #[test]
    fn parses_dotted_date() {
        let date = parse_refdate("15.03.2016").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 3, 15).unwrap());
    }

    #[test]
    fn rejects_iso_date() {
        assert!(matches!(
            parse_refdate("2016-03-15"),
            Err(QueryError::BadDate { .. })
        ));
    }

    #[test]
    fn rejects_garbage_date() {
        assert!(parse_refdate("soon").is_err());
        assert!(parse_refdate("32.01.2016").is_err());
    }

    #[test]
    fn empty_properties_mean_no_filters() {
        let f = polygon_feature(json!({}));
        let query = build_query(&f).unwrap();
        assert_eq!(query.sample_type, None);
        assert_eq!(query.refdate_from, None);
        assert_eq!(query.refdate_to, None);
        assert_eq!(query.ring.len(), 5);
    }

    #[test]
    fn empty_string_properties_mean_no_filters() {
        let f = polygon_feature(json!({
            "sample_type": "",
            "refdate_from": "",
            "refdate_to": "",
        }));
        let query = build_query(&f).unwrap();
        assert_eq!(query.sample_type, None);
        assert_eq!(query.refdate_from, None);
        assert_eq!(query.refdate_to, None);
    }

    #[test]
    fn decodes_all_filters() {
        let f = polygon_feature(json!({
            "sample_type": "soil",
            "refdate_from": "01.01.2016",
            "refdate_to": "01.02.2016",
        }));
        let query = build_query(&f).unwrap();
        assert_eq!(query.sample_type.as_deref(), Some("soil"));
        assert_eq!(
            query.refdate_from,
            Some(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap())
        );
        assert_eq!(
            query.refdate_to,
            Some(NaiveDate::from_ymd_opt(2016, 2, 1).unwrap())
        );
    }

    #[test]
    fn bad_date_property_is_an_error() {
        let f = polygon_feature(json!({ "refdate_from": "2016-01-01" }));
        assert!(matches!(
            build_query(&f),
            Err(QueryError::BadDate { .. })
        ));
    }

    #[test]
    fn uses_only_the_outer_ring() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                    [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
                ]
            }
        }));
        let query = build_query(&f).unwrap();
        // The hole ring is dropped; only the outer ring survives.
        assert_eq!(query.ring.len(), 5);
        assert_eq!(query.ring[2], [10.0, 10.0]);
    }

    #[test]
    fn feature_without_geometry_is_an_error() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {},
            "geometry": null
        }));
        assert!(matches!(
            build_query(&f),
            Err(QueryError::MissingGeometry)
        ));
    }

    #[test]
    fn polygon_without_rings_is_an_error() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Polygon", "coordinates": [] }
        }));
        assert!(matches!(build_query(&f), Err(QueryError::EmptyGeometry)));
    }

    #[test]
    fn non_polygon_geometry_is_an_error() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }));
        assert!(matches!(
            build_query(&f),
            Err(QueryError::UnsupportedGeometry(_))
        ));
    }
}
