//! Database query functions for sample data.
//!
//! Queries are built dynamically with `query_raw_params()`. The spatial
//! predicate runs in two stages: the SQL `WHERE` clause narrows rows to the
//! ring's bounding box, then the exact point-in-ring test runs in Rust over
//! the sorted candidates. The filter is order-preserving, so the
//! `ORDER BY sample_type, activity DESC` contract survives it.

use std::fmt::Write as _;

use chrono::NaiveDate;
use moosicbox_json_utils::database::ToValue as _;
use sample_map_database_models::{NewSample, SampleQuery, SampleRow, UserRow};
use sample_map_spatial::RingLocator;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Inserts a batch of samples.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn insert_samples(db: &dyn Database, samples: &[NewSample]) -> Result<u64, DbError> {
    let mut inserted = 0u64;

    for sample in samples {
        let result = db
            .exec_raw_params(
                "INSERT INTO samples (
                    activity, uncertainty, sigma, refdate, sample_type,
                    longitude, latitude
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    DatabaseValue::Real64(sample.activity),
                    DatabaseValue::Real64(sample.uncertainty),
                    DatabaseValue::Int32(sample.sigma),
                    DatabaseValue::String(format_refdate(sample.refdate)),
                    DatabaseValue::String(sample.sample_type.clone()),
                    DatabaseValue::Real64(sample.longitude),
                    DatabaseValue::Real64(sample.latitude),
                ],
            )
            .await?;

        inserted += result;
    }

    Ok(inserted)
}

/// Executes one structured query against the sample store.
///
/// Results are sorted by `sample_type` ascending, then `activity`
/// descending; ties keep the store's native order. Only points inside the
/// query ring are returned. A degenerate ring matches nothing.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails or a row cannot be
/// decoded.
pub async fn query_samples(
    db: &dyn Database,
    query: &SampleQuery,
) -> Result<Vec<SampleRow>, DbError> {
    let locator = RingLocator::new(&query.ring);
    let Some(envelope) = locator.bounding_rect() else {
        return Ok(Vec::new());
    };

    let mut sql = String::from(
        "SELECT id, activity, uncertainty, sigma, refdate, sample_type,
                longitude, latitude
         FROM samples
         WHERE longitude >= $1 AND longitude <= $2
           AND latitude >= $3 AND latitude <= $4",
    );

    let mut params: Vec<DatabaseValue> = vec![
        DatabaseValue::Real64(envelope.min().x),
        DatabaseValue::Real64(envelope.max().x),
        DatabaseValue::Real64(envelope.min().y),
        DatabaseValue::Real64(envelope.max().y),
    ];
    let mut param_idx = 5u32;

    if let Some(sample_type) = &query.sample_type {
        write!(sql, " AND sample_type = ${param_idx}").unwrap();
        params.push(DatabaseValue::String(sample_type.clone()));
        param_idx += 1;
    }

    if let Some(from) = query.refdate_from {
        write!(sql, " AND refdate >= ${param_idx}").unwrap();
        params.push(DatabaseValue::String(format_refdate(from)));
        param_idx += 1;
    }

    if let Some(to) = query.refdate_to {
        write!(sql, " AND refdate < ${param_idx}").unwrap();
        params.push(DatabaseValue::String(format_refdate(to)));
    }

    sql.push_str(" ORDER BY sample_type, activity DESC");

    let rows = db.query_raw_params(&sql, &params).await?;

    let mut samples = Vec::with_capacity(rows.len());

    for row in &rows {
        let refdate_str: String = row.to_value("refdate").unwrap_or_default();
        let refdate = parse_refdate(&refdate_str)?;

        let sample = SampleRow {
            id: row.to_value("id").unwrap_or(0),
            activity: row.to_value("activity").unwrap_or(0.0),
            uncertainty: row.to_value("uncertainty").unwrap_or(0.0),
            sigma: row.to_value("sigma").unwrap_or(0),
            refdate,
            sample_type: row.to_value("sample_type").unwrap_or_default(),
            longitude: row.to_value("longitude").unwrap_or(0.0),
            latitude: row.to_value("latitude").unwrap_or(0.0),
        };

        if locator.contains(sample.longitude, sample.latitude) {
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// Returns the distinct sample-type values present across the whole store.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn distinct_sample_types(db: &dyn Database) -> Result<Vec<String>, DbError> {
    let rows = db
        .query_raw_params("SELECT DISTINCT sample_type FROM samples", &[])
        .await?;

    let mut types = Vec::with_capacity(rows.len());
    for row in &rows {
        let sample_type: String = row.to_value("sample_type").unwrap_or_default();
        types.push(sample_type);
    }

    Ok(types)
}

/// Looks up a user by exact username and password.
///
/// This is the opaque credential check: the stored password is compared
/// verbatim, nothing else is inspected.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_user(
    db: &dyn Database,
    username: &str,
    password: &str,
) -> Result<Option<UserRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, username, email FROM users
             WHERE username = $1 AND password = $2",
            &[
                DatabaseValue::String(username.to_string()),
                DatabaseValue::String(password.to_string()),
            ],
        )
        .await?;

    let Some(row) = rows.first() else {
        return Ok(None);
    };

    Ok(Some(UserRow {
        id: row.to_value("id").unwrap_or(0),
        username: row.to_value("username").unwrap_or_default(),
        email: row.to_value("email").unwrap_or_default(),
    }))
}

/// Inserts a user row, for provisioning and tests.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn insert_user(
    db: &dyn Database,
    username: &str,
    password: &str,
    email: &str,
) -> Result<(), DbError> {
    db.exec_raw_params(
        "INSERT INTO users (username, password, email) VALUES ($1, $2, $3)",
        &[
            DatabaseValue::String(username.to_string()),
            DatabaseValue::String(password.to_string()),
            DatabaseValue::String(email.to_string()),
        ],
    )
    .await?;

    Ok(())
}

/// Formats a reference date for storage (ISO `YYYY-MM-DD`, which compares
/// correctly as text).
fn format_refdate(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_refdate(s: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse stored refdate '{s}': {e}"),
    })
}
