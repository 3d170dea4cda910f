//! The result aggregator: per-feature fan-out, in-order fan-in.

use geojson::FeatureCollection;
use sample_map_database::queries;
use sample_map_database_models::SampleRow;
use switchy_database::Database;

use crate::QueryError;
use crate::filter::build_query;

/// Executes one query per feature and concatenates the results.
///
/// Features are processed sequentially, in the order they appear in the
/// collection. Each feature's matches arrive sorted by sample type then
/// descending activity; the concatenation is not re-sorted globally, and a
/// sample inside several features' polygons appears once per feature.
///
/// An empty collection yields an empty vector.
///
/// # Errors
///
/// Returns [`QueryError`] on the first feature that fails to translate or
/// execute; no partial results are returned.
pub async fn collect_samples(
    db: &dyn Database,
    collection: &FeatureCollection,
) -> Result<Vec<SampleRow>, QueryError> {
    let mut samples = Vec::new();

    for feature in &collection.features {
        let query = build_query(feature)?;
        let matches = queries::query_samples(db, &query).await?;
        samples.extend(matches);
    }

    Ok(samples)
}
