//! HTTP handler functions for the sample map API.

use actix_web::{HttpRequest, HttpResponse, web};
use geojson::FeatureCollection;
use sample_map_database::queries;
use sample_map_query::collect_samples;
use sample_map_server_models::{ApiHealth, ApiSample};

use crate::{AppState, auth};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api_get_sample_types`
///
/// Returns the distinct sample-type values across the whole store as a
/// flat JSON array of strings, unordered.
pub async fn sample_types(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if !auth::is_authorized(state.db.as_ref(), &req).await {
        return unauthorized();
    }

    match queries::distinct_sample_types(state.db.as_ref()).await {
        Ok(types) => HttpResponse::Ok().json(types),
        Err(e) => {
            log::error!("Failed to query sample types: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query sample types"
            }))
        }
    }
}

/// `POST /api_get_samples`
///
/// Request body: a GeoJSON `FeatureCollection` of polygons with optional
/// `sample_type` / `refdate_from` / `refdate_to` filter properties.
/// Response: a flat JSON array of samples, one entry per feature match,
/// concatenated in feature order. Any failure aborts the whole request.
pub async fn samples(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<FeatureCollection>,
) -> HttpResponse {
    if !auth::is_authorized(state.db.as_ref(), &req).await {
        return unauthorized();
    }

    match collect_samples(state.db.as_ref(), &body).await {
        Ok(rows) => {
            let api_samples: Vec<ApiSample> = rows.into_iter().map(ApiSample::from).collect();
            HttpResponse::Ok().json(api_samples)
        }
        Err(e) => {
            log::error!("Failed to query samples: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to query samples: {e}")
            }))
        }
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "Unauthorized"
    }))
}
