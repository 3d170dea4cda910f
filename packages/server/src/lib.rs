#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the sample map application.
//!
//! Serves the REST API for querying the sample store by polygon, sample
//! type, and date range, plus the static map frontend from `public/`.
//! The query-translation core lives in `sample_map_query`; this crate is
//! routing, credential checks, and error-to-response mapping.

mod auth;
mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use sample_map_database::{db, run_migrations};
use std::sync::Arc;
use switchy_database::Database;

/// Shared application state.
///
/// The database handle is the only shared resource; it is injected into
/// every handler via `web::Data` so tests can substitute their own store.
pub struct AppState {
    /// Database connection.
    pub db: Arc<dyn Database>,
}

/// Starts the sample map API server.
///
/// Opens the `SQLite` database, runs migrations, and starts the Actix-Web
/// HTTP server. This is a regular async function — the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database cannot be opened or migrations fail.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Opening sample database...");
    let db_conn = db::connect_from_env().expect("Failed to open database");

    log::info!("Running migrations...");
    run_migrations(db_conn.as_ref())
        .await
        .expect("Failed to run migrations");

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route(
                "/api_get_sample_types",
                web::get().to(handlers::sample_types),
            )
            .route("/api_get_samples", web::post().to(handlers::samples))
            .route("/api/health", web::get().to(handlers::health));

        // Serve the map frontend when its assets are present.
        if std::path::Path::new("public").is_dir() {
            app.service(Files::new("/", "public").index_file("index.html"))
        } else {
            app
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
