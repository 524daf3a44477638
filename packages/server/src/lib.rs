#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the shark incident dashboard.
//!
//! Loads the incident table and state boundaries once at startup, then
//! serves the reactive core over a JSON API: dropdown configuration,
//! region synchronization, figure specifications, and the two selection
//! tables. The frontend is served as static files.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use shark_map_dataset::IncidentTable;
use shark_map_geography::GeographyIndex;

/// Shared application state: the immutable dataset and boundary index.
///
/// Both are created once at startup and shared read-only across all
/// handler invocations; all mutable filter state lives client-side and
/// arrives with each request.
pub struct AppState {
    /// The incident table.
    pub table: Arc<IncidentTable>,
    /// The state boundary index.
    pub geography: Arc<GeographyIndex>,
}

/// Default path of the incident CSV export.
pub const DEFAULT_DATA_PATH: &str = "data/australian_shark_incidents.csv";

/// Default path of the state boundary `GeoJSON` file.
pub const DEFAULT_BOUNDARIES_PATH: &str = "data/australian-states.json";

/// Starts the dashboard API server.
///
/// Loads the incident dataset and boundary file (paths overridable via
/// the `DATA_PATH` and `BOUNDARIES_PATH` environment variables) and
/// starts the Actix-Web HTTP server on `BIND_ADDR`:`PORT`. This is a
/// regular async function; the caller provides the async runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the dataset or boundary file cannot be loaded. Startup
/// data-load failures are fatal, the process must not start without its
/// data.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path =
        std::env::var("DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
    let boundaries_path =
        std::env::var("BOUNDARIES_PATH").unwrap_or_else(|_| DEFAULT_BOUNDARIES_PATH.to_string());

    log::info!("Loading incident dataset from {data_path}...");
    let table = shark_map_dataset::load_incidents(Path::new(&data_path))
        .expect("Failed to load incident dataset");

    log::info!("Loading state boundaries from {boundaries_path}...");
    let geography = shark_map_geography::load_boundaries(Path::new(&boundaries_path))
        .expect("Failed to load state boundaries");

    let state = web::Data::new(AppState {
        table: Arc::new(table),
        geography: Arc::new(geography),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/controls", web::get().to(handlers::controls))
                    .route("/regions", web::get().to(handlers::regions))
                    .route("/select-all", web::get().to(handlers::select_all))
                    .route("/map", web::get().to(handlers::geo_map))
                    .route(
                        "/parallel-coordinates",
                        web::get().to(handlers::parallel_coordinates),
                    )
                    .route("/distribution", web::get().to(handlers::distribution))
                    .route(
                        "/selection/summary",
                        web::post().to(handlers::selection_summary),
                    )
                    .route(
                        "/selection/details",
                        web::post().to(handlers::selection_details),
                    ),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
