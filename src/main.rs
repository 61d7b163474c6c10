mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::ServerConfig,
    database::{MongoDB, MongoUsuarioStore},
    services::UsuarioService,
};

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .expose_headers(vec![
            actix_web::http::header::HeaderName::from_static("grpc-status"),
            actix_web::http::header::HeaderName::from_static("grpc-message"),
            actix_web::http::header::HeaderName::from_static(middleware::request_id::REQUEST_ID_HEADER),
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Usuarios Service...");
    log::info!("📊 Database: {}.{}", config.database, config.collection);

    // Initialize MongoDB connection (uma vez só, injetada no serviço)
    let db = MongoDB::new(&config.mongo_uri, &config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()))?;

    log::info!("✅ MongoDB connected successfully");

    let store = Arc::new(MongoUsuarioStore::new(&db, &config.collection));
    let service_data = web::Data::new(UsuarioService::new(store));

    log::info!(
        "🌐 Server starting on {} with {} workers (max {} connections each)",
        config.bind_address(),
        config.workers,
        config.max_connections
    );
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());

    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(service_data.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(middleware::RequestId)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // RPC: /usuarios.UsuarioService/<Operation>
            .configure(api::usuarios::configure)
    })
    .workers(config.workers)
    .max_connections(config.max_connections)
    .bind(config.bind_address())?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing MongoDB connection");
    db.shutdown().await;

    Ok(())
}
