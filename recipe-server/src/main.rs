mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, NormalizePath};
use actix_web::{App, HttpServer};
use data::ingredient_repository::PostgresIngredientRepository;
use data::recipe_repository::PostgresRecipeRepository;
use data::tag_repository::PostgresTagRepository;
use data::token_repository::PostgresTokenRepository;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use presentation::middleware::RequestTrace;
use presentation::routes::{AppState, Repositories, configure};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(config.log_format);

    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        tokens: Arc::new(PostgresTokenRepository::new(pool.clone())),
        recipes: Arc::new(PostgresRecipeRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        ingredients: Arc::new(PostgresIngredientRepository::new(pool)),
    });

    info!(host = %config.host, port = config.port, "HTTP server starting");

    let cors_origins = config.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(RequestTrace)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(build_cors(&cors_origins))
            .configure(|cfg| configure(cfg, &state))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
