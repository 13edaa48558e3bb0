use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use auth_core::jwt;
use db_pool::{create_pool, DbConfig};
use posts_service::{db, error, handlers, Config};
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "posts-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "posts-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting posts-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    jwt::initialize_hmac(&config.auth.jwt_secret).map_err(|err| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize JWT keys: {err}"),
        )
    })?;

    let mut db_cfg = DbConfig::from_env().unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_cfg.max_connections < config.database.max_connections {
        db_cfg.max_connections = config.database.max_connections;
    }

    db_cfg.log_config();
    let pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    db::MIGRATOR.run(&pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Database migration failed: {e}"),
        )
    })?;
    tracing::info!("Database migrations applied");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
