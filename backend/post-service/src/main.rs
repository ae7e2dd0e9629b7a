use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use post_service::config::{LogFormat, StorageBackend};
use post_service::db::{InMemoryPostRepository, PgPostRepository, PostRepository};
use post_service::handlers;
use post_service::openapi::{self, ApiDoc};
use post_service::services::PostService;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_repository(
    config: &post_service::Config,
) -> anyhow::Result<Arc<dyn PostRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory post store; data is lost on restart");
            Ok(Arc::new(InMemoryPostRepository::new()))
        }
        StorageBackend::Postgres => {
            let repo = PgPostRepository::connect(
                &config.storage.database_url,
                config.storage.max_connections,
            )
            .await
            .context("Failed to connect to PostgreSQL")?;
            repo.migrate()
                .await
                .context("Failed to apply post-service migrations")?;
            tracing::info!(
                max_connections = config.storage.max_connections,
                "Connected to PostgreSQL post store"
            );
            Ok(Arc::new(repo))
        }
    }
}

/// Post Service
///
/// Serves CRUD and listing endpoints for posts made of typed content nodes.
///
/// # Routes
///
/// - `/posts`, `/posts/{id}` - create, read, list, replace and delete posts
/// - `/health`, `/health/live`, `/health/ready` - probes
/// - `/metrics` - Prometheus metrics
/// - `/openapi.json` - API description
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match post_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log.format);

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let repository = build_repository(&config).await?;
    let service_data = web::Data::new(PostService::new(repository));

    let bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(service_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(post_service::metrics::serve_metrics),
            )
            .route(
                ApiDoc::openapi_json_path(),
                web::get().to(openapi::openapi_json),
            )
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(config.app.workers)
    .run();

    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::select! {
        result = server_task => {
            result.context("HTTP server task panicked")??;
        }
        signal = shutdown_signal() => {
            if let Err(e) = signal {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    tracing::info!("Post-service shutting down");
    Ok(())
}
