use actix_web::HttpServer;
use anyhow::Context;
use db_pool::env_utils::parse_env_with_default;
use db_pool::create_pool;
use feature_service::config::StoreBackend;
use feature_service::db::{
    FeatureRepository, InMemoryFeatureRepository, PgFeatureRepository, MIGRATOR,
};
use feature_service::{build_app, AppContext, Config};
use std::io;
use std::sync::Arc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    // LOG_FORMAT=json for log aggregation; plain text otherwise
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn FeatureRepository>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory feature store; data is lost on restart");
            Ok(Arc::new(InMemoryFeatureRepository::new()))
        }
        StoreBackend::Postgres => {
            config.database.log_config();
            let pool = create_pool(config.database.clone())
                .await
                .context("Failed to create database pool")?;

            MIGRATOR
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgFeatureRepository::new(pool)))
        }
    }
}

async fn run_healthcheck() -> io::Result<()> {
    let port: u16 = parse_env_with_default("FEATURE_SERVICE_PORT", 8080);
    let url = format!("http://127.0.0.1:{}/actuator/health", port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Feature Service
///
/// Scaffold HTTP service exposing one authenticated feature endpoint under
/// `/{product}/{feature}/{subfeature}` and `/api/v1/{product}/{feature}/{subfeature}`.
///
/// # Routes
///
/// - `POST /{product}/{feature}/{subfeature}` - store an entity, return its projection
/// - `GET /actuator/health` - store probe (public)
/// - `GET /swagger-ui/` and `/api-docs` - API documentation (public)
///
/// Run `feature-service healthcheck` for container probes.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Some(cmd) = std::env::args().nth(1) {
        if cmd == "healthcheck" || cmd == "healthcheck-http" {
            return run_healthcheck().await;
        }
    }

    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    tracing::info!(
        env = %config.app.env,
        store = ?config.store,
        "Starting {}",
        Config::service_name()
    );

    let repository = build_repository(&config).await.map_err(|e| {
        tracing::error!("Failed to initialize feature store: {:#}", e);
        io::Error::new(io::ErrorKind::Other, format!("{:#}", e))
    })?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let workers = config.app.workers;
    for path in config.routes.endpoint_paths() {
        tracing::info!("Feature endpoint: POST {}", path);
    }

    let ctx = AppContext::new(config, repository);

    tracing::info!("Starting HTTP server at {}", bind_address);
    let server = HttpServer::new(move || build_app(ctx.clone()))
        .bind(&bind_address)?
        .workers(workers)
        .disable_signals()
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let result = tokio::select! {
        joined = server_task => match joined {
            Ok(result) => result,
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        },
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            Ok(())
        }
    };

    tracing::info!("{} shutting down", Config::service_name());
    result
}
