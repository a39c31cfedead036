/// Feature Service Library
///
/// Scaffold for a CRUD HTTP service: one feature endpoint that persists an
/// entity and echoes its projection, behind HTTP Basic authentication, a CORS
/// policy and OpenAPI documentation. The `product`, `feature` and
/// `subfeature` route segments are placeholders chosen at configuration time.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: persisted entity and response shape
/// - `services`: business logic layer
/// - `db`: repository contract and implementations
/// - `middleware`: authentication and CORS
/// - `openapi`: API documentation
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use db::FeatureRepository;
use handlers::HealthState;
use openapi::ApiDoc;
use services::FeatureService;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use utoipa_swagger_ui::SwaggerUi;

/// Everything the HTTP layer needs, built once at startup and cloned into
/// each worker.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub repository: Arc<dyn FeatureRepository>,
    openapi: utoipa::openapi::OpenApi,
    basic_auth: Arc<actix_middleware::BasicAuthConfig>,
}

impl AppContext {
    pub fn new(config: Config, repository: Arc<dyn FeatureRepository>) -> Self {
        let openapi = ApiDoc::build(&config);
        let basic_auth = Arc::new(config.auth.basic_auth());
        Self {
            config: Arc::new(config),
            repository,
            openapi,
            basic_auth,
        }
    }
}

/// Register routes and shared state
pub fn configure_routes(cfg: &mut web::ServiceConfig, ctx: &AppContext) {
    let routes = &ctx.config.routes;

    cfg.app_data(web::Data::new(FeatureService::new(ctx.repository.clone())))
        .app_data(web::Data::new(HealthState::new(
            ctx.repository.clone(),
            ctx.config.clone(),
        )))
        .service(
            SwaggerUi::new(ApiDoc::swagger_ui_path())
                .url(ApiDoc::openapi_json_path(), ctx.openapi.clone()),
        )
        .route("/", web::get().to(handlers::root))
        .service(
            web::scope("/actuator")
                .route("/health", web::get().to(handlers::health))
                .route("/health/liveness", web::get().to(handlers::liveness))
                .route("/health/readiness", web::get().to(handlers::health))
                .route("/info", web::get().to(handlers::info)),
        )
        .service(
            web::scope(&routes.versioned_scope())
                .route(&routes.feature_path(), web::post().to(handlers::handle_feature)),
        )
        .service(
            web::scope(&routes.product_scope())
                .route(&routes.feature_path(), web::post().to(handlers::handle_feature)),
        );
}

/// Build the application
///
/// Layers from the outside in: request tracing, CORS, Basic authentication.
pub fn build_app(
    ctx: AppContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = middleware::build_cors(&ctx.config.cors);
    let auth = middleware::BasicAuthMiddleware::from_shared(ctx.basic_auth.clone());

    App::new()
        .configure(|cfg| configure_routes(cfg, &ctx))
        .wrap(auth)
        .wrap(cors)
        .wrap(TracingLogger::default())
}
