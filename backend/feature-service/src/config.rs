/// Configuration management for Feature Service
///
/// Everything is read once from the environment at startup into an immutable
/// [`Config`] that is shared by reference with the middleware and handlers.
use actix_middleware::{BasicAuthConfig, InMemoryUser};
use db_pool::env_utils::{env_string_or, parse_env_with_default};
use db_pool::DbConfig;
use std::fmt;
use thiserror::Error;

const SERVICE_NAME: &str = "feature-service";
const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/feature";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "password";

/// Configuration loading failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty and must not contain '/'")]
    InvalidRouteSegment(&'static str),

    #[error("unknown FEATURE_STORE '{0}' (expected 'postgres' or 'memory')")]
    UnknownStore(String),

    #[error("AUTH_PASSWORD must be set to a non-default value in production")]
    DefaultPasswordInProduction,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// HTTP Basic credential
    pub auth: AuthConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// Route placeholders
    pub routes: RouteConfig,
    /// Backing store selection
    pub store: StoreBackend,
    /// Database pool configuration (used by the postgres store)
    pub database: DbConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Actix worker count
    pub workers: usize,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// The single in-memory user
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}

impl AuthConfig {
    pub fn basic_auth(&self) -> BasicAuthConfig {
        BasicAuthConfig::new(InMemoryUser::new(
            self.username.clone(),
            self.password.clone(),
            self.roles.iter().cloned(),
        ))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            roles: vec!["USER".to_string(), "ADMIN".to_string()],
        }
    }
}

/// CORS policy applied to every path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin and echoes it back
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "PUT".to_string()],
            allow_credentials: true,
            max_age_secs: 3600,
        }
    }
}

/// Path segments substituted when the template is scaffolded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub product: String,
    pub feature: String,
    pub subfeature: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            product: "product".to_string(),
            feature: "feature".to_string(),
            subfeature: "subfeature".to_string(),
        }
    }
}

impl RouteConfig {
    /// `/{product}`
    pub fn product_scope(&self) -> String {
        format!("/{}", self.product)
    }

    /// `/api/v1/{product}`
    pub fn versioned_scope(&self) -> String {
        format!("/api/v1/{}", self.product)
    }

    /// `/{feature}/{subfeature}`, relative to either scope
    pub fn feature_path(&self) -> String {
        format!("/{}/{}", self.feature, self.subfeature)
    }

    /// Both absolute paths of the feature endpoint
    pub fn endpoint_paths(&self) -> [String; 2] {
        [
            format!("{}{}", self.product_scope(), self.feature_path()),
            format!("{}{}", self.versioned_scope(), self.feature_path()),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("ROUTE_PRODUCT", &self.product),
            ("ROUTE_FEATURE", &self.feature),
            ("ROUTE_SUBFEATURE", &self.subfeature),
        ] {
            if value.is_empty() || value.contains('/') {
                return Err(ConfigError::InvalidRouteSegment(name));
            }
        }
        Ok(())
    }
}

/// Which [`crate::db::FeatureRepository`] implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                env: "development".to_string(),
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: 4,
            },
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            routes: RouteConfig::default(),
            store: StoreBackend::Postgres,
            database: DbConfig {
                service_name: SERVICE_NAME.to_string(),
                database_url: DEFAULT_DATABASE_URL.to_string(),
                ..DbConfig::default()
            },
        }
    }
}

impl Config {
    pub fn service_name() -> &'static str {
        SERVICE_NAME
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let app = AppConfig {
            env: env_string_or("APP_ENV", &defaults.app.env),
            host: env_string_or("FEATURE_SERVICE_HOST", &defaults.app.host),
            port: parse_env_with_default("FEATURE_SERVICE_PORT", defaults.app.port),
            workers: parse_env_with_default("HTTP_WORKERS", defaults.app.workers).max(1),
        };

        let auth = AuthConfig {
            username: env_string_or("AUTH_USERNAME", DEFAULT_USERNAME),
            password: env_string_or("AUTH_PASSWORD", DEFAULT_PASSWORD),
            ..AuthConfig::default()
        };
        if app.is_production() && auth.password == DEFAULT_PASSWORD {
            return Err(ConfigError::DefaultPasswordInProduction);
        }

        let allowed_origins: Vec<String> = env_string_or("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if allowed_origins.is_empty() {
            return Err(ConfigError::Empty("CORS_ALLOWED_ORIGINS"));
        }
        let cors = CorsConfig {
            allowed_origins,
            max_age_secs: parse_env_with_default("CORS_MAX_AGE_SECS", defaults.cors.max_age_secs),
            ..CorsConfig::default()
        };

        let routes = RouteConfig {
            product: env_string_or("ROUTE_PRODUCT", &defaults.routes.product),
            feature: env_string_or("ROUTE_FEATURE", &defaults.routes.feature),
            subfeature: env_string_or("ROUTE_SUBFEATURE", &defaults.routes.subfeature),
        };
        routes.validate()?;

        let store = env_string_or("FEATURE_STORE", "postgres").parse()?;

        Ok(Config {
            app,
            auth,
            cors,
            routes,
            store,
            database: DbConfig::from_env(SERVICE_NAME, DEFAULT_DATABASE_URL),
        })
    }

    /// Base URL advertised in the OpenAPI document
    pub fn local_server_url(&self) -> String {
        format!("http://localhost:{}", self.app.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "APP_ENV",
        "FEATURE_SERVICE_HOST",
        "FEATURE_SERVICE_PORT",
        "HTTP_WORKERS",
        "AUTH_USERNAME",
        "AUTH_PASSWORD",
        "CORS_ALLOWED_ORIGINS",
        "CORS_MAX_AGE_SECS",
        "ROUTE_PRODUCT",
        "ROUTE_FEATURE",
        "ROUTE_SUBFEATURE",
        "FEATURE_STORE",
    ];

    fn clear_env() {
        for key in VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "password");
        assert_eq!(config.auth.roles, vec!["USER", "ADMIN"]);
        assert_eq!(config.cors, CorsConfig::default());
        assert_eq!(config.routes, RouteConfig::default());
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.database.service_name, "feature-service");
    }

    #[test]
    #[serial]
    fn test_route_overrides() {
        clear_env();
        std::env::set_var("ROUTE_PRODUCT", "billing");
        std::env::set_var("ROUTE_FEATURE", "invoices");
        std::env::set_var("ROUTE_SUBFEATURE", "drafts");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.routes.endpoint_paths(),
            [
                "/billing/invoices/drafts".to_string(),
                "/api/v1/billing/invoices/drafts".to_string()
            ]
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_route_segment_with_slash_rejected() {
        clear_env();
        std::env::set_var("ROUTE_FEATURE", "a/b");

        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::InvalidRouteSegment("ROUTE_FEATURE")
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_default_password_rejected_in_production() {
        clear_env();
        std::env::set_var("APP_ENV", "production");

        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::DefaultPasswordInProduction
        );

        std::env::set_var("AUTH_PASSWORD", "a-real-secret");
        assert!(Config::from_env().is_ok());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_store_selection() {
        clear_env();
        std::env::set_var("FEATURE_STORE", "memory");
        assert_eq!(Config::from_env().unwrap().store, StoreBackend::Memory);

        std::env::set_var("FEATURE_STORE", "cassandra");
        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::UnknownStore("cassandra".to_string())
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_cors_origin_list() {
        clear_env();
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );

        clear_env();
    }

    #[test]
    fn test_auth_debug_redacts_password() {
        let rendered = format!("{:?}", AuthConfig::default());
        assert!(!rendered.contains("\"password\""));
        assert!(rendered.contains("REDACTED"));
    }
}
