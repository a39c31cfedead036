/// OpenAPI documentation for the Feature Service
///
/// Static metadata comes from the derive; the feature paths and the server
/// URL depend on runtime configuration and are added by [`ApiDoc::build`].
use crate::config::Config;
use crate::models::FeatureResponse;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::ServerBuilder;
use utoipa::openapi::{ContentBuilder, Ref, RefOr, ResponseBuilder, Schema};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Template Rust API",
        version = "1.0.0",
        description = "Template to be used by AI Agents",
        contact(
            name = "AI Template",
            email = "brettlashier@gmail.com"
        ),
        license(
            name = "Example License",
            url = "https://examplewebsitenotreal/license"
        )
    ),
    components(schemas(FeatureResponse)),
    tags(
        (name = "feature", description = "Scaffolded product feature endpoint"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer-jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api-docs"
    }

    pub fn swagger_ui_path() -> &'static str {
        "/swagger-ui/{_:.*}"
    }

    /// Full document for the configured routes and port
    pub fn build(config: &Config) -> utoipa::openapi::OpenApi {
        let mut doc = ApiDoc::openapi();

        doc.servers = Some(vec![ServerBuilder::new()
            .url(config.local_server_url())
            .description(Some("Local Development"))
            .build()]);

        for path in config.routes.endpoint_paths() {
            doc.paths
                .paths
                .insert(path, PathItem::new(HttpMethod::Post, feature_operation()));
        }

        doc
    }
}

fn feature_operation() -> utoipa::openapi::path::Operation {
    let raw_body = RequestBodyBuilder::new()
        .description(Some("Raw request body, forwarded verbatim"))
        .content(
            "text/plain",
            ContentBuilder::new()
                .schema(Some(RefOr::T(Schema::Object(
                    ObjectBuilder::new().schema_type(Type::String).build(),
                ))))
                .build(),
        )
        .build();

    let ok = ResponseBuilder::new()
        .description("Entity stored")
        .content(
            "application/json",
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name("FeatureResponse")))
                .build(),
        )
        .build();

    OperationBuilder::new()
        .tag("feature")
        .operation_id(Some("handleFeature"))
        .summary(Some("Create a feature entity"))
        .request_body(Some(raw_body))
        .response("200", ok)
        .response(
            "401",
            ResponseBuilder::new()
                .description("Missing or invalid Basic credentials")
                .build(),
        )
        .response(
            "500",
            ResponseBuilder::new()
                .description("Persistence failure")
                .build(),
        )
        .response(
            "503",
            ResponseBuilder::new()
                .description("Store unavailable")
                .build(),
        )
        .build()
}
