/// Feature handler - the template's single business endpoint
use crate::error::Result;
use crate::services::FeatureService;
use actix_web::{web, HttpResponse};

/// POST /{product}/{feature}/{subfeature}
/// POST /api/v1/{product}/{feature}/{subfeature}
///
/// The raw request body is forwarded verbatim to the service.
pub async fn handle_feature(
    service: web::Data<FeatureService>,
    body: String,
) -> Result<HttpResponse> {
    let response = service.handle(&body).await?;
    Ok(HttpResponse::Ok().json(response))
}
