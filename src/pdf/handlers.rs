use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::generate_custom_pdf;
use super::renderer::RenderError;
use crate::db::AppState;
use crate::storage::StoredFile;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub template_id: Uuid,
    /// Variable name to value mapping substituted into element content.
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"heroName": "Alice"}))]
    pub user_values: HashMap<String, String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfResponse {
    /// Relative URL of the generated document.
    #[schema(example = "/uploads/generated/generated_..._a1b2c3d4.pdf")]
    pub pdf_url: String,
}

#[utoipa::path(
    context_path = "/api",
    tag = "PDF",
    post,
    path = "/pdf/generate",
    request_body = GeneratePdfRequest,
    responses(
        (status = 201, description = "PDF generated", body = GeneratePdfResponse),
        (status = 404, description = "Template not found"),
        (status = 500, description = "Rendering or storage failure")
    )
)]
pub async fn generate_pdf(
    body: web::Json<GeneratePdfRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = body.into_inner();
    match generate_custom_pdf(&data, req.template_id, &req.user_values).await {
        Ok(stored) => HttpResponse::Created().json(GeneratePdfResponse {
            pdf_url: stored.path,
        }),
        Err(RenderError::TemplateNotFound(id)) => HttpResponse::NotFound().json(
            crate::ErrorResponse::not_found(&format!("Template with ID {} not found", id)),
        ),
        Err(e) => {
            log::error!("PDF generation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("PDF generation failed"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "PDF",
    get,
    path = "/pdf/generated",
    responses(
        (status = 200, description = "Previously generated documents", body = [StoredFile])
    )
)]
pub async fn get_generated_pdfs(data: web::Data<AppState>) -> impl Responder {
    match data.file_store.list().await {
        Ok(files) => HttpResponse::Ok().json(files),
        Err(e) => {
            log::error!("Failed to list generated documents: {}", e);
            HttpResponse::InternalServerError().json(crate::ErrorResponse::internal_error(
                "Failed to list generated documents",
            ))
        }
    }
}
