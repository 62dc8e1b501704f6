use actix_web::{
    web::{self, Path},
    HttpRequest, HttpResponse, Responder,
};
use chrono::Utc;
use uuid::Uuid;

use super::models::{
    CreateTemplateRequest, ListTemplatesQuery, Template, TemplateStatus, UpdateStatusRequest,
    UpdateTemplateRequest,
};
use crate::auth::middleware::require_admin;
use crate::db::AppState;

/// Apply the gallery listing query: status filter, sort key, limit.
/// Without any query params this is the plain "all templates" listing.
pub(crate) fn apply_listing_query(
    mut templates: Vec<Template>,
    query: &ListTemplatesQuery,
) -> Vec<Template> {
    if let Some(status) = query.status {
        templates.retain(|t| t.status == status);
    }

    // Unknown sort keys leave the listing unsorted.
    match query.sort.as_deref() {
        Some("createdAt") => templates.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some("popularity") => templates.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        _ => {}
    }

    if let Some(limit) = query.limit {
        templates.truncate(limit);
    }
    templates
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    get,
    path = "/templates",
    responses(
        (status = 200, description = "List of templates", body = [Template])
    ),
    params(
        ("limit" = Option<usize>, Query, description = "Cap the number of returned templates"),
        ("status" = Option<TemplateStatus>, Query, description = "Only list templates with this status"),
        ("sort" = Option<String>, Query, description = "Sort key: popularity or createdAt")
    )
)]
pub async fn get_all_templates(
    query: web::Query<ListTemplatesQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let templates: Vec<Template> = data.templates.read().values().cloned().collect();
    HttpResponse::Ok().json(apply_listing_query(templates, &query))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    get,
    path = "/templates/{id}",
    responses(
        (status = 200, description = "Template found", body = Template),
        (status = 404, description = "Template not found")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the template to retrieve")
    )
)]
pub async fn get_template_by_id(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.get_template(&id.into_inner()) {
        Some(template) => HttpResponse::Ok().json(template),
        None => {
            HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Template not found"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    post,
    path = "/templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = Template),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_template(
    req: HttpRequest,
    body: web::Json<CreateTemplateRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let claims = require_admin(&req)?;
    let created_by = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| actix_web::error::ErrorUnauthorized("Invalid token subject"))?;

    let template = Template::new(body.into_inner(), created_by);
    data.templates
        .write()
        .insert(template.id, template.clone());
    Ok(HttpResponse::Created().json(template))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    put,
    path = "/templates/{id}",
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = Template),
        (status = 404, description = "Template not found"),
        (status = 403, description = "Admin role required")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the template to update")
    )
)]
pub async fn update_template(
    req: HttpRequest,
    id: Path<Uuid>,
    body: web::Json<UpdateTemplateRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let mut templates = data.templates.write();
    if let Some(template) = templates.get_mut(&id.into_inner()) {
        if let Some(title) = &body.title {
            template.title = title.clone();
        }
        if let Some(description) = &body.description {
            template.description = description.clone();
        }
        if let Some(category) = &body.category {
            template.category = category.clone();
        }
        if let Some(age_range) = &body.age_range {
            template.age_range = age_range.clone();
        }
        if let Some(genre) = &body.genre {
            template.genre = Some(genre.clone());
        }
        if let Some(pdf_path) = &body.pdf_path {
            template.pdf_path = Some(pdf_path.clone());
        }
        if let Some(variables) = &body.variables {
            template.variables = variables.clone();
        }
        if let Some(elements) = &body.elements {
            template.elements = elements.clone();
        }
        template.updated_at = Utc::now();
        Ok(HttpResponse::Ok().json(template.clone()))
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Template not found")))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    put,
    path = "/templates/{id}/status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Template),
        (status = 404, description = "Template not found"),
        (status = 403, description = "Admin role required")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the template")
    )
)]
pub async fn update_template_status(
    req: HttpRequest,
    id: Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let mut templates = data.templates.write();
    if let Some(template) = templates.get_mut(&id.into_inner()) {
        template.status = body.status;
        template.updated_at = Utc::now();
        Ok(HttpResponse::Ok().json(template.clone()))
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Template not found")))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Templates",
    delete,
    path = "/templates/{id}",
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found"),
        (status = 403, description = "Admin role required")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the template to delete")
    )
)]
pub async fn delete_template(
    req: HttpRequest,
    id: Path<Uuid>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let template_id = id.into_inner();
    if data.templates.write().remove(&template_id).is_some() {
        // Zones are owned by their template; drop them with it.
        data.zones
            .write()
            .retain(|_, zone| zone.template_id != template_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Template not found")))
    }
}
