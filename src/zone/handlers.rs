use actix_web::{
    web::{self, Path},
    HttpRequest, HttpResponse, Responder,
};
use chrono::Utc;
use uuid::Uuid;

use super::models::{CreateZoneRequest, UpdateZoneRequest, Zone};
use crate::auth::middleware::require_admin;
use crate::db::AppState;

#[utoipa::path(
    context_path = "/api",
    tag = "Zones",
    post,
    path = "/zones",
    request_body = CreateZoneRequest,
    responses(
        (status = 201, description = "Zone created", body = Zone),
        (status = 404, description = "Referenced template not found"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_zone(
    req: HttpRequest,
    body: web::Json<CreateZoneRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    if data.get_template(&body.template_id).is_none() {
        return Ok(
            HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Template not found"))
        );
    }

    let zone = Zone::new(body.into_inner());
    data.zones.write().insert(zone.id, zone.clone());
    Ok(HttpResponse::Created().json(zone))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Zones",
    get,
    path = "/zones/template/{templateId}",
    responses(
        (status = 200, description = "Zones for the template", body = [Zone]),
        (status = 404, description = "Template not found")
    ),
    params(
        ("templateId" = Uuid, Path, description = "ID of the owning template")
    )
)]
pub async fn get_zones_by_template(
    template_id: Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let template_id = template_id.into_inner();
    if data.get_template(&template_id).is_none() {
        return HttpResponse::NotFound()
            .json(crate::ErrorResponse::not_found("Template not found"));
    }

    let zones: Vec<Zone> = data
        .zones
        .read()
        .values()
        .filter(|z| z.template_id == template_id)
        .cloned()
        .collect();
    HttpResponse::Ok().json(zones)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Zones",
    put,
    path = "/zones/{id}",
    request_body = UpdateZoneRequest,
    responses(
        (status = 200, description = "Zone updated", body = Zone),
        (status = 404, description = "Zone not found"),
        (status = 403, description = "Admin role required")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the zone to update")
    )
)]
pub async fn update_zone(
    req: HttpRequest,
    id: Path<Uuid>,
    body: web::Json<UpdateZoneRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let mut zones = data.zones.write();
    if let Some(zone) = zones.get_mut(&id.into_inner()) {
        if let Some(name) = &body.name {
            zone.name = name.clone();
        }
        if let Some(kind) = body.kind {
            zone.kind = kind;
        }
        if let Some(variables) = &body.variables {
            zone.variables = variables.clone();
        }
        if let Some(content) = &body.content {
            zone.content = content.clone();
        }
        if let Some(position) = body.position {
            zone.position = position;
        }
        if let Some(size) = body.size {
            zone.size = size;
        }
        zone.updated_at = Utc::now();
        Ok(HttpResponse::Ok().json(zone.clone()))
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Zone not found")))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Zones",
    delete,
    path = "/zones/{id}",
    responses(
        (status = 204, description = "Zone deleted"),
        (status = 404, description = "Zone not found"),
        (status = 403, description = "Admin role required")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the zone to delete")
    )
)]
pub async fn delete_zone(
    req: HttpRequest,
    id: Path<Uuid>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;
    if data.zones.write().remove(&id.into_inner()).is_some() {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Zone not found")))
    }
}
