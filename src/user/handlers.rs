use actix_web::{
    web::{self, Path},
    HttpRequest, HttpResponse,
};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use uuid::Uuid;

use super::models::{CreateUserRequest, UpdateUserRequest};
use crate::auth::middleware::require_admin;
use crate::auth::model::{User, UserInfo};
use crate::db::AppState;

#[utoipa::path(
    context_path = "/api",
    tag = "Users",
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of all users", body = [UserInfo]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_all_users(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;
    let users = data.users.read();
    let all_users: Vec<UserInfo> = users.values().cloned().map(UserInfo::from).collect();
    Ok(HttpResponse::Ok().json(all_users))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Users",
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 409, description = "Email already registered"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let password_hash = match hash(&body.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Failed to hash password: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("User creation failed")));
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        email: body.email.clone(),
        password_hash,
        role: body.role,
        created_at: Utc::now(),
    };

    let info = UserInfo::from(user.clone());

    // Duplicate check and insert under one guard, same as register.
    let mut users = data.users.write();
    if users.values().any(|u| u.email == body.email) {
        return Ok(HttpResponse::Conflict().json(crate::ErrorResponse::new(
            "Conflict",
            "User already exists",
        )));
    }
    users.insert(user.id, user);
    Ok(HttpResponse::Created().json(info))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Users",
    get,
    path = "/users/{id}",
    responses(
        (status = 200, description = "User found", body = UserInfo),
        (status = 404, description = "User not found")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the user to retrieve")
    )
)]
pub async fn get_user_by_id(
    req: HttpRequest,
    id: Path<Uuid>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;
    match data.users.read().get(&id.into_inner()) {
        Some(user) => Ok(HttpResponse::Ok().json(UserInfo::from(user.clone()))),
        None => Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found"))),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Users",
    put,
    path = "/users/{id}",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserInfo),
        (status = 404, description = "User not found")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the user to update")
    )
)]
pub async fn update_user(
    req: HttpRequest,
    id: Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;

    let password_hash = match &body.password {
        Some(password) => match hash(password, DEFAULT_COST) {
            Ok(h) => Some(h),
            Err(e) => {
                log::error!("Failed to hash password: {:?}", e);
                return Ok(HttpResponse::InternalServerError()
                    .json(crate::ErrorResponse::internal_error("User update failed")));
            }
        },
        None => None,
    };

    let mut users = data.users.write();
    if let Some(user) = users.get_mut(&id.into_inner()) {
        if let Some(email) = &body.email {
            user.email = email.clone();
        }
        if let Some(role) = body.role {
            user.role = role;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        Ok(HttpResponse::Ok().json(UserInfo::from(user.clone())))
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found")))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Users",
    delete,
    path = "/users/{id}",
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the user to delete")
    )
)]
pub async fn delete_user(
    req: HttpRequest,
    id: Path<Uuid>,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    require_admin(&req)?;
    if data.users.write().remove(&id.into_inner()).is_some() {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found")))
    }
}
