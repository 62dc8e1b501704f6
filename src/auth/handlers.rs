use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use uuid::Uuid;

use super::jwt::{
    generate_access_token, generate_refresh_token, get_access_token_expiry, validate_token,
};
use super::middleware::validate_request_token;
use super::model::{
    LoginRequest, RefreshRequest, RegisterRequest, Role, TokenResponse, User, UserInfo,
};
use crate::db::AppState;

fn issue_tokens(user: &User) -> Result<TokenResponse, jsonwebtoken::errors::Error> {
    let user_id = user.id.to_string();
    let access_token = generate_access_token(&user_id, &user.email, user.role)?;
    let refresh_token = generate_refresh_token(&user_id, &user.email, user.role)?;
    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
    })
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(state: web::Data<AppState>, body: web::Json<RegisterRequest>) -> impl Responder {
    let password_hash = match hash(&body.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Registration failed"));
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        email: body.email.clone(),
        password_hash,
        role: body.role.unwrap_or(Role::User),
        created_at: Utc::now(),
    };

    let tokens = match issue_tokens(&user) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate tokens: {:?}", e);
            return HttpResponse::InternalServerError().json(
                crate::ErrorResponse::internal_error("Failed to generate token"),
            );
        }
    };

    // Duplicate check and insert under one guard: concurrent registers
    // for the same email must not both succeed.
    let mut users = state.users.write();
    if users.values().any(|u| u.email == body.email) {
        return HttpResponse::Conflict().json(crate::ErrorResponse::new(
            "Conflict",
            "User already exists",
        ));
    }
    users.insert(user.id, user);
    HttpResponse::Created().json(tokens)
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let user = match state.get_user_by_email(&body.email) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid email or password",
            ));
        }
    };

    let password_valid = verify(&body.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
            "Unauthorized",
            "Invalid email or password",
        ));
    }

    match issue_tokens(&user) {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(e) => {
            log::error!("Failed to generate tokens: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"))
        }
    }
}

/// Exchange a refresh token for a fresh token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh(state: web::Data<AppState>, body: web::Json<RefreshRequest>) -> impl Responder {
    let claims = match validate_token(&body.refresh_token) {
        Ok(c) if c.token_type == "refresh" => c,
        _ => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid or expired refresh token",
            ));
        }
    };

    let user_id = match claims.sub.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid refresh token subject",
            ));
        }
    };

    let user = match state.users.read().get(&user_id).cloned() {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Account no longer exists",
            ));
        }
    };

    match issue_tokens(&user) {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(e) => {
            log::error!("Failed to generate tokens: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"))
        }
    }
}

/// Current account info from the access token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> actix_web::Result<HttpResponse> {
    let claims = validate_request_token(&req)?;

    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| actix_web::error::ErrorUnauthorized("Invalid token subject"))?;

    match state.users.read().get(&user_id) {
        Some(user) => Ok(HttpResponse::Ok().json(UserInfo::from(user.clone()))),
        None => Ok(HttpResponse::NotFound()
            .json(crate::ErrorResponse::not_found("User not found"))),
    }
}
