use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod db;
pub mod pdf;
pub mod storage;
pub mod template;
pub mod user;
pub mod zone;

mod storage_tests;

pub use crate::db::AppState;
pub use crate::config::ServerConfig;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Health",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Route table for the `/api` scope, shared by the server and the
/// integration tests.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/auth/register").route(web::post().to(auth::handlers::register)))
        .service(web::resource("/auth/login").route(web::post().to(auth::handlers::login)))
        .service(web::resource("/auth/refresh").route(web::post().to(auth::handlers::refresh)))
        .service(web::resource("/auth/me").route(web::get().to(auth::handlers::me)))
        .service(
            web::resource("/users")
                .route(web::get().to(user::handlers::get_all_users))
                .route(web::post().to(user::handlers::create_user)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(user::handlers::get_user_by_id))
                .route(web::put().to(user::handlers::update_user))
                .route(web::delete().to(user::handlers::delete_user)),
        )
        .service(
            web::resource("/templates")
                .route(web::get().to(template::handlers::get_all_templates))
                .route(web::post().to(template::handlers::create_template)),
        )
        .service(
            web::resource("/templates/{id}/status")
                .route(web::put().to(template::handlers::update_template_status)),
        )
        .service(
            web::resource("/templates/{id}")
                .route(web::get().to(template::handlers::get_template_by_id))
                .route(web::put().to(template::handlers::update_template))
                .route(web::delete().to(template::handlers::delete_template)),
        )
        .service(web::resource("/zones").route(web::post().to(zone::handlers::create_zone)))
        .service(
            web::resource("/zones/template/{templateId}")
                .route(web::get().to(zone::handlers::get_zones_by_template)),
        )
        .service(
            web::resource("/zones/{id}")
                .route(web::put().to(zone::handlers::update_zone))
                .route(web::delete().to(zone::handlers::delete_zone)),
        )
        .service(web::resource("/pdf/generate").route(web::post().to(pdf::handlers::generate_pdf)))
        .service(
            web::resource("/pdf/generated")
                .route(web::get().to(pdf::handlers::get_generated_pdfs)),
        );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::health,
            crate::auth::handlers::register,
            crate::auth::handlers::login,
            crate::auth::handlers::refresh,
            crate::auth::handlers::me,
            crate::user::handlers::get_all_users,
            crate::user::handlers::create_user,
            crate::user::handlers::get_user_by_id,
            crate::user::handlers::update_user,
            crate::user::handlers::delete_user,
            crate::template::handlers::get_all_templates,
            crate::template::handlers::get_template_by_id,
            crate::template::handlers::create_template,
            crate::template::handlers::update_template,
            crate::template::handlers::update_template_status,
            crate::template::handlers::delete_template,
            crate::zone::handlers::create_zone,
            crate::zone::handlers::get_zones_by_template,
            crate::zone::handlers::update_zone,
            crate::zone::handlers::delete_zone,
            crate::pdf::handlers::generate_pdf,
            crate::pdf::handlers::get_generated_pdfs
        ),
        components(
            schemas(
                auth::model::Role,
                auth::model::UserInfo,
                auth::model::RegisterRequest,
                auth::model::LoginRequest,
                auth::model::TokenResponse,
                auth::model::RefreshRequest,
                user::models::CreateUserRequest,
                user::models::UpdateUserRequest,
                template::models::Template,
                template::models::TemplateStatus,
                template::models::Variable,
                template::models::VariableKind,
                template::models::Element,
                template::models::ElementKind,
                template::models::Position,
                template::models::Size,
                template::models::CreateTemplateRequest,
                template::models::UpdateTemplateRequest,
                template::models::UpdateStatusRequest,
                zone::models::Zone,
                zone::models::ZoneType,
                zone::models::CreateZoneRequest,
                zone::models::UpdateZoneRequest,
                pdf::handlers::GeneratePdfRequest,
                pdf::handlers::GeneratePdfResponse,
                storage::StoredFile,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Health", description = "Service health."),
            (name = "Authentication", description = "Account registration and token endpoints."),
            (name = "Users", description = "User directory administration."),
            (name = "Templates", description = "Story template CRUD and gallery listing."),
            (name = "Zones", description = "Template layout zone CRUD."),
            (name = "PDF", description = "Template rendering and generated document listing.")
        )
    )]
    struct ApiDoc;

    let server_config = ServerConfig::from_env();

    // The static file scope and the renderer both expect these to exist.
    std::fs::create_dir_all(&server_config.generated_dir)?;

    let app_state = web::Data::new(AppState::new(&server_config));

    let prometheus = PrometheusMetricsBuilder::new("story_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!(
        "Starting server at http://{}:{}",
        server_config.host,
        server_config.port
    );

    let upload_root = server_config.upload_root.clone();
    let bind_addr = (server_config.host.clone(), server_config.port);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(api_config))
            .service(actix_files::Files::new("/uploads", upload_root.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
