use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::model::Role;

/// Create user request (admin-only; unlike register, the role is set
/// explicitly by the caller)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "new-editor@example.com")]
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}
