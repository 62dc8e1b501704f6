//! Unit tests for authentication module

#[cfg(test)]
mod tests {
    use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_token};
    use crate::auth::model::{Role, TokenResponse, User, UserInfo};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_generate_and_validate_access_token() {
        let user_id = Uuid::new_v4().to_string();
        let email = "editor@example.com";

        let token = generate_access_token(&user_id, email, Role::Admin)
            .expect("Failed to generate access token");

        let claims = validate_token(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, email);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_generate_and_validate_refresh_token() {
        let user_id = Uuid::new_v4().to_string();
        let email = "reader@example.com";

        let token = generate_refresh_token(&user_id, email, Role::User)
            .expect("Failed to generate refresh token");

        let claims = validate_token(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn test_invalid_token_returns_error() {
        let result = validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_access_token_expiry_is_shorter_than_refresh() {
        let user_id = "test-id";
        let email = "editor@example.com";

        let access_token = generate_access_token(user_id, email, Role::Admin)
            .expect("Failed to generate access token");
        let refresh_token = generate_refresh_token(user_id, email, Role::Admin)
            .expect("Failed to generate refresh token");

        let access_claims = validate_token(&access_token).expect("Failed to validate access token");
        let refresh_claims =
            validate_token(&refresh_token).expect("Failed to validate refresh token");

        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_user_to_user_info_conversion() {
        let user = User {
            id: Uuid::new_v4(),
            email: "editor@example.com".to_string(),
            password_hash: "hashedpassword".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };

        let info: UserInfo = user.clone().into();

        assert_eq!(info.id, user.id);
        assert_eq!(info.email, user.email);
        assert_eq!(info.role, user.role);
        // UserInfo must not expose password_hash
        let json = serde_json::to_string(&info).expect("Failed to serialize");
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").expect("Failed to deserialize");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_token_response_serialize() {
        let response = TokenResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 900,
        };

        let json = serde_json::to_string(&response).expect("Failed to serialize");

        assert!(json.contains("access_token"));
        assert!(json.contains("refresh_token"));
        assert!(json.contains("token_type"));
        assert!(json.contains("expires_in"));
    }
}
