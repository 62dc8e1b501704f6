#[cfg(test)]
mod tests {
    use crate::auth::model::Role;
    use crate::user::models::{CreateUserRequest, UpdateUserRequest};

    #[test]
    fn test_create_user_request_deserialize() {
        let json = r#"{"email": "new@example.com", "password": "secret", "role": "admin"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(request.email, "new@example.com");
        assert_eq!(request.role, Role::Admin);
    }

    #[test]
    fn test_update_user_request_allows_partial_payload() {
        let json = r#"{"role": "user"}"#;
        let request: UpdateUserRequest = serde_json::from_str(json).expect("Failed to deserialize");

        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert_eq!(request.role, Some(Role::User));
    }

    #[test]
    fn test_create_user_request_rejects_unknown_role() {
        let json = r#"{"email": "new@example.com", "password": "secret", "role": "superadmin"}"#;
        let result: Result<CreateUserRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
