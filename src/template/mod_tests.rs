#[cfg(test)]
mod tests {
    use crate::template::handlers::apply_listing_query;
    use crate::template::models::{
        CreateTemplateRequest, Element, ElementKind, ListTemplatesQuery, Template, TemplateStatus,
        Variable, VariableKind,
    };
    use uuid::Uuid;

    fn create_request_json() -> &'static str {
        r#"{
            "title": "A Pirate Adventure",
            "description": "Customizable pirate story",
            "category": "adventure",
            "ageRange": "6-8",
            "genre": "fantasy",
            "variables": [
                {"name": "heroName", "type": "string", "defaultValue": "Alice"}
            ],
            "elements": [
                {
                    "type": "text",
                    "content": "Ahoy, ${heroName}!",
                    "position": {"x": 50, "y": 120},
                    "size": {"w": 200, "h": 40}
                }
            ]
        }"#
    }

    #[test]
    fn test_create_request_deserializes_camel_case() {
        let request: CreateTemplateRequest =
            serde_json::from_str(create_request_json()).expect("Failed to deserialize");

        assert_eq!(request.title, "A Pirate Adventure");
        assert_eq!(request.age_range, "6-8");
        assert_eq!(request.variables.len(), 1);
        assert_eq!(request.variables[0].name, "heroName");
        assert_eq!(request.variables[0].kind, VariableKind::String);
        assert_eq!(request.elements[0].kind, ElementKind::Text);
        assert_eq!(request.elements[0].position.x, 50.0);
    }

    #[test]
    fn test_create_request_defaults_empty_schema_lists() {
        let json = r#"{"title": "Bare", "category": "misc", "ageRange": "3-5"}"#;
        let request: CreateTemplateRequest =
            serde_json::from_str(json).expect("Failed to deserialize");

        assert!(request.variables.is_empty());
        assert!(request.elements.is_empty());
    }

    #[test]
    fn test_new_template_starts_as_draft() {
        let request: CreateTemplateRequest =
            serde_json::from_str(create_request_json()).expect("Failed to deserialize");
        let created_by = Uuid::new_v4();

        let template = Template::new(request, created_by);

        assert!(!template.id.is_nil());
        assert_eq!(template.status, TemplateStatus::Draft);
        assert_eq!(template.popularity, 0);
        assert_eq!(template.created_by, created_by);
        assert_eq!(template.created_at, template.updated_at);
    }

    #[test]
    fn test_template_serializes_camel_case() {
        let request: CreateTemplateRequest =
            serde_json::from_str(create_request_json()).expect("Failed to deserialize");
        let template = Template::new(request, Uuid::new_v4());

        let json = serde_json::to_string(&template).expect("Failed to serialize");

        assert!(json.contains("\"ageRange\""));
        assert!(json.contains("\"createdBy\""));
        assert!(json.contains("\"defaultValue\""));
        assert!(json.contains("\"status\":\"draft\""));
    }

    #[test]
    fn test_element_kind_rejects_unknown_type() {
        let json = r#"{
            "type": "video",
            "content": "clip.mp4",
            "position": {"x": 0, "y": 0},
            "size": {"w": 10, "h": 10}
        }"#;
        let result: Result<Element, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_sorts_only_on_known_keys() {
        let make = |popularity: i64| {
            let request: CreateTemplateRequest =
                serde_json::from_str(create_request_json()).expect("Failed to deserialize");
            let mut template = Template::new(request, Uuid::new_v4());
            template.popularity = popularity;
            template
        };
        let first = make(1);
        let second = make(9);

        let query = ListTemplatesQuery {
            limit: None,
            status: None,
            sort: Some("title".to_string()),
        };
        let listed = apply_listing_query(vec![first.clone(), second.clone()], &query);
        assert_eq!(listed[0].id, first.id, "unknown sort key must not reorder");

        let query = ListTemplatesQuery {
            limit: None,
            status: None,
            sort: Some("popularity".to_string()),
        };
        let listed = apply_listing_query(vec![first, second], &query);
        assert_eq!(listed[0].popularity, 9);
    }

    #[test]
    fn test_variable_default_value_accepts_any_json() {
        let json = r#"{"name": "age", "type": "number", "defaultValue": 7}"#;
        let variable: Variable = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(variable.kind, VariableKind::Number);
        assert_eq!(variable.default_value, serde_json::json!(7));
    }
}
