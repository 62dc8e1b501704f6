#[cfg(test)]
mod tests {
    use crate::zone::models::{CreateZoneRequest, Zone, ZoneType};
    use uuid::Uuid;

    #[test]
    fn test_zone_new_assigns_id_and_timestamps() {
        let template_id = Uuid::new_v4();
        let json = format!(
            r#"{{
                "templateId": "{}",
                "name": "hero-intro",
                "type": "variable",
                "variables": ["heroName"],
                "content": "${{heroName}} enters the scene",
                "position": {{"x": 40, "y": 60}},
                "size": {{"w": 300, "h": 50}}
            }}"#,
            template_id
        );
        let request: CreateZoneRequest =
            serde_json::from_str(&json).expect("Failed to deserialize");

        let zone = Zone::new(request);

        assert!(!zone.id.is_nil());
        assert_eq!(zone.template_id, template_id);
        assert_eq!(zone.kind, ZoneType::Variable);
        assert_eq!(zone.variables, vec!["heroName".to_string()]);
        assert_eq!(zone.created_at, zone.updated_at);
    }

    #[test]
    fn test_zone_type_serde_round_trip() {
        for (kind, text) in [
            (ZoneType::Text, "\"text\""),
            (ZoneType::Image, "\"image\""),
            (ZoneType::Variable, "\"variable\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), text);
            let parsed: ZoneType = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, kind);
        }
    }
}
