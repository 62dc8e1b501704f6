use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::template::models::{Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Text,
    Image,
    Variable,
}

/// Editor-side layout metadata: a named region of a template the
/// drag-and-drop editor manipulates, kept separately from the rendered
/// element list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Uuid,
    pub template_id: Uuid,
    #[schema(example = "hero-intro")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ZoneType,
    /// Names of template variables referenced by this zone.
    pub variables: Vec<String>,
    pub content: String,
    pub position: Position,
    pub size: Size,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    pub fn new(req: CreateZoneRequest) -> Self {
        let now = Utc::now();
        Zone {
            id: Uuid::new_v4(),
            template_id: req.template_id,
            name: req.name,
            kind: req.kind,
            variables: req.variables,
            content: req.content,
            position: req.position,
            size: req.size,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    pub template_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ZoneType,
    #[serde(default)]
    pub variables: Vec<String>,
    pub content: String,
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZoneRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ZoneType>,
    pub variables: Option<Vec<String>>,
    pub content: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
}
