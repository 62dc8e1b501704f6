use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Absolute placement of an element on the page, in PDF points with a
/// top-left origin (the coordinate space the template editor stores).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    #[schema(example = 50.0)]
    pub x: f32,
    #[schema(example = 120.0)]
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Size {
    #[schema(example = 200.0)]
    pub w: f32,
    #[schema(example = 80.0)]
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
}

/// One positioned content unit. For text elements `content` may embed
/// `${variable}` placeholders; for image elements it is a file path
/// relative to the upload root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[schema(example = "Once upon a time, ${heroName} set out...")]
    pub content: String,
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    String,
    Number,
    Boolean,
}

/// A named placeholder declared on a template. `default_value` is
/// informational for the editor UI; the renderer never substitutes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[schema(example = "heroName")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[schema(value_type = Object)]
    pub default_value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    Draft,
    Public,
}

/// A stored document blueprint: metadata, variable declarations, and
/// positioned elements.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "A Pirate Adventure")]
    pub title: String,
    #[schema(example = "Customizable pirate story for young readers")]
    pub description: String,
    #[schema(example = "adventure")]
    pub category: String,
    #[schema(example = "6-8")]
    pub age_range: String,
    #[schema(example = "fantasy")]
    pub genre: Option<String>,
    pub status: TemplateStatus,
    /// Optional reference to a previously uploaded base PDF (legacy mode).
    pub pdf_path: Option<String>,
    pub variables: Vec<Variable>,
    pub elements: Vec<Element>,
    pub popularity: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(req: CreateTemplateRequest, created_by: Uuid) -> Self {
        let now = Utc::now();
        Template {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description.unwrap_or_default(),
            category: req.category,
            age_range: req.age_range,
            genre: req.genre,
            status: TemplateStatus::Draft,
            pdf_path: req.pdf_path,
            variables: req.variables,
            elements: req.elements,
            popularity: 0,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[schema(example = "A Pirate Adventure")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "adventure")]
    pub category: String,
    #[schema(example = "6-8")]
    pub age_range: String,
    pub genre: Option<String>,
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub age_range: Option<String>,
    pub genre: Option<String>,
    pub pdf_path: Option<String>,
    pub variables: Option<Vec<Variable>>,
    pub elements: Option<Vec<Element>>,
}

/// Status changes go through a dedicated operation, separate from field
/// edits.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: TemplateStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListTemplatesQuery {
    /// Cap the number of returned templates (gallery "popular" view).
    pub limit: Option<usize>,
    /// Only list templates with this status.
    pub status: Option<TemplateStatus>,
    /// Sort key: `popularity` (default when filtering) or `createdAt`.
    pub sort: Option<String>,
}
