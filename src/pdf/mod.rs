pub mod handlers;
pub mod renderer;


use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::db::AppState;
use crate::storage::StoredFile;
use renderer::RenderError;

/// Render a template with the caller's variable values and persist the
/// result to the file store.
///
/// The template lookup happens before any rendering; an unknown id
/// produces [`RenderError::TemplateNotFound`] and nothing is written.
pub async fn generate_custom_pdf(
    state: &AppState,
    template_id: Uuid,
    values: &HashMap<String, String>,
) -> Result<StoredFile, RenderError> {
    let template = state
        .get_template(&template_id)
        .ok_or(RenderError::TemplateNotFound(template_id))?;

    let bytes = state.renderer.render(&template, values)?;

    let stored = state
        .file_store
        .write(&unique_filename(&template_id), &bytes)
        .await?;
    log::info!("rendered template {} to {}", template_id, stored.path);
    Ok(stored)
}

/// Template id plus timestamp plus a random token: concurrent renders of
/// the same template never target the same filename, so no locking is
/// needed around the output directory.
fn unique_filename(template_id: &Uuid) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "generated_{}_{}_{}.pdf",
        template_id,
        Utc::now().timestamp_millis(),
        &token[..8]
    )
}
