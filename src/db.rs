//! Shared application state: the in-process document store plus the
//! injected file store and renderer.
//!
//! The original deployment kept templates in an external document
//! database; the store contract here is the same keyed CRUD surface
//! (get / list / insert / replace / remove, `None` on absent ids), held
//! in `RwLock`ed maps. Handlers take short read/write guards and never
//! hold them across `.await` points.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::auth::model::User;
use crate::config::ServerConfig;
use crate::pdf::renderer::TemplateRenderer;
use crate::storage::{FileStore, LocalFileStore};
use crate::template::models::Template;
use crate::zone::models::Zone;

pub struct AppState {
    pub templates: RwLock<HashMap<Uuid, Template>>,
    pub zones: RwLock<HashMap<Uuid, Zone>>,
    pub users: RwLock<HashMap<Uuid, User>>,
    pub file_store: Arc<dyn FileStore>,
    pub renderer: TemplateRenderer,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let file_store = Arc::new(LocalFileStore::new(
            config.generated_dir.clone(),
            "/uploads/generated",
        ));
        Self::with_file_store(file_store, config)
    }

    /// Build state around an externally supplied file store. Tests use
    /// this with a temp-dir backed store.
    pub fn with_file_store(file_store: Arc<dyn FileStore>, config: &ServerConfig) -> Self {
        AppState {
            templates: RwLock::new(HashMap::new()),
            zones: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            file_store,
            renderer: TemplateRenderer::new(config.upload_root.clone()),
        }
    }

    pub fn get_template(&self, id: &Uuid) -> Option<Template> {
        self.templates.read().get(id).cloned()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned()
    }
}
