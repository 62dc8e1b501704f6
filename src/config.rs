//! Server configuration pulled from the environment.

use std::env;
use std::path::PathBuf;

/// Runtime settings for the HTTP server and the upload tree.
///
/// `generated_dir` is where rendered documents land; it always lives
/// under `upload_root` so the static `/uploads` scope can serve both
/// source assets and finished documents.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_root: PathBuf,
    pub generated_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("STORY_SERVER_HOST").unwrap_or_else(|_| String::from("0.0.0.0"));
        let port = env::var("STORY_SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let upload_root = env::var("STORY_SERVER_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                log::info!("STORY_SERVER_UPLOAD_DIR not set, using default path: ./uploads");
                PathBuf::from("./uploads")
            });
        let generated_dir = upload_root.join("generated");

        ServerConfig {
            host,
            port,
            upload_root,
            generated_dir,
        }
    }
}
