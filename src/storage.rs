use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;
use utoipa::ToSchema;

/// One rendered document as reported by [`FileStore::list`].
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[schema(example = "generated_f1e2d3c4-b5a6-7890-1234-567890abcdef_1735689600000_a1b2c3d4.pdf")]
    pub filename: String,
    /// Relative URL under which the file is served.
    #[schema(example = "/uploads/generated/generated_..._a1b2c3d4.pdf")]
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// Durable sink for rendered documents.
///
/// `write` must be atomic: a file is either fully persisted and visible to
/// `list`, or absent. Callers may only treat a render as complete once
/// `write` has returned.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn write(&self, filename: &str, bytes: &[u8]) -> io::Result<StoredFile>;
    async fn list(&self) -> io::Result<Vec<StoredFile>>;
}

/// Filesystem-backed store over a single flat directory.
pub struct LocalFileStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        LocalFileStore {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    fn public_path(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(&self, filename: &str, bytes: &[u8]) -> io::Result<StoredFile> {
        fs::create_dir_all(&self.root).await?;

        // Write to a hidden temp name, then rename. `list` only reports
        // `.pdf` entries, so a half-written file is never exposed.
        let tmp_path = self.root.join(format!(".{}.tmp", filename));
        let final_path = self.root.join(filename);

        fs::write(&tmp_path, bytes).await?;
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        Ok(StoredFile {
            filename: filename.to_string(),
            path: self.public_path(filename),
            created_at: Utc::now(),
        })
    }

    async fn list(&self) -> io::Result<Vec<StoredFile>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.root).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("pdf") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let created_at = entry
                .metadata()
                .await?
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            files.push(StoredFile {
                filename: filename.to_string(),
                path: self.public_path(filename),
                created_at,
            });
        }

        // Newest first, matching how the gallery lists past renders.
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }
}

/// Resolve an element's image reference against the upload root.
///
/// References are stored as relative paths; anything trying to escape the
/// root (absolute paths, `..` components) resolves to `None` and the
/// renderer skips it like any other missing asset.
pub fn resolve_asset_path(upload_root: &Path, reference: &str) -> Option<PathBuf> {
    let relative = Path::new(reference);
    if relative.is_absolute() {
        return None;
    }
    if relative
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }
    Some(upload_root.join(relative))
}
