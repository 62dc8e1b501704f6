#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::storage::{resolve_asset_path, FileStore, LocalFileStore};

    #[tokio::test]
    async fn test_write_then_list_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalFileStore::new(dir.path().to_path_buf(), "/uploads/generated");

        let stored = store
            .write("generated_abc_1.pdf", b"%PDF-1.3 fake")
            .await
            .expect("write failed");

        assert_eq!(stored.filename, "generated_abc_1.pdf");
        assert_eq!(stored.path, "/uploads/generated/generated_abc_1.pdf");

        let on_disk = std::fs::read(dir.path().join("generated_abc_1.pdf")).expect("read back");
        assert_eq!(on_disk, b"%PDF-1.3 fake");

        let listed = store.list().await.expect("list failed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].filename, "generated_abc_1.pdf");
    }

    #[tokio::test]
    async fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("generated");
        let store = LocalFileStore::new(nested.clone(), "/uploads/generated");

        store.write("a.pdf", b"%PDF").await.expect("write failed");

        assert!(nested.join("a.pdf").exists());
    }

    #[tokio::test]
    async fn test_list_ignores_non_pdf_and_temp_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalFileStore::new(dir.path().to_path_buf(), "/uploads/generated");

        store.write("real.pdf", b"%PDF").await.expect("write failed");
        std::fs::write(dir.path().join(".half-written.pdf.tmp"), b"partial").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a render").unwrap();

        let listed = store.list().await.expect("list failed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].filename, "real.pdf");
    }

    #[tokio::test]
    async fn test_list_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalFileStore::new(dir.path().join("never-created"), "/uploads/generated");

        let listed = store.list().await.expect("list failed");
        assert!(listed.is_empty());
    }

    #[test]
    fn test_resolve_asset_path_joins_relative_references() {
        let root = Path::new("/srv/uploads");
        let resolved = resolve_asset_path(root, "covers/pirate.png").expect("should resolve");
        assert_eq!(resolved, root.join("covers/pirate.png"));
    }

    #[test]
    fn test_resolve_asset_path_rejects_escapes() {
        let root = Path::new("/srv/uploads");
        assert!(resolve_asset_path(root, "/etc/passwd").is_none());
        assert!(resolve_asset_path(root, "../secrets.png").is_none());
        assert!(resolve_asset_path(root, "covers/../../secrets.png").is_none());
    }
}
