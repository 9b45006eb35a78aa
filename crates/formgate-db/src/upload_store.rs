//! Staged filesystem store for form uploads.
//!
//! Uploads are written in two phases so that submission creation is
//! all-or-nothing with respect to the database insert:
//!
//! 1. `stage` validates the content (allow-list + size ceiling) and writes
//!    it atomically into a staging area under the upload root. Nothing is
//!    publicly visible yet.
//! 2. `commit` moves the staged file into its final bucket
//!    `{category}/{token}/{field}_{ts}.{ext}` after the insert succeeds.
//!    `discard` removes staged content on any failure path.
//!
//! Bucket tokens are UUIDv7, so concurrent submissions never share a
//! directory regardless of timestamp granularity. Returned paths are
//! relative to the upload root and servable verbatim under the public
//! `/uploads` prefix.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use formgate_core::{validate_upload, Error, Result, UploadKind};

/// Directory under the upload root holding not-yet-committed files.
const STAGING_DIR: &str = ".staging";

/// A per-submission destination bucket.
///
/// One bucket holds every file of a single submission; its token is minted
/// once per request.
#[derive(Debug, Clone)]
pub struct UploadBucket {
    category: String,
    token: String,
}

impl UploadBucket {
    /// Mint a fresh bucket for a category (e.g. "document-upload").
    pub fn new(category: &str) -> Result<Self> {
        safe_component(category)?;
        Ok(Self {
            category: category.to_string(),
            token: Uuid::now_v7().to_string(),
        })
    }

    /// The bucket token (UUIDv7).
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// A validated upload sitting in the staging area.
#[derive(Debug)]
pub struct StagedUpload {
    staging_path: PathBuf,
    relative_path: String,
    field_name: String,
    size_bytes: usize,
    kind: UploadKind,
}

impl StagedUpload {
    /// Final path relative to the upload root, fixed at staging time.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// The form field this file arrived under.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Size of the staged content in bytes.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Detected upload kind.
    pub fn kind(&self) -> UploadKind {
        self.kind
    }
}

/// Filesystem upload store rooted at the managed upload directory.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create a new upload store with the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The managed upload root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that the store can write, read, and delete files.
    ///
    /// Performs a full round-trip at startup to catch filesystem issues
    /// (permission errors, missing mounts) before accepting traffic.
    pub async fn validate(&self) -> std::result::Result<(), String> {
        let test_dir = self.root.join(STAGING_DIR).join(".health-check");
        let test_file = test_dir.join("test.bin");

        fs::create_dir_all(&test_dir)
            .await
            .map_err(|e| format!("create_dir_all({:?}): {}", test_dir, e))?;

        let data = b"upload-store-health-check";
        fs::write(&test_file, data)
            .await
            .map_err(|e| format!("write({:?}): {}", test_file, e))?;

        let read_data = fs::read(&test_file)
            .await
            .map_err(|e| format!("read({:?}): {}", test_file, e))?;
        if read_data != data {
            return Err("read-back mismatch".to_string());
        }

        fs::remove_file(&test_file)
            .await
            .map_err(|e| format!("remove_file({:?}): {}", test_file, e))?;
        let _ = fs::remove_dir(&test_dir).await;

        Ok(())
    }

    /// Validate and stage an upload.
    ///
    /// Fails with `Error::InvalidFile` before any write when the content is
    /// not an allowed type or exceeds `max_bytes`, and `Error::InvalidPath`
    /// when the field name would produce a path escaping the root.
    pub async fn stage(
        &self,
        bucket: &UploadBucket,
        field_name: &str,
        claimed_mime: &str,
        data: &[u8],
        max_bytes: u64,
    ) -> Result<StagedUpload> {
        let kind = validate_upload(field_name, claimed_mime, data, max_bytes)?;

        // Synthesized filename: field name + timestamp + canonical extension.
        // The original filename is discarded.
        safe_component(field_name)?;
        let filename = format!(
            "{}_{}.{}",
            field_name,
            Utc::now().timestamp_millis(),
            kind.extension()
        );

        let relative_path = normalize_relative(&format!(
            "{}/{}/{}",
            bucket.category, bucket.token, filename
        ))?;

        let staging_path = self
            .root
            .join(STAGING_DIR)
            .join(&bucket.token)
            .join(&filename);

        self.write_atomic(&staging_path, data).await?;

        debug!(
            subsystem = "uploads",
            component = "store",
            op = "stage",
            field = field_name,
            size = data.len(),
            relative_path = %relative_path,
            "Upload staged"
        );

        Ok(StagedUpload {
            staging_path,
            relative_path,
            field_name: field_name.to_string(),
            size_bytes: data.len(),
            kind,
        })
    }

    /// Move a staged upload into its final public location.
    ///
    /// Called only after the database insert succeeds. Returns the stored
    /// root-relative path.
    pub async fn commit(&self, staged: StagedUpload) -> Result<String> {
        let final_path = self.root.join(&staged.relative_path);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::rename(&staged.staging_path, &final_path)
            .await
            .map_err(|e| {
                warn!(
                    subsystem = "uploads",
                    component = "store",
                    op = "commit",
                    from = %staged.staging_path.display(),
                    to = %final_path.display(),
                    error = %e,
                    "Commit rename failed"
                );
                e
            })?;

        // Staging bucket dir is empty once its last file moves out.
        if let Some(parent) = staged.staging_path.parent() {
            let _ = fs::remove_dir(parent).await;
        }

        debug!(
            subsystem = "uploads",
            component = "store",
            op = "commit",
            relative_path = %staged.relative_path,
            "Upload committed"
        );

        Ok(staged.relative_path)
    }

    /// Best-effort removal of staged content on a failure path.
    pub async fn discard(&self, staged: StagedUpload) {
        if let Err(e) = fs::remove_file(&staged.staging_path).await {
            warn!(
                subsystem = "uploads",
                component = "store",
                op = "discard",
                path = %staged.staging_path.display(),
                error = %e,
                "Failed to remove staged upload"
            );
        }
        if let Some(parent) = staged.staging_path.parent() {
            let _ = fs::remove_dir(parent).await;
        }
    }

    /// Discard a batch of staged uploads.
    pub async fn discard_all(&self, staged: Vec<StagedUpload>) {
        for s in staged {
            self.discard(s).await;
        }
    }

    /// Atomic write: temp file + rename, permissions 0644.
    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                warn!(parent = %parent.display(), error = %e, "upload_store: create_dir_all failed");
                e
            })?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, path).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, std::fs::Permissions::from_mode(0o644)).await?;
        }

        Ok(())
    }
}

/// Normalize a root-relative path for storage.
///
/// Strips a leading `./`, then rejects any path that is absolute or
/// contains `..` components (would escape the managed root) with
/// `Error::InvalidPath`. Defensive: current callers construct the path
/// from already-checked components.
pub fn normalize_relative(path: &str) -> Result<String> {
    let trimmed = path.strip_prefix("./").unwrap_or(path);

    if trimmed.is_empty() {
        return Err(Error::InvalidPath("empty path".to_string()));
    }

    for component in Path::new(trimmed).components() {
        match component {
            std::path::Component::Normal(_) => {}
            _ => return Err(Error::InvalidPath(path.to_string())),
        }
    }

    Ok(trimmed.to_string())
}

/// Reject a path segment containing separators, traversal, or nothing.
fn safe_component(s: &str) -> Result<()> {
    if s.is_empty() || s == "." || s == ".." || s.contains('/') || s.contains('\\') {
        return Err(Error::InvalidPath(s.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_core::defaults::{
        CATEGORY_FEEDBACK, MAX_DOCUMENT_FILE_BYTES, MAX_FEEDBACK_ATTACHMENT_BYTES,
    };

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const PDF_HEADER: &[u8] = b"%PDF-1.4 test document";

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_validate_round_trip() {
        let (_dir, store) = store();
        store.validate().await.unwrap();
    }

    #[tokio::test]
    async fn test_stage_writes_under_staging() {
        let (_dir, store) = store();
        let bucket = UploadBucket::new("document-upload").unwrap();
        let staged = store
            .stage(
                &bucket,
                "photo",
                "image/png",
                PNG_HEADER,
                MAX_DOCUMENT_FILE_BYTES,
            )
            .await
            .unwrap();

        assert!(staged.staging_path.exists());
        assert!(staged
            .staging_path
            .starts_with(store.root().join(STAGING_DIR)));
        // Final location does not exist before commit
        assert!(!store.root().join(staged.relative_path()).exists());
    }

    #[tokio::test]
    async fn test_commit_moves_into_bucket() {
        let (_dir, store) = store();
        let bucket = UploadBucket::new("document-upload").unwrap();
        let staged = store
            .stage(
                &bucket,
                "identityDocument",
                "application/pdf",
                PDF_HEADER,
                MAX_DOCUMENT_FILE_BYTES,
            )
            .await
            .unwrap();

        let rel = store.commit(staged).await.unwrap();
        assert!(rel.starts_with(&format!("document-upload/{}/", bucket.token())));
        assert!(rel.ends_with(".pdf"));
        assert!(rel.contains("identityDocument_"));
        assert!(store.root().join(&rel).exists());
    }

    #[tokio::test]
    async fn test_discard_removes_staged_content() {
        let (_dir, store) = store();
        let bucket = UploadBucket::new(CATEGORY_FEEDBACK).unwrap();
        let staged = store
            .stage(
                &bucket,
                "attachment",
                "image/png",
                PNG_HEADER,
                MAX_FEEDBACK_ATTACHMENT_BYTES,
            )
            .await
            .unwrap();

        let path = staged.staging_path.clone();
        store.discard(staged).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_stage_rejects_disallowed_type_before_write() {
        let (_dir, store) = store();
        let bucket = UploadBucket::new("document-upload").unwrap();
        let err = store
            .stage(&bucket, "photo", "image/gif", b"GIF89a\x01\x00", 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
        // Nothing was written anywhere under the root
        assert!(!store.root().join(STAGING_DIR).exists());
    }

    #[tokio::test]
    async fn test_stage_rejects_traversal_field_name() {
        let (_dir, store) = store();
        let bucket = UploadBucket::new("document-upload").unwrap();
        let err = store
            .stage(&bucket, "../escape", "image/png", PNG_HEADER, 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_buckets_never_collide() {
        let a = UploadBucket::new("document-upload").unwrap();
        let b = UploadBucket::new("document-upload").unwrap();
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn test_bucket_rejects_bad_category() {
        assert!(UploadBucket::new("..").is_err());
        assert!(UploadBucket::new("a/b").is_err());
        assert!(UploadBucket::new("").is_err());
    }

    #[test]
    fn test_normalize_strips_dot_prefix() {
        assert_eq!(
            normalize_relative("./document-upload/x/a.pdf").unwrap(),
            "document-upload/x/a.pdf"
        );
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert!(matches!(
            normalize_relative("../outside.pdf"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            normalize_relative("a/../../b.pdf"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            normalize_relative("/etc/passwd"),
            Err(Error::InvalidPath(_))
        ));
    }
}
