//! File storage for avatars and guide verification documents.
//!
//! Objects are written under `<root>/<bucket>/<owner>/<uuid>.<ext>`. Only the
//! avatars bucket is served back statically from `/uploads/avatars`;
//! verification documents are read through an access-checked handler.

use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Avatars,
    VerificationDocs,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Avatars => "avatars",
            Bucket::VerificationDocs => "verification-docs",
        }
    }

    /// Public buckets get a static URL; private ones are only read back via
    /// [`ObjectStore::read`].
    pub fn is_public(&self) -> bool {
        matches!(self, Bucket::Avatars)
    }

    fn accepts(&self, content_type: &str) -> Option<&'static str> {
        let ext = match content_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "application/pdf" => "pdf",
            _ => return None,
        };
        match (self, ext) {
            (Bucket::Avatars, "pdf") => None,
            _ => Some(ext),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload is empty")]
    Empty,

    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("content type `{0}` is not accepted here")]
    UnsupportedType(String),

    #[error("object key `{0}` is not valid")]
    InvalidKey(String),

    #[error("could not access object")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    /// Static URL, set for public buckets only.
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
            max_bytes,
        }
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> PathBuf {
        self.root.join(bucket.as_str())
    }

    pub async fn upload(
        &self,
        bucket: Bucket,
        owner: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredObject, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let content_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let ext = bucket
            .accepts(&content_type)
            .ok_or_else(|| StorageError::UnsupportedType(content_type.clone()))?;

        let key = format!("{owner}/{}.{ext}", Uuid::new_v4());
        let path = self.bucket_dir(bucket).join(&key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        fs::write(&path, bytes).await?;
        tracing::debug!(bucket = bucket.as_str(), %key, size = bytes.len(), "object stored");

        Ok(StoredObject {
            url: bucket.is_public().then(|| self.public_url(bucket, &key)),
            key,
        })
    }

    /// Reads an object back by the key `upload` returned.
    pub async fn read(&self, bucket: Bucket, key: &str) -> Result<Vec<u8>, StorageError> {
        if key
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(fs::read(self.bucket_dir(bucket).join(key)).await?)
    }

    pub fn content_type_of(key: &str) -> &'static str {
        match key.rsplit_once('.').map(|(_, ext)| ext) {
            Some("png") => "image/png",
            Some("jpg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        }
    }

    pub fn public_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/uploads/{}/{}", self.public_base_url, bucket.as_str(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ObjectStore {
        let root = std::env::temp_dir().join(format!("locallens-test-{}", Uuid::new_v4()));
        ObjectStore::new(root, "http://localhost:3000", 16)
    }

    #[tokio::test]
    async fn writes_object_and_builds_public_url() {
        let store = store();
        let owner = Uuid::new_v4();
        let object = store
            .upload(Bucket::Avatars, owner, "image/png", b"\x89PNG")
            .await
            .unwrap();
        assert!(object.key.starts_with(&owner.to_string()));
        assert!(object.key.ends_with(".png"));
        assert_eq!(
            object.url,
            Some(format!("http://localhost:3000/uploads/avatars/{}", object.key))
        );
        let written = fs::read(store.bucket_dir(Bucket::Avatars).join(&object.key))
            .await
            .unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn private_objects_have_no_url_and_read_back_by_key() {
        let store = store();
        let owner = Uuid::new_v4();
        let object = store
            .upload(Bucket::VerificationDocs, owner, "application/pdf", b"%PDF-1.7")
            .await
            .unwrap();
        assert!(object.url.is_none());

        let bytes = store.read(Bucket::VerificationDocs, &object.key).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.7");
        assert_eq!(ObjectStore::content_type_of(&object.key), "application/pdf");

        // The same key does not resolve in the public bucket.
        assert!(matches!(
            store.read(Bucket::Avatars, &object.key).await,
            Err(StorageError::Io(_))
        ));
    }

    #[tokio::test]
    async fn read_rejects_keys_that_leave_the_bucket() {
        let store = store();
        for key in ["../avatars/x.png", "/etc/passwd", "a//b.pdf", "a/./b.pdf"] {
            assert!(
                matches!(
                    store.read(Bucket::VerificationDocs, key).await,
                    Err(StorageError::InvalidKey(_))
                ),
                "{key}"
            );
        }
    }

    #[tokio::test]
    async fn rejects_empty_oversized_and_wrong_type() {
        let store = store();
        let owner = Uuid::new_v4();
        assert!(matches!(
            store.upload(Bucket::Avatars, owner, "image/png", b"").await,
            Err(StorageError::Empty)
        ));
        assert!(matches!(
            store.upload(Bucket::Avatars, owner, "image/png", &[0u8; 17]).await,
            Err(StorageError::TooLarge { limit: 16 })
        ));
        assert!(matches!(
            store.upload(Bucket::Avatars, owner, "application/pdf", b"%PDF").await,
            Err(StorageError::UnsupportedType(_))
        ));
        assert!(
            store
                .upload(Bucket::VerificationDocs, owner, "application/pdf; charset=binary", b"%PDF")
                .await
                .is_ok()
        );
    }
}
