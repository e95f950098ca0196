//! Media store client
//!
//! Narrow blob-storage contract for style reference images and generated
//! outputs. The shipped backend is a directory on the local filesystem;
//! public URLs are built from a configured base so the serving layer can
//! live anywhere.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Blob storage as the gateway sees it.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Fetch a blob; `None` when nothing is stored at `path`.
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, MediaError>;

    /// Write a blob, creating intermediate directories as needed.
    async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), MediaError>;

    /// Public URL clients can fetch `path` from.
    fn public_url(&self, path: &str) -> String;
}

/// Filesystem-backed media store rooted at a configured directory.
pub struct FsMediaStore {
    root: PathBuf,
    public_base: String,
}

impl FsMediaStore {
    pub fn new(root: PathBuf, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self { root, public_base }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn io_error(path: &str, source: io::Error) -> MediaError {
        MediaError::Io {
            path: path.to_string(),
            source,
        }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, MediaError> {
        match tokio::fs::read(self.resolve(path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(path, err)),
        }
    }

    async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| Self::io_error(path, err))?;
        }
        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(|err| Self::io_error(path, err))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path)
    }
}
