//! Collection file storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use registrar_core::config::storage::StorageConfig;
use registrar_core::error::{AppError, ErrorKind};
use registrar_core::result::AppResult;
use registrar_core::types::RecordId;

/// File-backed storage for named record collections.
///
/// Each collection is a single pretty-printed JSON array in
/// `<data_dir>/<collection>.json`, with its id sequence in a
/// `<collection>.seq` sidecar. Every save replaces the whole document via a
/// temp file and an atomic rename, so readers always observe a complete
/// document and never a partial write.
#[derive(Debug)]
pub struct CollectionStore {
    /// Directory holding the collection documents.
    root: PathBuf,
    /// Per-collection writer locks, created on first use.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CollectionStore {
    /// Open a store rooted at the configured data directory, creating the
    /// directory if needed.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.data_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            locks: DashMap::new(),
        })
    }

    /// The writer lock for a collection.
    ///
    /// Every read-modify-write cycle must hold this lock from load to save;
    /// plain reads do not take it, atomic saves keep them consistent.
    pub fn writer_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        self.locks.entry(collection.to_string()).or_default().clone()
    }

    /// Load all records of a collection.
    ///
    /// A missing document counts as an empty collection and is created on
    /// the spot, so a fresh data directory needs no seeding step.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        let path = self.collection_path(collection);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.initialize(collection, &path).await?;
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read collection '{collection}'"),
                    e,
                ));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Collection '{collection}' is corrupt"),
                e,
            )
        })
    }

    /// Replace a collection's document with the given records.
    pub async fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to encode collection '{collection}'"),
                e,
            )
        })?;

        let path = self.collection_path(collection);
        self.write_atomic(&path, &bytes).await?;

        debug!(collection, records = records.len(), "Saved collection");
        Ok(())
    }

    /// Draw the next identifier from a collection's sequence.
    ///
    /// The advanced sequence is persisted before the id is handed out, so a
    /// crash after this call can skip an id but never reissue one. Ids are
    /// never reused, including after deletions. Callers must hold the
    /// collection's writer lock.
    pub async fn next_id(&self, collection: &str) -> AppResult<RecordId> {
        let path = self.sequence_path(collection);
        let last: RecordId = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Sequence for collection '{collection}' is corrupt"),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read sequence for collection '{collection}'"),
                    e,
                ));
            }
        };

        let next = last + 1;
        self.write_atomic(&path, next.to_string().as_bytes())
            .await?;
        Ok(next)
    }

    /// Absolute path of a collection's document.
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    /// Absolute path of a collection's id sequence sidecar.
    fn sequence_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.seq"))
    }

    /// Create an empty collection document, unless someone else already has.
    ///
    /// `create_new` keeps initialization from ever overwriting a document a
    /// concurrent writer just saved.
    async fn initialize(&self, collection: &str, path: &Path) -> AppResult<()> {
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(mut file) => {
                file.write_all(b"[]").await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to initialize collection '{collection}'"),
                        e,
                    )
                })?;
                debug!(collection, "Initialized empty collection");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to initialize collection '{collection}'"),
                e,
            )),
        }
    }

    /// Write bytes to a temp file, then rename it over the target.
    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, bytes).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}
