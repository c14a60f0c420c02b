use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

use exam_core::model::QuizHistory;

use crate::repository::{
    encode_within_quota, HistoryRepository, QuotaCheck, SaveOutcome, StorageError,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonStoreInitError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// File-backed history store: one JSON document at one path.
///
/// This is the durable analogue of a browser's single localStorage key. The
/// whole document is rewritten on every save (it is small by construction:
/// quota-capped, with history trimming under pressure), and writes go through
/// a temp file plus rename so a crash never leaves a half-written document.
pub struct JsonHistoryStore {
    path: PathBuf,
    max_bytes: usize,
    guard: Mutex<()>,
}

impl JsonHistoryStore {
    /// Default storage quota, mirroring the common browser localStorage cap.
    pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

    /// Opens a store at the given path, creating parent directories.
    ///
    /// The file itself is created lazily on first save; a missing file loads
    /// as an empty history.
    ///
    /// # Errors
    ///
    /// Returns `JsonStoreInitError` if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonStoreInitError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            max_bytes: Self::DEFAULT_QUOTA_BYTES,
            guard: Mutex::new(()),
        })
    }

    /// Override the storage quota, mainly to exercise trimming in tests.
    #[must_use]
    pub fn with_quota(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_document(&self) -> Result<QuizHistory, StorageError> {
        if !self.path.exists() {
            return Ok(QuizHistory::default());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn write_payload(&self, payload: &str) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryStore {
    async fn load(&self) -> Result<QuizHistory, StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        self.read_document()
    }

    async fn save(&self, history: &QuizHistory) -> Result<SaveOutcome, StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        match encode_within_quota(history, Some(self.max_bytes))? {
            QuotaCheck::Fits { payload } => {
                self.write_payload(&payload)?;
                Ok(SaveOutcome::written())
            }
            QuotaCheck::Trimmed { payload, .. } => {
                self.write_payload(&payload)?;
                Ok(SaveOutcome::written_trimmed())
            }
            QuotaCheck::Rejected => Ok(SaveOutcome::rejected()),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
