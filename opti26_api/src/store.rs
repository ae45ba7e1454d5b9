use std::{
    fmt::Display,
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Result store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record on line {line} of the result store: {source}")]
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to encode result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A persisted optimizer result.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub id: Uuid,
    pub original_filename: String,
    pub created_at: Timestamp,
    pub result_data: serde_json::Value,
}

impl OptimizationResult {
    pub fn new(original_filename: impl Into<String>, result_data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_filename: original_filename.into(),
            created_at: Timestamp::now(),
            result_data,
        }
    }
}

impl Display for OptimizationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Result for {} ({})",
            self.original_filename, self.created_at
        )
    }
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert(&self, result: OptimizationResult) -> Result<(), StoreError>;

    /// Every stored result, oldest first.
    async fn list(&self) -> Result<Vec<OptimizationResult>, StoreError>;
}

/// Append-only JSON lines file, one [`OptimizationResult`] per line.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, result: &OptimizationResult) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');

        let _guard = self.lock.lock();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;

        debug!(id = %result.id, path = %self.path.display(), "Stored result");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<OptimizationResult>, StoreError> {
        let _guard = self.lock.lock();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut results = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let result = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                line: index + 1,
                source,
            })?;
            results.push(result);
        }

        Ok(results)
    }
}

#[async_trait]
impl ResultStore for JsonFileStore {
    async fn insert(&self, result: OptimizationResult) -> Result<(), StoreError> {
        self.append(&result)
    }

    async fn list(&self) -> Result<Vec<OptimizationResult>, StoreError> {
        self.read_all()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    results: RwLock<Vec<OptimizationResult>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn insert(&self, result: OptimizationResult) -> Result<(), StoreError> {
        self.results.write().push(result);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<OptimizationResult>, StoreError> {
        Ok(self.results.read().clone())
    }
}
