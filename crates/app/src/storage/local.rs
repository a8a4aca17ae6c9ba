//! Device-scoped string slots.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use tokio::{fs, sync::Mutex};

use crate::storage::StorageError;

/// A single persisted string, shared by every visitor of this device.
#[automock]
#[async_trait]
pub trait LocalSlot: Send + Sync {
    /// Read the slot; `None` when nothing was ever written.
    async fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the slot contents.
    async fn write(&self, contents: String) -> Result<(), StorageError>;

    /// Forget the slot contents.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Slot backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");

        PathBuf::from(staging)
    }
}

#[async_trait]
impl LocalSlot for FileSlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, contents: String) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        // Readers never observe a half-written file.
        let staging = self.staging_path();
        fs::write(&staging, contents).await?;
        fs::rename(&staging, &self.path).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Slot held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }
}

#[async_trait]
impl LocalSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.lock().await.clone())
    }

    async fn write(&self, contents: String) -> Result<(), StorageError> {
        *self.contents.lock().await = Some(contents);

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.contents.lock().await = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn scratch_slot() -> FileSlot {
        FileSlot::new(
            env::temp_dir()
                .join(format!("vitrina-{}-{}", process::id(), Uuid::now_v7()))
                .join("cart.json"),
        )
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() -> TestResult {
        let slot = scratch_slot();

        assert_eq!(slot.read().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn write_creates_parent_directories() -> TestResult {
        let slot = scratch_slot();

        slot.write("[]".to_string()).await?;

        assert_eq!(slot.read().await?.as_deref(), Some("[]"));

        slot.clear().await?;

        Ok(())
    }

    #[tokio::test]
    async fn write_replaces_previous_contents() -> TestResult {
        let slot = scratch_slot();

        slot.write("first".to_string()).await?;
        slot.write("second".to_string()).await?;

        assert_eq!(slot.read().await?.as_deref(), Some("second"));

        slot.clear().await?;

        Ok(())
    }

    #[tokio::test]
    async fn clear_is_idempotent() -> TestResult {
        let slot = scratch_slot();

        slot.write("x".to_string()).await?;
        slot.clear().await?;
        slot.clear().await?;

        assert_eq!(slot.read().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn memory_slot_round_trips() -> TestResult {
        let slot = MemorySlot::with_contents("seed");

        assert_eq!(slot.read().await?.as_deref(), Some("seed"));

        slot.clear().await?;

        assert_eq!(slot.read().await?, None);

        Ok(())
    }
}
