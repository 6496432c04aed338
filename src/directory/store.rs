//! Directory persistence.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::EmployeeProfile;
use crate::db;

/// Key the directory is stored under.
pub const STORAGE_KEY: &str = "employees";

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn load(&self) -> Result<Vec<EmployeeProfile>>;
    async fn save(&self, profiles: &[EmployeeProfile]) -> Result<()>;
}

/// Stores the whole directory as one JSON array in the SQLite key-value
/// table.
pub struct SqliteDirectoryStore {
    db_path: PathBuf,
}

impl SqliteDirectoryStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::global::db_file()?))
    }
}

#[async_trait]
impl DirectoryStore for SqliteDirectoryStore {
    async fn load(&self) -> Result<Vec<EmployeeProfile>> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<EmployeeProfile>> {
            let conn = db::open_at(&db_path)?;
            match db::get_value(&conn, STORAGE_KEY)? {
                Some(stored) => serde_json::from_str(&stored.value)
                    .context("Failed to parse stored employee directory"),
                None => Ok(Vec::new()),
            }
        })
        .await
        .context("Directory load task failed")?
    }

    async fn save(&self, profiles: &[EmployeeProfile]) -> Result<()> {
        let payload = serde_json::to_string(profiles).context("Failed to serialize employees")?;
        let db_path = self.db_path.clone();
        let count = profiles.len();

        tokio::task::spawn_blocking(move || {
            let conn = db::open_at(&db_path)?;
            db::set_value(&conn, STORAGE_KEY, &payload)
        })
        .await
        .context("Directory save task failed")??;

        debug!("Saved {} employees", count);
        Ok(())
    }
}

/// In-process store, used by tests and when no data directory exists.
#[derive(Default)]
pub struct MemoryDirectoryStore {
    profiles: Mutex<Vec<EmployeeProfile>>,
}

impl MemoryDirectoryStore {
    pub fn new(profiles: Vec<EmployeeProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn load(&self) -> Result<Vec<EmployeeProfile>> {
        Ok(self.profiles.lock().await.clone())
    }

    async fn save(&self, profiles: &[EmployeeProfile]) -> Result<()> {
        *self.profiles.lock().await = profiles.to_vec();
        Ok(())
    }
}

/// Loads the directory, logging a failed read instead of raising it.
/// `None` means the store could not be read, not that it is empty.
pub async fn load_or_warn(store: &dyn DirectoryStore) -> Option<Vec<EmployeeProfile>> {
    match store.load().await {
        Ok(profiles) => {
            info!("Loaded {} employees from directory", profiles.len());
            Some(profiles)
        }
        Err(err) => {
            warn!(
                "Failed to load employee directory ({:#}); continuing with an empty directory",
                err
            );
            None
        }
    }
}

/// Saves without making the caller wait; failures are only logged.
pub fn save_in_background(
    store: Arc<dyn DirectoryStore>,
    profiles: Vec<EmployeeProfile>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = store.save(&profiles).await {
            warn!("Failed to save employee directory: {:#}", err);
        }
    })
}
