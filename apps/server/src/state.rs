//! Shared application state

use crate::{config::Config, Error, Result};
use airdesk_records::{RecordStore, StoreSettings};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let store = RecordStore::open(StoreSettings::new(
            config.storage.data_dir.clone(),
            config.storage.autosave,
        ))?;

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        })
    }

    fn lock(store: &Mutex<RecordStore>) -> MutexGuard<'_, RecordStore> {
        // Poisoning is ignored: the cache only changes through completed repository calls.
        store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run one service call against the store on the blocking thread pool.
    ///
    /// The store lock is held for exactly the duration of `op`.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut RecordStore) -> airdesk_records::Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&mut Self::lock(&store)))
            .await
            .map_err(|e| Error::Internal(format!("Store task failed: {e}")))?
            .map_err(Error::from)
    }

    /// Write every collection to disk.
    pub fn flush(&self) -> Result<()> {
        Self::lock(&self.store).save_all()?;
        Ok(())
    }
}
