// In-memory backend for native builds and tests

use super::StorageBackend;
use outfit_stylist_core::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared in-memory key-value store.
///
/// Clones share the same entries. An optional byte quota mimics the
/// browser's localStorage limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    fail_reads: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value exceeds `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        let backend = Self::new();
        backend.lock().quota_bytes = Some(quota_bytes);
        backend
    }

    /// Make every read fail, as a broken storage would
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_quota(&self, quota_bytes: Option<usize>) {
        self.lock().quota_bytes = quota_bytes;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Raw stored value, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Store a raw value, bypassing the quota
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().entries.insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a poisoned lock only means a test panicked mid-write; the map is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StorageError::ReadFailed("storage unavailable".to_string()));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if let Some(quota) = inner.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().entries.remove(key);
        Ok(())
    }
}
