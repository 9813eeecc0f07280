// LocalStorage backend implementation
//
// Only available in the browser; native builds use `MemoryBackend`.

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use crate::StorageBackend;
    use gloo_storage::{LocalStorage, Storage};
    use outfit_stylist_core::StorageError;

    /// LocalStorage backend for browser-based storage
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorageBackend;

    impl LocalStorageBackend {
        pub fn new() -> Self {
            Self
        }
    }

    impl StorageBackend for LocalStorageBackend {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            LocalStorage::raw()
                .get_item(key)
                .map_err(|e| StorageError::ReadFailed(format!("{:?}", e)))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            // setItem only throws when the origin's quota is exhausted
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|_| StorageError::QuotaExceeded)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            LocalStorage::raw()
                .remove_item(key)
                .map_err(|e| StorageError::WriteFailed(format!("{:?}", e)))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_impl::LocalStorageBackend;
