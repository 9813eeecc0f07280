// Storage service library for the outfit stylist
//
// This crate persists the wardrobe through a pluggable key-value backend

use outfit_stylist_core::{ErrorCode, ProcessResult, StorageError, Wardrobe};

pub mod local;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageBackend;
pub use memory::MemoryBackend;

/// Single key the wardrobe is stored under
pub const WARDROBE_STORAGE_KEY: &str = "ai-outfit-stylist-wardrobe";

/// String key-value store
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Serialize a wardrobe to its persisted JSON form
pub fn serialize_wardrobe(wardrobe: &Wardrobe) -> Result<String, StorageError> {
    serde_json::to_string(wardrobe).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Deserialize a persisted wardrobe.
///
/// Corrupt input yields the empty wardrobe; missing categories are filled in.
pub fn deserialize_wardrobe(serialized: &str) -> Wardrobe {
    match serde_json::from_str::<Wardrobe>(serialized) {
        Ok(wardrobe) => wardrobe,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse stored wardrobe, starting empty");
            Wardrobe::new()
        }
    }
}

/// Wardrobe persistence over a storage backend
pub struct WardrobeStorage<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> WardrobeStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the stored wardrobe. Read failures and corrupt data fall back
    /// to the empty wardrobe.
    pub fn load(&self) -> Wardrobe {
        match self.backend.read(WARDROBE_STORAGE_KEY) {
            Ok(Some(serialized)) => deserialize_wardrobe(&serialized),
            Ok(None) => Wardrobe::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored wardrobe, starting empty");
                Wardrobe::new()
            }
        }
    }

    pub fn save(&self, wardrobe: &Wardrobe) -> Result<(), StorageError> {
        let serialized = serialize_wardrobe(wardrobe)?;
        self.backend.write(WARDROBE_STORAGE_KEY, &serialized)?;
        tracing::debug!(
            items = wardrobe.total_items(),
            bytes = serialized.len(),
            "Wardrobe saved"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(WARDROBE_STORAGE_KEY)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Convert StorageError to ProcessResult
pub fn storage_error_to_result(error: &StorageError) -> ProcessResult {
    let context = match error {
        StorageError::QuotaExceeded => serde_json::json!({ "reason": "quota" }),
        other => serde_json::json!({ "reason": other.to_string() }),
    };

    ProcessResult::warning(ErrorCode::StorageWriteError).with_context(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfit_stylist_core::{EncodedImage, WardrobeCategory, WardrobeItem};

    fn sample_wardrobe() -> Wardrobe {
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_items(
            WardrobeCategory::Dresses,
            [WardrobeItem::new("maxi.jpg", EncodedImage::jpeg(vec![9, 8, 7]))],
        );
        wardrobe.add_items(
            WardrobeCategory::Tops,
            [
                WardrobeItem::new("tee.png", EncodedImage::png(vec![1])),
                WardrobeItem::new("shirt.png", EncodedImage::png(vec![2])),
            ],
        );
        wardrobe
    }

    #[test]
    fn test_round_trip() {
        let wardrobe = sample_wardrobe();
        let serialized = serialize_wardrobe(&wardrobe).unwrap();
        assert_eq!(deserialize_wardrobe(&serialized), wardrobe);
    }

    #[test]
    fn test_round_trip_empty() {
        let serialized = serialize_wardrobe(&Wardrobe::new()).unwrap();
        assert_eq!(deserialize_wardrobe(&serialized), Wardrobe::new());
    }

    #[test]
    fn test_corrupt_input_is_empty_wardrobe() {
        for corrupt in [
            "",
            "not json",
            "[]",
            r#"{"tops": 5}"#,
            r#"{"tops":[{"name":"x","image":"no-separator"}]}"#,
        ] {
            let wardrobe = deserialize_wardrobe(corrupt);
            assert_eq!(wardrobe, Wardrobe::new(), "input: {}", corrupt);
            assert_eq!(wardrobe.iter().count(), 7);
        }
    }

    #[test]
    fn test_save_and_load() {
        let storage = WardrobeStorage::new(MemoryBackend::new());
        let wardrobe = sample_wardrobe();

        storage.save(&wardrobe).unwrap();

        assert!(storage.backend().contains(WARDROBE_STORAGE_KEY));
        assert_eq!(storage.load(), wardrobe);
    }

    #[test]
    fn test_save_and_load_keeps_zero_byte_item() {
        let storage = WardrobeStorage::new(MemoryBackend::new());
        let mut wardrobe = Wardrobe::new();
        wardrobe.add_items(
            WardrobeCategory::Tops,
            [WardrobeItem::new("tee.png", EncodedImage::png(vec![1, 2]))],
        );
        wardrobe.add_items(
            WardrobeCategory::Bottoms,
            [WardrobeItem::new("blank.png", EncodedImage::png(vec![]))],
        );

        storage.save(&wardrobe).unwrap();
        let loaded = storage.load();

        assert_eq!(loaded, wardrobe);
        assert_eq!(loaded.total_items(), 2);
        assert!(loaded.items(WardrobeCategory::Bottoms)[0].image.data.is_empty());
    }

    #[test]
    fn test_load_without_data() {
        let storage = WardrobeStorage::new(MemoryBackend::new());
        assert_eq!(storage.load(), Wardrobe::new());
    }

    #[test]
    fn test_load_read_failure_falls_back() {
        let backend = MemoryBackend::new();
        backend.fail_reads(true);
        let storage = WardrobeStorage::new(backend);
        assert_eq!(storage.load(), Wardrobe::new());
    }

    #[test]
    fn test_save_over_quota() {
        let storage = WardrobeStorage::new(MemoryBackend::with_quota(16));
        let err = storage.save(&sample_wardrobe()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));

        let result = storage_error_to_result(&err);
        assert_eq!(result.code, ErrorCode::StorageWriteError);
        assert!(!result.is_success());
    }

    #[test]
    fn test_clear() {
        let storage = WardrobeStorage::new(MemoryBackend::new());
        storage.save(&sample_wardrobe()).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load(), Wardrobe::new());
    }
}
