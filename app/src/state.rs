// Stylist application state

use crate::gateway::OutfitGateway;
use outfit_stylist_core::{
    EditOutfitRequest, ErrorCode, GeneratedOutfit, OutfitRequest, ProcessResult, Wardrobe,
    WardrobeCategory, WardrobeItem,
};
use outfit_stylist_storageservice::{storage_error_to_result, StorageBackend, WardrobeStorage};
use serde_json::json;

/// Wardrobe, generated outfits and the last generation request.
///
/// The wardrobe is persisted after every change; outfits live in memory only.
pub struct StylistApp<B: StorageBackend, G: OutfitGateway> {
    wardrobe: Wardrobe,
    outfits: Vec<GeneratedOutfit>,
    last_request: Option<OutfitRequest>,
    storage: WardrobeStorage<B>,
    gateway: G,
}

impl<B: StorageBackend, G: OutfitGateway> StylistApp<B, G> {
    /// Restore the stored wardrobe (empty when nothing usable is stored)
    pub fn new(backend: B, gateway: G) -> Self {
        let storage = WardrobeStorage::new(backend);
        let wardrobe = storage.load();
        tracing::info!(items = wardrobe.total_items(), "Wardrobe restored");

        Self {
            wardrobe,
            outfits: Vec::new(),
            last_request: None,
            storage,
            gateway,
        }
    }

    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    pub fn outfits(&self) -> &[GeneratedOutfit] {
        &self.outfits
    }

    pub fn last_request(&self) -> Option<&OutfitRequest> {
        self.last_request.as_ref()
    }

    pub fn storage(&self) -> &WardrobeStorage<B> {
        &self.storage
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Append items to a category and persist
    pub fn add_items(&mut self, category: WardrobeCategory, items: Vec<WardrobeItem>) -> ProcessResult {
        let count = items.len();
        self.wardrobe.add_items(category, items);

        if let Err(result) = self.persist() {
            return result;
        }

        ProcessResult::info(ErrorCode::ItemsAdded).with_context(json!({
            "count": count,
            "category": category.as_str(),
        }))
    }

    /// Remove the item at `index` of a category and persist
    pub fn delete_item(&mut self, category: WardrobeCategory, index: usize) -> ProcessResult {
        let Some(removed) = self.wardrobe.remove_item(category, index) else {
            tracing::warn!(%category, index, "Delete requested for missing wardrobe item");
            return ProcessResult::warning(ErrorCode::ItemNotFound).with_context(json!({
                "category": category.as_str(),
                "index": index,
            }));
        };

        if let Err(result) = self.persist() {
            return result;
        }

        ProcessResult::info(ErrorCode::ItemDeleted).with_context(json!({
            "category": category.as_str(),
            "name": removed.name,
        }))
    }

    /// Start a fresh batch. Replaces the current outfits.
    pub async fn generate(&mut self, request: OutfitRequest) -> ProcessResult {
        if let Err(e) = request.validate(&self.wardrobe) {
            tracing::warn!("Generation request rejected: {}", e);
            return e.to_process_result();
        }

        self.outfits.clear();
        self.last_request = Some(request.clone());

        match self.gateway.generate(&request, &self.wardrobe, &[]).await {
            Ok(outfits) if outfits.is_empty() => ProcessResult::info(ErrorCode::NoNewOutfits),
            Ok(outfits) => {
                let count = outfits.len();
                self.outfits = outfits;
                ProcessResult::info(ErrorCode::GenerationOk).with_context(json!({
                    "count": count,
                    "requested": request.number_of_options,
                }))
            }
            Err(result) => result,
        }
    }

    /// Run the last request again, avoiding every outfit already shown
    pub async fn generate_more(&mut self) -> ProcessResult {
        let Some(request) = self.last_request.clone() else {
            return ProcessResult::warning(ErrorCode::NoPreviousRequest);
        };

        // The wardrobe may have changed since the first batch
        if let Err(e) = request.validate(&self.wardrobe) {
            tracing::warn!("Generate more rejected: {}", e);
            return e.to_process_result();
        }

        match self.gateway.generate(&request, &self.wardrobe, &self.outfits).await {
            Ok(outfits) if outfits.is_empty() => ProcessResult::info(ErrorCode::NoNewOutfits),
            Ok(outfits) => {
                let count = outfits.len();
                self.outfits.extend(outfits);
                ProcessResult::info(ErrorCode::MoreOutfitsAdded).with_context(json!({
                    "count": count,
                    "total": self.outfits.len(),
                }))
            }
            Err(result) => result,
        }
    }

    /// Preview an edit of the outfit at `index`. The outfit list is left
    /// untouched until `save_edit`.
    pub async fn edit_outfit(
        &self,
        index: usize,
        edit: &EditOutfitRequest,
    ) -> Result<GeneratedOutfit, ProcessResult> {
        let base = self.outfit_at(index)?;

        if let Err(e) = edit.validate() {
            tracing::warn!("Edit request rejected: {}", e);
            return Err(e.to_process_result());
        }

        self.gateway.edit(base, edit).await
    }

    /// Replace the outfit at `index` with an accepted edit preview
    pub fn save_edit(&mut self, index: usize, outfit: GeneratedOutfit) -> ProcessResult {
        match self.outfits.get_mut(index) {
            Some(slot) => {
                *slot = outfit;
                ProcessResult::info(ErrorCode::EditSaved).with_context(json!({ "title": slot.title }))
            }
            None => outfit_not_found(index),
        }
    }

    fn outfit_at(&self, index: usize) -> Result<&GeneratedOutfit, ProcessResult> {
        self.outfits.get(index).ok_or_else(|| outfit_not_found(index))
    }

    /// Write the wardrobe; the in-memory copy is kept either way
    fn persist(&self) -> Result<(), ProcessResult> {
        self.storage.save(&self.wardrobe).map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist wardrobe");
            storage_error_to_result(&e)
        })
    }
}

fn outfit_not_found(index: usize) -> ProcessResult {
    ProcessResult::warning(ErrorCode::OutfitNotFound).with_context(json!({ "index": index }))
}
