// Application state tests against an in-memory store and a scripted image service

use async_trait::async_trait;
use outfit_stylist_app::{get_message_from_result, DirectGateway, StylistApp};
use outfit_stylist_core::*;
use outfit_stylist_storageservice::{MemoryBackend, WARDROBE_STORAGE_KEY};
use std::collections::VecDeque;
use std::sync::Mutex;

type Reply = Result<Option<EncodedImage>, ServiceError>;

struct ScriptedService {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Vec<PromptPart>>>,
}

impl ScriptedService {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn calls(&self) -> Vec<Vec<PromptPart>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageService for ScriptedService {
    async fn generate_image(&self, parts: &[PromptPart]) -> Result<Option<EncodedImage>, ServiceError> {
        self.calls.lock().unwrap().push(parts.to_vec());
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

type TestApp = StylistApp<MemoryBackend, DirectGateway<ScriptedService>>;

fn image_count(parts: &[PromptPart]) -> usize {
    parts.iter().filter(|part| part.as_image().is_some()).count()
}

fn png(byte: u8) -> Reply {
    Ok(Some(EncodedImage::png(vec![byte])))
}

fn stocked_app(replies: Vec<Reply>) -> (TestApp, MemoryBackend) {
    let backend = MemoryBackend::new();
    let mut app = StylistApp::new(backend.clone(), DirectGateway::new(ScriptedService::new(replies)));
    app.add_items(
        WardrobeCategory::Tops,
        vec![
            WardrobeItem::new("tee.png", EncodedImage::png(vec![1])),
            WardrobeItem::new("shirt.png", EncodedImage::png(vec![2])),
        ],
    );
    app.add_items(
        WardrobeCategory::Bottoms,
        vec![WardrobeItem::new("jeans.jpg", EncodedImage::jpeg(vec![3]))],
    );
    (app, backend)
}

fn tops_and_bottoms(options: u8) -> OutfitRequest {
    OutfitRequest::new(vec![WardrobeCategory::Tops, WardrobeCategory::Bottoms])
        .with_options(options)
        .with_color_tone("pastel")
        .with_style_preset("Smart Casual")
}

fn titles(app: &TestApp) -> Vec<String> {
    app.outfits().iter().map(|o| o.title.clone()).collect()
}

// ========================================
// Wardrobe
// ========================================

#[test]
fn test_new_restores_stored_wardrobe() {
    let (_, backend) = stocked_app(vec![]);

    let restored = StylistApp::new(backend, DirectGateway::new(ScriptedService::new(vec![])));

    assert_eq!(restored.wardrobe().items(WardrobeCategory::Tops).len(), 2);
    assert_eq!(restored.wardrobe().items(WardrobeCategory::Bottoms)[0].name, "jeans.jpg");
    assert!(restored.outfits().is_empty());
    assert!(restored.last_request().is_none());
}

#[test]
fn test_new_with_corrupt_storage_starts_empty() {
    let backend = MemoryBackend::new();
    backend.insert_raw(WARDROBE_STORAGE_KEY, "{not json");

    let app = StylistApp::new(backend, DirectGateway::new(ScriptedService::new(vec![])));

    assert!(app.wardrobe().is_empty());
    assert_eq!(app.wardrobe().iter().count(), WardrobeCategory::ALL.len());
}

#[test]
fn test_add_items_persists() {
    let (mut app, backend) = stocked_app(vec![]);

    let result = app.add_items(
        WardrobeCategory::Shoes,
        vec![WardrobeItem::new("loafers.png", EncodedImage::png(vec![4]))],
    );

    assert_eq!(result.code, ErrorCode::ItemsAdded);
    assert_eq!(get_message_from_result(&result), "Added 1 item(s) to shoes.");
    let stored = backend.raw(WARDROBE_STORAGE_KEY).unwrap();
    assert!(stored.contains("loafers.png"));
}

#[test]
fn test_add_items_over_quota_keeps_memory_copy() {
    let (mut app, backend) = stocked_app(vec![]);
    backend.set_quota(Some(10));

    let result = app.add_items(
        WardrobeCategory::Bags,
        vec![WardrobeItem::new("tote.png", EncodedImage::png(vec![5]))],
    );

    assert_eq!(result.level, StatusLevel::Warning);
    assert_eq!(result.code, ErrorCode::StorageWriteError);
    assert_eq!(app.wardrobe().items(WardrobeCategory::Bags).len(), 1);
    assert!(!backend.raw(WARDROBE_STORAGE_KEY).unwrap().contains("tote.png"));
}

#[test]
fn test_delete_item_by_position() {
    let (mut app, backend) = stocked_app(vec![]);

    let result = app.delete_item(WardrobeCategory::Tops, 0);

    assert_eq!(result.code, ErrorCode::ItemDeleted);
    let tops = app.wardrobe().items(WardrobeCategory::Tops);
    assert_eq!(tops.len(), 1);
    assert_eq!(tops[0].name, "shirt.png");
    assert!(!backend.raw(WARDROBE_STORAGE_KEY).unwrap().contains("tee.png"));
}

#[test]
fn test_delete_item_out_of_range() {
    let (mut app, backend) = stocked_app(vec![]);
    let before = backend.raw(WARDROBE_STORAGE_KEY);

    let result = app.delete_item(WardrobeCategory::Tops, 5);

    assert_eq!(result.level, StatusLevel::Warning);
    assert_eq!(result.code, ErrorCode::ItemNotFound);
    assert_eq!(app.wardrobe().items(WardrobeCategory::Tops).len(), 2);
    assert_eq!(backend.raw(WARDROBE_STORAGE_KEY), before);
}

// ========================================
// Generation
// ========================================

#[tokio::test]
async fn test_generate_replaces_outfits() {
    let (mut app, _) = stocked_app(vec![png(10), png(11), png(12)]);

    let result = app.generate(tops_and_bottoms(3)).await;

    assert_eq!(result.code, ErrorCode::GenerationOk);
    assert_eq!(titles(&app), vec!["Opsi 1", "Opsi 2", "Opsi 3"]);
    assert_eq!(app.last_request(), Some(&tops_and_bottoms(3)));

    // A new batch starts over from an empty list
    app.gateway().service().push(png(20));
    let result = app.generate(tops_and_bottoms(1)).await;

    assert_eq!(result.code, ErrorCode::GenerationOk);
    assert_eq!(titles(&app), vec!["Opsi 1"]);
    let calls = app.gateway().service().calls();
    assert_eq!(image_count(&calls[3]), 3);
}

#[tokio::test]
async fn test_generate_with_gap() {
    let (mut app, _) = stocked_app(vec![png(10), Ok(None), png(12)]);

    let result = app.generate(tops_and_bottoms(3)).await;

    assert_eq!(result.context.unwrap()["count"], 2);
    assert_eq!(titles(&app), vec!["Opsi 1", "Opsi 3"]);
}

#[tokio::test]
async fn test_generate_nothing_returned() {
    let (mut app, _) = stocked_app(vec![Err(ServiceError::Timeout), Ok(None)]);

    let result = app.generate(tops_and_bottoms(2)).await;

    assert_eq!(result.level, StatusLevel::Info);
    assert_eq!(result.code, ErrorCode::NoNewOutfits);
    assert!(app.outfits().is_empty());
    assert!(app.last_request().is_some());
}

#[tokio::test]
async fn test_generate_rejects_invalid_request() {
    let (mut app, _) = stocked_app(vec![]);

    let single = OutfitRequest::new(vec![WardrobeCategory::Tops]);
    let result = app.generate(single).await;
    assert_eq!(result.code, ErrorCode::ValidationTooFewComponents);

    let empty_category = OutfitRequest::new(vec![WardrobeCategory::Tops, WardrobeCategory::Shoes]);
    let result = app.generate(empty_category).await;
    assert_eq!(result.code, ErrorCode::ValidationEmptyCategory);

    assert!(app.gateway().service().calls().is_empty());
    assert!(app.last_request().is_none());
}

#[tokio::test]
async fn test_generate_more_without_previous_request() {
    let (mut app, _) = stocked_app(vec![]);

    let result = app.generate_more().await;

    assert_eq!(result.level, StatusLevel::Warning);
    assert_eq!(result.code, ErrorCode::NoPreviousRequest);
    assert!(app.gateway().service().calls().is_empty());
}

#[tokio::test]
async fn test_generate_more_appends_and_avoids_existing() {
    let (mut app, _) = stocked_app(vec![png(10), png(11), png(12), png(13)]);
    app.generate(tops_and_bottoms(2)).await;

    let result = app.generate_more().await;

    assert_eq!(result.code, ErrorCode::MoreOutfitsAdded);
    assert_eq!(get_message_from_result(&result), "2 new outfits added!");
    assert_eq!(titles(&app), vec!["Opsi 1", "Opsi 2", "Opsi 3", "Opsi 4"]);

    // 3 wardrobe images plus every outfit shown before the attempt
    let calls = app.gateway().service().calls();
    assert_eq!(image_count(&calls[2]), 5);
    assert_eq!(image_count(&calls[3]), 6);
}

#[tokio::test]
async fn test_generate_more_nothing_new() {
    let (mut app, _) = stocked_app(vec![png(10)]);
    app.generate(tops_and_bottoms(1)).await;

    let result = app.generate_more().await;

    assert_eq!(result.code, ErrorCode::NoNewOutfits);
    assert_eq!(titles(&app), vec!["Opsi 1"]);
}

// ========================================
// Editing
// ========================================

#[tokio::test]
async fn test_edit_is_preview_until_saved() {
    let (mut app, _) = stocked_app(vec![png(10), png(11), png(40)]);
    app.generate(tops_and_bottoms(2)).await;
    let original = app.outfits()[1].clone();

    let replacement = app.wardrobe().items(WardrobeCategory::Tops)[1].clone();
    let edit = EditOutfitRequest::change(WardrobeCategory::Tops, "outer", replacement);
    let preview = app.edit_outfit(1, &edit).await.unwrap();

    assert_eq!(preview.title, "Opsi 2");
    assert_eq!(preview.image.data, vec![40]);
    assert_eq!(app.outfits()[1], original);

    let calls = app.gateway().service().calls();
    assert_eq!(image_count(calls.last().unwrap()), 2);

    let result = app.save_edit(1, preview.clone());
    assert_eq!(result.code, ErrorCode::EditSaved);
    assert_eq!(app.outfits()[1], preview);
    assert_eq!(app.outfits().len(), 2);
}

#[tokio::test]
async fn test_edit_take_out_failure() {
    let (mut app, _) = stocked_app(vec![png(10), Ok(None)]);
    app.generate(tops_and_bottoms(1)).await;

    let edit = EditOutfitRequest::take_out(WardrobeCategory::Tops, "outer");
    let result = app.edit_outfit(0, &edit).await.unwrap_err();

    assert_eq!(result.level, StatusLevel::Error);
    assert_eq!(result.code, ErrorCode::EditFailed);
    let calls = app.gateway().service().calls();
    assert_eq!(image_count(calls.last().unwrap()), 1);
}

#[tokio::test]
async fn test_edit_service_error() {
    let (mut app, _) = stocked_app(vec![
        png(10),
        Err(ServiceError::Rejected {
            status: 429,
            message: "RESOURCE_EXHAUSTED: quota".to_string(),
        }),
    ]);
    app.generate(tops_and_bottoms(1)).await;

    let edit = EditOutfitRequest::take_out(WardrobeCategory::Bottoms, "base");
    let result = app.edit_outfit(0, &edit).await.unwrap_err();

    assert_eq!(result.code, ErrorCode::ServiceError);
}

#[tokio::test]
async fn test_edit_unknown_outfit_or_invalid_edit() {
    let (mut app, _) = stocked_app(vec![png(10)]);
    app.generate(tops_and_bottoms(1)).await;

    let edit = EditOutfitRequest::take_out(WardrobeCategory::Tops, "outer");
    let missing = app.edit_outfit(3, &edit).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::OutfitNotFound);

    let bad_layer = EditOutfitRequest::take_out(WardrobeCategory::Shoes, "outer");
    let invalid = app.edit_outfit(0, &bad_layer).await.unwrap_err();
    assert_eq!(invalid.code, ErrorCode::ValidationUnknownLayer);

    assert_eq!(app.gateway().service().calls().len(), 1);

    let saved = app.save_edit(7, GeneratedOutfit::new(EncodedImage::png(vec![1]), "Opsi 8"));
    assert_eq!(saved.code, ErrorCode::OutfitNotFound);
}
