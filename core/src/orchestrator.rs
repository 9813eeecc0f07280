// Outfit generation and edit orchestration over an external image service

use crate::models::{
    EditOutfitRequest, EncodedImage, ErrorCode, GeneratedOutfit, OutfitRequest, ProcessResult,
    PromptPart, Wardrobe,
};
use crate::prompt::{build_edit_prompt, build_generation_prompt};
use async_trait::async_trait;

/// Multimodal image generation endpoint.
///
/// One call per attempt; returns the first image of the response, or `None`
/// when the model answered without one.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate_image(&self, parts: &[PromptPart]) -> Result<Option<EncodedImage>, ServiceError>;
}

/// Failure of a single image service call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("image service unreachable: {0}")]
    Transport(String),

    #[error("image service timed out")]
    Timeout,

    #[error("image service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid image service response: {0}")]
    InvalidResponse(String),
}

/// Edit failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("image editing failed to return an image")]
    EditFailed,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl EditError {
    /// ERROR result reported for this failure
    pub fn to_process_result(&self) -> ProcessResult {
        match self {
            EditError::EditFailed => ProcessResult::error(ErrorCode::EditFailed),
            EditError::Service(e) => ProcessResult::error(ErrorCode::ServiceError)
                .with_context(serde_json::json!({ "reason": e.to_string() })),
        }
    }
}

/// Generate up to `request.number_of_options` outfits.
///
/// Attempts run strictly one after another: attempt `i + 1` is built only
/// after attempt `i` resolved, because every attempt lists all earlier
/// outfits (`existing` plus this batch) as images not to repeat. A failed or
/// empty attempt is logged and skipped. Titles use the attempt ordinal, so a
/// skipped attempt leaves a gap in the numbering.
///
/// Returns only the outfits produced by this call.
pub async fn generate_outfits<S>(
    service: &S,
    request: &OutfitRequest,
    wardrobe: &Wardrobe,
    existing: &[GeneratedOutfit],
) -> Vec<GeneratedOutfit>
where
    S: ImageService + ?Sized,
{
    let start_index = existing.len();
    let attempts = usize::from(request.number_of_options);

    tracing::info!(
        attempts,
        existing = start_index,
        style_preset = %request.style_preset,
        "Generating outfits"
    );

    let mut produced: Vec<GeneratedOutfit> = Vec::with_capacity(attempts);
    for attempt in 0..attempts {
        let parts = {
            let prior: Vec<&GeneratedOutfit> = existing.iter().chain(produced.iter()).collect();
            build_generation_prompt(request, wardrobe, &prior, attempt)
        };

        match service.generate_image(&parts).await {
            Ok(Some(image)) => {
                let title = GeneratedOutfit::option_title(start_index + attempt + 1);
                tracing::debug!(attempt, %title, bytes = image.data.len(), "Outfit generated");
                produced.push(GeneratedOutfit::new(image, title));
            }
            Ok(None) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    "Image generation did not return an image for one of the options"
                );
            }
            Err(e) => {
                tracing::error!(attempt = attempt + 1, error = %e, "Error generating outfit option");
            }
        }
    }

    tracing::info!(
        requested = attempts,
        produced = produced.len(),
        "Outfit generation finished"
    );

    produced
}

/// Apply a single-layer edit to `base_outfit` with one service call.
///
/// The result keeps the base outfit's title.
pub async fn edit_outfit<S>(
    service: &S,
    base_outfit: &GeneratedOutfit,
    edit: &EditOutfitRequest,
) -> Result<GeneratedOutfit, EditError>
where
    S: ImageService + ?Sized,
{
    tracing::info!(
        action = ?edit.action,
        target = %edit.target_description(),
        title = %base_outfit.title,
        "Editing outfit"
    );

    let parts = build_edit_prompt(base_outfit, edit);

    match service.generate_image(&parts).await {
        Ok(Some(image)) => Ok(GeneratedOutfit::new(image, base_outfit.title.clone())),
        Ok(None) => {
            tracing::warn!(title = %base_outfit.title, "Image editing failed to return an image");
            Err(EditError::EditFailed)
        }
        Err(e) => {
            tracing::error!(title = %base_outfit.title, error = %e, "Outfit edit failed");
            Err(EditError::Service(e))
        }
    }
}
