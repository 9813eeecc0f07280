// Gateways between the application state and the generation backend

use async_trait::async_trait;
use outfit_stylist_api_client::{self as api_client, ApiError};
use outfit_stylist_core::{
    edit_outfit, generate_outfits, EditOutfitRequest, ErrorCode, GeneratedOutfit, ImageService,
    OutfitRequest, ProcessResult, Wardrobe,
};

/// Where outfit generation and edits are executed.
///
/// Failures come back as the `ProcessResult` to show the user.
#[async_trait(?Send)]
pub trait OutfitGateway {
    /// Outfits produced by this call only; may be empty
    async fn generate(
        &self,
        request: &OutfitRequest,
        wardrobe: &Wardrobe,
        existing: &[GeneratedOutfit],
    ) -> Result<Vec<GeneratedOutfit>, ProcessResult>;

    async fn edit(
        &self,
        base_outfit: &GeneratedOutfit,
        edit: &EditOutfitRequest,
    ) -> Result<GeneratedOutfit, ProcessResult>;
}

/// Runs the orchestrators in-process against an image service
pub struct DirectGateway<S: ImageService> {
    service: S,
}

impl<S: ImageService> DirectGateway<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

#[async_trait(?Send)]
impl<S: ImageService> OutfitGateway for DirectGateway<S> {
    async fn generate(
        &self,
        request: &OutfitRequest,
        wardrobe: &Wardrobe,
        existing: &[GeneratedOutfit],
    ) -> Result<Vec<GeneratedOutfit>, ProcessResult> {
        Ok(generate_outfits(&self.service, request, wardrobe, existing).await)
    }

    async fn edit(
        &self,
        base_outfit: &GeneratedOutfit,
        edit: &EditOutfitRequest,
    ) -> Result<GeneratedOutfit, ProcessResult> {
        edit_outfit(&self.service, base_outfit, edit)
            .await
            .map_err(|e| e.to_process_result())
    }
}

/// HTTP-level server failures are reported under `server_code`
fn failure_result(error: ApiError, server_code: ErrorCode) -> ProcessResult {
    match error {
        ApiError::ServerError(reason) => {
            ProcessResult::error(server_code).with_context(serde_json::json!({ "reason": reason }))
        }
        other => other.to_process_result(),
    }
}

/// Delegates to the API server; the image service key stays server-side
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiGateway;

#[async_trait(?Send)]
impl OutfitGateway for ApiGateway {
    async fn generate(
        &self,
        request: &OutfitRequest,
        wardrobe: &Wardrobe,
        existing: &[GeneratedOutfit],
    ) -> Result<Vec<GeneratedOutfit>, ProcessResult> {
        api_client::generate_outfits(request, wardrobe, existing)
            .await
            .map(|(outfits, _)| outfits)
            .map_err(|e| {
                tracing::error!(error = %e, "Outfit generation request failed");
                failure_result(e, ErrorCode::GenerationError)
            })
    }

    async fn edit(
        &self,
        base_outfit: &GeneratedOutfit,
        edit: &EditOutfitRequest,
    ) -> Result<GeneratedOutfit, ProcessResult> {
        api_client::edit_outfit(base_outfit, edit)
            .await
            .map(|(outfit, _)| outfit)
            .map_err(|e| {
                tracing::error!(error = %e, "Outfit edit request failed");
                failure_result(e, ErrorCode::ServiceError)
            })
    }
}
