// HTTP client for the outfit stylist API

use crate::errors::ApiError;
use outfit_stylist_core::{
    EditOutfitPayload, EditOutfitRequest, EditOutfitResponse, GenerateOutfitsRequest,
    GenerateOutfitsResponse, GeneratedOutfit, OutfitRequest, ProcessResult, Wardrobe,
};
use serde::{de::DeserializeOwned, Serialize};
use std::env;

const NOT_RESPONDING: &str = "The server is not responding. Please try again later.";

fn get_api_base_url() -> String {
    env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

async fn post_json<Req, Resp>(path: &str, body: &Req) -> Result<Resp, ApiError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    let client = reqwest::Client::new();
    let url = format!("{}{}", get_api_base_url(), path);
    let response = client.post(&url).json(body).send().await.map_err(|e| {
        tracing::warn!(%url, error = %e, "API request failed");
        ApiError::NetworkError(NOT_RESPONDING.to_string())
    })?;

    if !response.status().is_success() {
        return Err(ApiError::ServerError(format!(
            "HTTP error: {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|_| ApiError::NetworkError("Failed to parse the server response.".to_string()))
}

/// Generate outfits via API server
///
/// # Arguments
/// * `request` - Styling request
/// * `wardrobe` - Wardrobe the outfits are composed from
/// * `existing_outfits` - Outfits already shown, which the new ones must differ from
///
/// # Returns
/// Outfits produced by this call (possibly none) and the processing result
pub async fn generate_outfits(
    request: &OutfitRequest,
    wardrobe: &Wardrobe,
    existing_outfits: &[GeneratedOutfit],
) -> Result<(Vec<GeneratedOutfit>, ProcessResult), ApiError> {
    let payload = GenerateOutfitsRequest {
        request: request.clone(),
        wardrobe: wardrobe.clone(),
        existing_outfits: existing_outfits.to_vec(),
    };

    let response: GenerateOutfitsResponse = post_json("/api/v1/outfits/generate", &payload).await?;

    if response.result.is_success() {
        Ok((response.outfits, response.result))
    } else {
        Err(ApiError::from_process_result(response.result))
    }
}

/// Edit one outfit via API server
///
/// # Returns
/// The edited outfit (same title as `base_outfit`) and the processing result
pub async fn edit_outfit(
    base_outfit: &GeneratedOutfit,
    edit: &EditOutfitRequest,
) -> Result<(GeneratedOutfit, ProcessResult), ApiError> {
    let payload = EditOutfitPayload {
        base_outfit: base_outfit.clone(),
        edit: edit.clone(),
    };

    let response: EditOutfitResponse = post_json("/api/v1/outfits/edit", &payload).await?;

    match response.outfit {
        Some(outfit) if response.result.is_success() => Ok((outfit, response.result)),
        _ => Err(ApiError::from_process_result(response.result)),
    }
}
