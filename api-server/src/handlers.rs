// API handlers

use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use outfit_stylist_core::{
    edit_outfit, generate_outfits, EditOutfitPayload, EditOutfitResponse, ErrorCode,
    GenerateOutfitsRequest, GenerateOutfitsResponse, ProcessResult,
};
use serde_json::json;

/// GET /api/v1/health - Health check endpoint
pub async fn health() -> Response {
    let health_status = json!({
        "status": "healthy",
        "service": "outfit-stylist-api",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health_status)).into_response()
}

/// POST /api/v1/outfits/generate - Generate a batch of outfits
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateOutfitsRequest>,
) -> Response {
    if let Err(e) = payload.request.validate(&payload.wardrobe) {
        tracing::warn!("Generation request rejected: {}", e);
        let response = GenerateOutfitsResponse::new(e.to_process_result(), Vec::new());
        return (StatusCode::OK, Json(response)).into_response();
    }

    let outfits = generate_outfits(
        state.image_service.as_ref(),
        &payload.request,
        &payload.wardrobe,
        &payload.existing_outfits,
    )
    .await;

    let result = if outfits.is_empty() {
        ProcessResult::info(ErrorCode::NoNewOutfits)
    } else {
        let code = if payload.existing_outfits.is_empty() {
            ErrorCode::GenerationOk
        } else {
            ErrorCode::MoreOutfitsAdded
        };
        ProcessResult::info(code).with_context(json!({
            "count": outfits.len(),
            "requested": payload.request.number_of_options,
        }))
    };

    tracing::info!(
        requested = payload.request.number_of_options,
        produced = outfits.len(),
        "Generation request completed"
    );

    let response = GenerateOutfitsResponse::new(result, outfits);
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/v1/outfits/edit - Edit one layer of an outfit
pub async fn edit(State(state): State<AppState>, Json(payload): Json<EditOutfitPayload>) -> Response {
    if let Err(e) = payload.edit.validate() {
        tracing::warn!("Edit request rejected: {}", e);
        let response = EditOutfitResponse::failure(e.to_process_result());
        return (StatusCode::OK, Json(response)).into_response();
    }

    let response = match edit_outfit(state.image_service.as_ref(), &payload.base_outfit, &payload.edit).await {
        Ok(outfit) => {
            tracing::info!(title = %outfit.title, "Outfit edit successful");
            EditOutfitResponse::success(outfit)
        }
        Err(e) => EditOutfitResponse::failure(e.to_process_result()),
    };

    (StatusCode::OK, Json(response)).into_response()
}
