// Precondition checks run before any image service call

use crate::models::{
    EditAction, EditOutfitRequest, ErrorCode, OutfitRequest, StatusLevel, Wardrobe,
    WardrobeCategory,
};

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("at least {required} wardrobe components must be selected (got {actual})")]
    TooFewComponents { actual: usize, required: usize },

    #[error("wardrobe component selected more than once: {0}")]
    DuplicateComponent(WardrobeCategory),

    #[error("number of options must be between {min} and {max} (got {actual})")]
    OptionCountOutOfRange { actual: u8, min: u8, max: u8 },

    #[error("no items uploaded for selected category: {0}")]
    EmptyCategory(WardrobeCategory),

    #[error("the change action requires a replacement item")]
    MissingReplacement,

    #[error("the take_out action does not accept a replacement item")]
    UnexpectedReplacement,

    #[error("layer '{layer}' is not available for {category}")]
    UnknownLayer {
        category: WardrobeCategory,
        layer: String,
    },
}

impl ValidationError {
    /// Convert to ErrorCode
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            ValidationError::TooFewComponents { .. } => ErrorCode::ValidationTooFewComponents,
            ValidationError::DuplicateComponent(_) => ErrorCode::ValidationDuplicateComponent,
            ValidationError::OptionCountOutOfRange { .. } => ErrorCode::ValidationOptionCount,
            ValidationError::EmptyCategory(_) => ErrorCode::ValidationEmptyCategory,
            ValidationError::MissingReplacement => ErrorCode::ValidationMissingReplacement,
            ValidationError::UnexpectedReplacement => ErrorCode::ValidationUnexpectedReplacement,
            ValidationError::UnknownLayer { .. } => ErrorCode::ValidationUnknownLayer,
        }
    }

    /// Get status level for this validation error
    pub fn status_level(&self) -> StatusLevel {
        StatusLevel::Warning
    }

    /// Get context for error (e.g., offending category)
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            ValidationError::TooFewComponents { actual, required } => Some(serde_json::json!({
                "actual": actual,
                "required": required
            })),
            ValidationError::DuplicateComponent(category)
            | ValidationError::EmptyCategory(category) => Some(serde_json::json!({
                "category": category.as_str()
            })),
            ValidationError::OptionCountOutOfRange { actual, min, max } => Some(serde_json::json!({
                "actual": actual,
                "min": min,
                "max": max
            })),
            ValidationError::UnknownLayer { category, layer } => Some(serde_json::json!({
                "category": category.as_str(),
                "layer": layer
            })),
            _ => None,
        }
    }

    /// Build the user-facing result envelope
    pub fn to_process_result(&self) -> crate::models::ProcessResult {
        crate::models::ProcessResult {
            level: self.status_level(),
            code: self.to_error_code(),
            context: self.context(),
        }
    }
}

/// Validate a generation request
///
/// # Rules
/// - 1 to 5 options
/// - At least 2 components, no component twice
/// - Every selected component has at least one wardrobe item
pub fn validate_outfit_request(
    request: &OutfitRequest,
    wardrobe: &Wardrobe,
) -> Result<(), ValidationError> {
    if !(OutfitRequest::MIN_OPTIONS..=OutfitRequest::MAX_OPTIONS)
        .contains(&request.number_of_options)
    {
        return Err(ValidationError::OptionCountOutOfRange {
            actual: request.number_of_options,
            min: OutfitRequest::MIN_OPTIONS,
            max: OutfitRequest::MAX_OPTIONS,
        });
    }

    if request.components.len() < OutfitRequest::MIN_COMPONENTS {
        return Err(ValidationError::TooFewComponents {
            actual: request.components.len(),
            required: OutfitRequest::MIN_COMPONENTS,
        });
    }

    for (index, category) in request.components.iter().enumerate() {
        if request.components[..index].contains(category) {
            return Err(ValidationError::DuplicateComponent(*category));
        }
    }

    if let Some(empty) = request
        .components
        .iter()
        .find(|category| wardrobe.items(**category).is_empty())
    {
        return Err(ValidationError::EmptyCategory(*empty));
    }

    Ok(())
}

/// Validate an edit request
///
/// A replacement item is required for `change` and forbidden for `take_out`;
/// the layer must be one the category exposes.
pub fn validate_edit_request(request: &EditOutfitRequest) -> Result<(), ValidationError> {
    match (request.action, request.replacement_item.is_some()) {
        (EditAction::Change, false) => return Err(ValidationError::MissingReplacement),
        (EditAction::TakeOut, true) => return Err(ValidationError::UnexpectedReplacement),
        _ => {}
    }

    if !request.category.has_layer(&request.layer) {
        return Err(ValidationError::UnknownLayer {
            category: request.category,
            layer: request.layer.clone(),
        });
    }

    Ok(())
}
