// Message mapping for error codes

use outfit_stylist_core::{ErrorCode, ProcessResult, StatusLevel};

/// Message level for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl From<StatusLevel> for MessageLevel {
    fn from(level: StatusLevel) -> Self {
        match level {
            StatusLevel::Info => MessageLevel::Info,
            StatusLevel::Warning => MessageLevel::Warning,
            StatusLevel::Error => MessageLevel::Error,
        }
    }
}

fn context_value<'a>(result: &'a ProcessResult, key: &str) -> Option<&'a serde_json::Value> {
    result.context.as_ref().and_then(|context| context.get(key))
}

fn context_str<'a>(result: &'a ProcessResult, key: &str) -> Option<&'a str> {
    context_value(result, key).and_then(|value| value.as_str())
}

fn context_u64(result: &ProcessResult, key: &str) -> Option<u64> {
    context_value(result, key).and_then(|value| value.as_u64())
}

/// Get user-friendly message from ProcessResult
pub fn get_message_from_result(result: &ProcessResult) -> String {
    match &result.code {
        ErrorCode::GenerationOk => match context_u64(result, "count") {
            Some(1) => "Your outfit is ready!".to_string(),
            Some(count) => format!("Your {} outfits are ready!", count),
            None => result.code.to_message().to_string(),
        },
        ErrorCode::MoreOutfitsAdded => match context_u64(result, "count") {
            Some(1) => "1 new outfit added!".to_string(),
            Some(count) => format!("{} new outfits added!", count),
            None => result.code.to_message().to_string(),
        },
        ErrorCode::ItemsAdded => {
            if let (Some(count), Some(category)) =
                (context_u64(result, "count"), context_str(result, "category"))
            {
                return format!("Added {} item(s) to {}.", count, category);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ItemDeleted => {
            if let Some(name) = context_str(result, "name") {
                return format!("Removed {} from your wardrobe.", name);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::EditSaved => {
            if let Some(title) = context_str(result, "title") {
                return format!("{} updated.", title);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ValidationEmptyCategory => {
            if let Some(category) = context_str(result, "category") {
                return format!("Please upload at least one item for the {} category.", category);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ValidationDuplicateComponent => {
            if let Some(category) = context_str(result, "category") {
                return format!("{} is selected more than once.", category);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ValidationTooFewComponents => {
            if let Some(required) = context_u64(result, "required") {
                return format!("Please select at least {} wardrobe components.", required);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ValidationOptionCount => {
            if let (Some(min), Some(max)) = (context_u64(result, "min"), context_u64(result, "max")) {
                return format!("Number of options must be between {} and {}.", min, max);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::ValidationUnknownLayer => {
            if let (Some(category), Some(layer)) =
                (context_str(result, "category"), context_str(result, "layer"))
            {
                return format!("{} has no {} layer.", category, layer);
            }
            result.code.to_message().to_string()
        }
        ErrorCode::StorageWriteError => {
            if context_str(result, "reason") == Some("quota") {
                return "Could not save your wardrobe: browser storage is full. Try removing some items."
                    .to_string();
            }
            result.code.to_message().to_string()
        }
        code => code.to_message().to_string(),
    }
}
