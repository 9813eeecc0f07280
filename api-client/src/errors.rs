// API client errors

use outfit_stylist_core::{ErrorCode, ProcessResult};

/// API client error types
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Network communication error
    NetworkError(String),
    /// Server returned an error response
    ServerError(String),
    /// Server processed the request but reported a failure
    ProcessError(ProcessResult),
}

impl ApiError {
    /// Convert from ProcessResult
    pub fn from_process_result(result: ProcessResult) -> Self {
        ApiError::ProcessError(result)
    }

    /// Result to show the user for this error
    pub fn to_process_result(&self) -> ProcessResult {
        match self {
            ApiError::NetworkError(msg) | ApiError::ServerError(msg) => {
                ProcessResult::error(ErrorCode::NetworkError)
                    .with_context(serde_json::json!({ "reason": msg }))
            }
            ApiError::ProcessError(result) => result.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::ServerError(msg) => write!(f, "Server error: {}", msg),
            ApiError::ProcessError(result) => {
                write!(f, "Processing error: {}", result.code.to_message())
            }
        }
    }
}

impl std::error::Error for ApiError {}
