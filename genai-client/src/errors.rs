// Client errors

use outfit_stylist_core::ServiceError;

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("timeout: the image service did not respond")]
    Timeout,

    #[error("image service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ClientError> for ServiceError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Network(e) if e.is_timeout() => ServiceError::Timeout,
            ClientError::Network(e) => ServiceError::Transport(e.to_string()),
            ClientError::Timeout => ServiceError::Timeout,
            ClientError::Api { status, message } => ServiceError::Rejected { status, message },
            ClientError::InvalidResponse(message) => ServiceError::InvalidResponse(message),
        }
    }
}
