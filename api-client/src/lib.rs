// API client library for the outfit stylist
//
// Talks to the outfit stylist API server so that browser builds never hold
// the image service credentials.

pub mod errors;
pub mod http_client;

// Re-export commonly used items
pub use errors::ApiError;
pub use http_client::{edit_outfit, generate_outfits};
