// Generative image client library
//
// This crate provides the HTTP client for the Gemini `generateContent`
// endpoint and plugs it into the core orchestrators as an `ImageService`.

mod client;
mod errors;
mod wire;

pub use client::{GeminiImageClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use errors::ClientError;
