// Outfit Stylist - Core Library

pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod validation;

pub use models::*;
pub use orchestrator::*;
pub use prompt::*;
pub use validation::*;
