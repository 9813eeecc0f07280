// Application state for the outfit stylist frontend
//
// Holds the wardrobe, the generated outfits and the last request, and
// routes generation and edits through an outfit gateway.

pub mod gateway;
pub mod messages;
pub mod state;

// Re-export commonly used items
pub use gateway::{ApiGateway, DirectGateway, OutfitGateway};
pub use messages::{get_message_from_result, MessageLevel};
pub use state::StylistApp;
