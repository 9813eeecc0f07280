// Core data models for the outfit stylist

use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Declared MIME type of an encoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMimeType {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Png => "image/png",
            ImageMimeType::Jpeg => "image/jpeg",
        }
    }

    /// Parse a declared MIME type. Anything other than PNG is treated as JPEG.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().eq_ignore_ascii_case("image/png") {
            ImageMimeType::Png
        } else {
            ImageMimeType::Jpeg
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw image bytes plus their MIME type.
///
/// The textual form (JSON, persisted wardrobe, API payloads) is a data URL:
/// `data:<mime>;base64,<payload>`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    pub mime_type: ImageMimeType,
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: ImageMimeType, data: Vec<u8>) -> Self {
        Self { mime_type, data }
    }

    pub fn png(data: Vec<u8>) -> Self {
        Self::new(ImageMimeType::Png, data)
    }

    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new(ImageMimeType::Jpeg, data)
    }

    /// Decode a bare base64 payload with an explicitly declared MIME type
    pub fn from_base64(mime_type: ImageMimeType, payload: &str) -> Result<Self, ImageError> {
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

        Ok(Self { mime_type, data })
    }

    /// Parse a data URL.
    ///
    /// The MIME type is inferred from the prefix: PNG iff the string starts
    /// with `data:image/png`, JPEG otherwise.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let (_, payload) = url.split_once(',').ok_or(ImageError::MissingSeparator)?;

        let mime_type = if url.starts_with("data:image/png") {
            ImageMimeType::Png
        } else {
            ImageMimeType::Jpeg
        };

        Self::from_base64(mime_type, payload)
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Convert to Data URL format (for img src attribute)
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type.as_str(), self.to_base64())
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_url(&value)
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.to_data_url()
    }
}

/// Image-related errors
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image data URL has no ',' separator")]
    MissingSeparator,

    #[error("invalid base64 image payload: {0}")]
    InvalidBase64(String),
}

/// Wardrobe category (closed set, declaration order is display order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardrobeCategory {
    Tops,
    Bottoms,
    Dresses,
    Hijabs,
    Shoes,
    Bags,
    Accessories,
}

impl WardrobeCategory {
    pub const ALL: [WardrobeCategory; 7] = [
        WardrobeCategory::Tops,
        WardrobeCategory::Bottoms,
        WardrobeCategory::Dresses,
        WardrobeCategory::Hijabs,
        WardrobeCategory::Shoes,
        WardrobeCategory::Bags,
        WardrobeCategory::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WardrobeCategory::Tops => "tops",
            WardrobeCategory::Bottoms => "bottoms",
            WardrobeCategory::Dresses => "dresses",
            WardrobeCategory::Hijabs => "hijabs",
            WardrobeCategory::Shoes => "shoes",
            WardrobeCategory::Bags => "bags",
            WardrobeCategory::Accessories => "accessories",
        }
    }

    /// Layers addressable by an edit. Tops and hijabs can be worn in two
    /// layers; everything else is a single base layer.
    pub fn layers(&self) -> &'static [&'static str] {
        match self {
            WardrobeCategory::Tops | WardrobeCategory::Hijabs => &["inner", "outer"],
            _ => &["base"],
        }
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layers().contains(&layer)
    }
}

impl fmt::Display for WardrobeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WardrobeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WardrobeCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown wardrobe category: {0}")]
pub struct UnknownCategory(pub String);

/// One uploaded clothing photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Original file name
    pub name: String,

    pub image: EncodedImage,
}

impl WardrobeItem {
    pub fn new(name: impl Into<String>, image: EncodedImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// Categorized wardrobe. Every category is always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<WardrobeCategory, Vec<WardrobeItem>>")]
pub struct Wardrobe {
    items: BTreeMap<WardrobeCategory, Vec<WardrobeItem>>,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self {
            items: WardrobeCategory::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Items of a category in insertion order
    pub fn items(&self, category: WardrobeCategory) -> &[WardrobeItem] {
        self.items
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn add_items(
        &mut self,
        category: WardrobeCategory,
        items: impl IntoIterator<Item = WardrobeItem>,
    ) {
        self.items.entry(category).or_default().extend(items);
    }

    /// Remove the item at `index`; `None` when the index is out of range
    pub fn remove_item(&mut self, category: WardrobeCategory, index: usize) -> Option<WardrobeItem> {
        let bucket = self.items.get_mut(&category)?;
        if index < bucket.len() {
            Some(bucket.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(Vec::is_empty)
    }

    pub fn total_items(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Categories in canonical order with their items
    pub fn iter(&self) -> impl Iterator<Item = (WardrobeCategory, &[WardrobeItem])> {
        WardrobeCategory::ALL
            .into_iter()
            .map(move |category| (category, self.items(category)))
    }

    /// Categories that hold at least one item
    pub fn available_categories(&self) -> Vec<WardrobeCategory> {
        self.iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(category, _)| category)
            .collect()
    }
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<WardrobeCategory, Vec<WardrobeItem>>> for Wardrobe {
    fn from(mut items: BTreeMap<WardrobeCategory, Vec<WardrobeItem>>) -> Self {
        for category in WardrobeCategory::ALL {
            items.entry(category).or_default();
        }
        Self { items }
    }
}

impl Serialize for Wardrobe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Style presets offered to the user. Any other string is passed through.
pub const STYLE_PRESETS: [&str; 5] = [
    "Chic & Modern (Default)",
    "Minimalist Office",
    "Classy Modest",
    "Smart Casual",
    "Evening Formal",
];

pub const DEFAULT_STYLE_PRESET: &str = STYLE_PRESETS[0];

/// Parameters of one generation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRequest {
    /// Number of outfits to attempt (1-5)
    pub number_of_options: u8,

    /// Free-form colour preference, e.g. "pastel"
    pub color_tone: String,

    /// Selected categories, in selection order
    pub components: Vec<WardrobeCategory>,

    pub style_preset: String,
}

impl OutfitRequest {
    pub const MIN_OPTIONS: u8 = 1;
    pub const MAX_OPTIONS: u8 = 5;
    pub const DEFAULT_OPTIONS: u8 = 3;
    pub const MIN_COMPONENTS: usize = 2;

    pub fn new(components: Vec<WardrobeCategory>) -> Self {
        Self {
            number_of_options: Self::DEFAULT_OPTIONS,
            color_tone: String::new(),
            components,
            style_preset: DEFAULT_STYLE_PRESET.to_string(),
        }
    }

    pub fn with_options(mut self, number_of_options: u8) -> Self {
        self.number_of_options = number_of_options;
        self
    }

    pub fn with_color_tone(mut self, color_tone: impl Into<String>) -> Self {
        self.color_tone = color_tone.into();
        self
    }

    pub fn with_style_preset(mut self, style_preset: impl Into<String>) -> Self {
        self.style_preset = style_preset.into();
        self
    }

    /// Validate against the wardrobe the request will be run on
    pub fn validate(&self, wardrobe: &Wardrobe) -> Result<(), crate::validation::ValidationError> {
        crate::validation::validate_outfit_request(self, wardrobe)
    }
}

/// One generated outfit image with its display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOutfit {
    pub image: EncodedImage,
    pub title: String,
}

impl GeneratedOutfit {
    pub fn new(image: EncodedImage, title: impl Into<String>) -> Self {
        Self {
            image,
            title: title.into(),
        }
    }

    /// Title for the n-th (1-based) generated option
    pub fn option_title(ordinal: usize) -> String {
        format!("Opsi {}", ordinal)
    }
}

/// Single-layer edit action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Swap the target layer for a wardrobe item
    Change,
    /// Remove the target layer
    TakeOut,
}

/// Edit instruction for one existing outfit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutfitRequest {
    pub action: EditAction,
    pub category: WardrobeCategory,

    /// Layer tag, e.g. "inner", "outer", "base"
    pub layer: String,

    /// Required iff `action` is `Change`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_item: Option<WardrobeItem>,
}

impl EditOutfitRequest {
    pub fn change(category: WardrobeCategory, layer: impl Into<String>, item: WardrobeItem) -> Self {
        Self {
            action: EditAction::Change,
            category,
            layer: layer.into(),
            replacement_item: Some(item),
        }
    }

    pub fn take_out(category: WardrobeCategory, layer: impl Into<String>) -> Self {
        Self {
            action: EditAction::TakeOut,
            category,
            layer: layer.into(),
            replacement_item: None,
        }
    }

    /// Human-readable edit target, e.g. "the outer layer tops"
    pub fn target_description(&self) -> String {
        format!("the {} layer {}", self.layer, self.category)
    }

    pub fn validate(&self) -> Result<(), crate::validation::ValidationError> {
        crate::validation::validate_edit_request(self)
    }
}

/// One element of a multimodal prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Image(EncodedImage),
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        PromptPart::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(text) => Some(text),
            PromptPart::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&EncodedImage> {
        match self {
            PromptPart::Image(image) => Some(image),
            PromptPart::Text(_) => None,
        }
    }
}

/// Status level for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLevel {
    /// Completed normally
    Info,
    /// Something went wrong but the user can carry on
    Warning,
    /// The operation failed
    Error,
}

/// Outcome codes reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Success (INFO)
    GenerationOk,
    MoreOutfitsAdded,
    NoNewOutfits,
    EditOk,
    EditSaved,
    ItemsAdded,
    ItemDeleted,

    // Precondition failures (WARNING)
    ValidationTooFewComponents,
    ValidationDuplicateComponent,
    ValidationOptionCount,
    ValidationEmptyCategory,
    ValidationMissingReplacement,
    ValidationUnexpectedReplacement,
    ValidationUnknownLayer,
    NoPreviousRequest,
    ItemNotFound,
    OutfitNotFound,

    // Generation / edit failures (ERROR)
    GenerationError,
    EditFailed,
    ServiceError,
    NetworkError,

    // Storage (WARNING)
    StorageWriteError,
}

impl ErrorCode {
    /// Default user-facing message for this code
    pub fn to_message(&self) -> &'static str {
        match self {
            ErrorCode::GenerationOk => "Your outfits are ready!",
            ErrorCode::MoreOutfitsAdded => "New outfits added!",
            ErrorCode::NoNewOutfits => {
                "No more unique combinations could be generated with the current settings."
            }
            ErrorCode::EditOk => "Edit generated successfully!",
            ErrorCode::EditSaved => "Outfit updated.",
            ErrorCode::ItemsAdded => "Items added to your wardrobe.",
            ErrorCode::ItemDeleted => "Item removed from your wardrobe.",
            ErrorCode::ValidationTooFewComponents => "Please select at least 2 wardrobe components.",
            ErrorCode::ValidationDuplicateComponent => "Each wardrobe component can only be selected once.",
            ErrorCode::ValidationOptionCount => "Number of options must be between 1 and 5.",
            ErrorCode::ValidationEmptyCategory => {
                "Please upload at least one item for every selected category."
            }
            ErrorCode::ValidationMissingReplacement => {
                "Please select a replacement item from your wardrobe."
            }
            ErrorCode::ValidationUnexpectedReplacement => {
                "A replacement item can only be used with the change action."
            }
            ErrorCode::ValidationUnknownLayer => "That layer is not available for this category.",
            ErrorCode::NoPreviousRequest => "Please generate an initial set of outfits first.",
            ErrorCode::ItemNotFound => "That wardrobe item no longer exists.",
            ErrorCode::OutfitNotFound => "That outfit no longer exists.",
            ErrorCode::GenerationError => {
                "An error occurred while generating outfits. Please check your API key and try again."
            }
            ErrorCode::EditFailed => "Image editing failed to return an image.",
            ErrorCode::ServiceError => {
                "An error occurred while editing the outfit. Please try again."
            }
            ErrorCode::NetworkError => "The server is not responding. Please try again later.",
            ErrorCode::StorageWriteError => {
                "Could not save your wardrobe. Your browser storage might be full."
            }
        }
    }
}

/// Processing result information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Status level (INFO/WARNING/ERROR)
    pub level: StatusLevel,

    pub code: ErrorCode,

    /// Optional additional context (e.g. added count, category)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ProcessResult {
    pub fn info(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Info,
            code,
            context: None,
        }
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Warning,
            code,
            context: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Error,
            code,
            context: None,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn is_success(&self) -> bool {
        self.level == StatusLevel::Info
    }
}

/// Storage-related errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage write failed: {0}")]
    WriteFailed(String),

    #[error("storage read failed: {0}")]
    ReadFailed(String),

    #[error("wardrobe serialization failed: {0}")]
    Serialization(String),
}

/// API Request: POST /api/v1/outfits/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutfitsRequest {
    pub request: OutfitRequest,
    pub wardrobe: Wardrobe,

    /// Outfits already shown to the user ("generate more")
    #[serde(default)]
    pub existing_outfits: Vec<GeneratedOutfit>,
}

/// API Response: POST /api/v1/outfits/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutfitsResponse {
    pub result: ProcessResult,

    /// Outfits produced by this call only
    #[serde(default)]
    pub outfits: Vec<GeneratedOutfit>,

    /// Unix timestamp of the response
    pub generated_at: i64,
}

impl GenerateOutfitsResponse {
    pub fn new(result: ProcessResult, outfits: Vec<GeneratedOutfit>) -> Self {
        Self {
            result,
            outfits,
            generated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Request: POST /api/v1/outfits/edit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutfitPayload {
    pub base_outfit: GeneratedOutfit,
    pub edit: EditOutfitRequest,
}

/// API Response: POST /api/v1/outfits/edit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutfitResponse {
    pub result: ProcessResult,

    /// Present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<GeneratedOutfit>,

    pub generated_at: i64,
}

impl EditOutfitResponse {
    pub fn success(outfit: GeneratedOutfit) -> Self {
        Self {
            result: ProcessResult::info(ErrorCode::EditOk),
            outfit: Some(outfit),
            generated_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn failure(result: ProcessResult) -> Self {
        Self {
            result,
            outfit: None,
            generated_at: chrono::Utc::now().timestamp(),
        }
    }
}
