// Gemini generateContent wire types

use crate::errors::ClientError;
use outfit_stylist_core::{EncodedImage, ImageMimeType, PromptPart};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single user turn asking for image output only
    pub fn image_only(parts: &[PromptPart]) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: parts.iter().map(Part::from).collect(),
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl From<&PromptPart> for Part {
    fn from(part: &PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => Part::Text { text: text.clone() },
            PromptPart::Image(image) => Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.as_str().to_string(),
                    data: image.to_base64(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

impl GenerateContentResponse {
    /// First inline image of the first candidate, if any
    pub fn into_first_image(self) -> Result<Option<EncodedImage>, ClientError> {
        let inline = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.inline_data));

        let Some(inline) = inline else {
            return Ok(None);
        };

        if inline.data.trim().is_empty() {
            return Ok(None);
        }

        // a missing MIME type means PNG, the model's default output
        let mime_type = if inline.mime_type.is_empty() {
            ImageMimeType::Png
        } else {
            ImageMimeType::from_mime(&inline.mime_type)
        };

        EncodedImage::from_base64(mime_type, &inline.data)
            .map(Some)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorWrapper {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Extract a readable message from Google's error envelope, falling back to the raw body
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{}: {}", status, message),
                _ => message,
            }
        })
        .unwrap_or_else(|_| body.to_string())
}
