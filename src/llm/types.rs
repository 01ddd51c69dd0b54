//! Request types for storyboard analysis.

use super::prompts::{self, IMAGE_ONLY_INSTRUCTION, STORYBOARD_SYSTEM_PROMPT};
use crate::clipboard::PastedImage;
use serde_json::Value;

/// One generated, user-editable video prompt for one scene.
pub type ScenePrompt = String;

/// A content part of a model request, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    InlineImage { mime_type: String, data: String },
    Text(String),
}

/// Everything sent to the model for one `analyze` call.
///
/// Built fresh per call and never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub parts: Vec<RequestPart>,
    pub system_instruction: &'static str,
    pub response_schema: Value,
}

impl AnalysisRequest {
    /// Assemble the parts: image first, then text.
    ///
    /// Pasted text is sent with an introductory line. With an image and no
    /// text, a fixed instruction to read the image takes its place. With
    /// neither, the request carries no parts; callers are expected to have
    /// rejected that case already.
    pub fn build(image: Option<&PastedImage>, pasted_text: &str) -> Self {
        let mut parts = Vec::with_capacity(2);

        if let Some(image) = image {
            parts.push(RequestPart::InlineImage {
                mime_type: image.mime_type.clone(),
                data: image.base64_data.clone(),
            });
        }

        if !pasted_text.is_empty() {
            parts.push(RequestPart::Text(prompts::build_text_message(pasted_text)));
        } else if image.is_some() {
            parts.push(RequestPart::Text(IMAGE_ONLY_INSTRUCTION.to_string()));
        }

        Self {
            parts,
            system_instruction: STORYBOARD_SYSTEM_PROMPT,
            response_schema: prompts::response_schema(),
        }
    }

    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, RequestPart::InlineImage { .. }))
    }
}
