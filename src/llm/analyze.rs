//! Storyboard analysis — one request, one parsed list of scene prompts.
//!
//! No retries, no caching, no timeout beyond the transport's defaults.
//! Transport failures are logged in full and surfaced as the single
//! `AnalysisError::GenerationFailed`; malformed output is absorbed by the
//! parse tiers.

use super::gemini::GeminiTransport;
use super::parse::{self, ParseTier};
use super::transport::ModelTransport;
use super::types::{AnalysisRequest, ScenePrompt};
use crate::clipboard::PastedImage;
use crate::error::AnalysisError;
use crate::settings::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct StoryboardAnalysisClient {
    transport: Arc<dyn ModelTransport>,
}

impl StoryboardAnalysisClient {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// Client backed by the Gemini API.
    pub fn gemini(settings: &Settings) -> Self {
        Self::new(Arc::new(GeminiTransport::new(settings)))
    }

    /// Analyze a storyboard and return one prompt per scene, in order.
    ///
    /// Does not check that any input was given; it sends whatever parts
    /// the arguments produce.
    pub async fn analyze(
        &self,
        image: Option<&PastedImage>,
        pasted_text: &str,
    ) -> Result<Vec<ScenePrompt>, AnalysisError> {
        let request = AnalysisRequest::build(image, pasted_text);
        log::info!(
            "[LLM] Analyzing storyboard: {} text chars, image: {}",
            pasted_text.len(),
            request.has_image()
        );

        let raw = match self.transport.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("[LLM] Error calling {} API: {}", self.transport.name(), e);
                return Err(AnalysisError::GenerationFailed);
            }
        };

        let parsed = parse::parse_model_output(&raw);
        match parsed.tier {
            ParseTier::Strict => {
                log::info!("[LLM] Parse result: {} scene prompt(s)", parsed.prompts.len());
            }
            ParseTier::LineSplit => {
                log::warn!(
                    "[LLM] Response was not a JSON array of strings — split into {} line(s)",
                    parsed.prompts.len()
                );
            }
            ParseTier::WholeText => {
                log::warn!("[LLM] Failed to parse JSON response — using raw text as one prompt");
                log::debug!("[LLM] Raw response: {}", raw.trim());
            }
        }

        Ok(parsed.prompts)
    }
}
