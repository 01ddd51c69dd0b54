//! Storyboard → prompts orchestration.
//!
//! validate input → analyze (one request) → post-process → editable prompts.
//! Holds the single-submission guard; the analysis client itself has none.

use crate::clipboard::{self, PasteEvent, PastedImage};
use crate::error::SubmitError;
use crate::llm::{ScenePrompt, StoryboardAnalysisClient};
use crate::postprocess::{self, PromptOptionSelection};
use std::sync::atomic::{AtomicBool, Ordering};

/// What the user has entered into the storyboard form.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub text: String,
    pub image: Option<PastedImage>,
    pub options: PromptOptionSelection,
}

impl Submission {
    pub fn new(text: impl Into<String>, options: PromptOptionSelection) -> Self {
        Self {
            text: text.into(),
            image: None,
            options,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.image.is_some()
    }

    /// Apply a paste to the form.
    ///
    /// An image paste replaces the current image once its decode finishes;
    /// otherwise the pasted text is appended as the default paste would.
    pub async fn apply_paste(&mut self, mut event: PasteEvent) {
        match clipboard::extract_image_from_paste(&mut event) {
            Some(pending) => {
                if let Some(image) = pending.resolve().await {
                    self.image = Some(image);
                }
            }
            None => {
                if let Some(text) = event.default_text() {
                    self.text.push_str(text);
                }
            }
        }
    }

    pub fn remove_image(&mut self) {
        self.image = None;
    }
}

/// Generated scene prompts, editable in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedPrompts {
    prompts: Vec<ScenePrompt>,
}

impl GeneratedPrompts {
    pub fn new(prompts: Vec<ScenePrompt>) -> Self {
        Self { prompts }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Prompt for a 1-based scene number.
    pub fn scene(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.prompts.get(i))
            .map(String::as_str)
    }

    /// Replace a prompt with user-edited text. Returns false if out of range.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.prompts.get_mut(index) {
            Some(prompt) => {
                *prompt = text.into();
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[ScenePrompt] {
        &self.prompts
    }

    pub fn into_vec(self) -> Vec<ScenePrompt> {
        self.prompts
    }
}

/// Form submission pipeline with a one-request-at-a-time guard.
pub struct PromptPipeline {
    client: StoryboardAnalysisClient,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl PromptPipeline {
    pub fn new(client: StoryboardAnalysisClient) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate, analyze and post-process one submission.
    ///
    /// Empty input is rejected before any request is made. A second
    /// submission while one is running is refused.
    pub async fn submit(&self, submission: &Submission) -> Result<GeneratedPrompts, SubmitError> {
        if !submission.has_content() {
            log::warn!("[PIPELINE] Rejected submission with no text and no image");
            return Err(SubmitError::EmptyInput);
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::warn!("[PIPELINE] Submission refused — a request is already running");
            return Err(SubmitError::AlreadyRunning);
        }
        let _guard = InFlight(&self.in_flight);

        let start = std::time::Instant::now();
        let raw = self
            .client
            .analyze(submission.image.as_ref(), &submission.text)
            .await?;
        let prompts = postprocess::post_process(&raw, &submission.options);

        log::info!(
            "[PIPELINE] {} prompt(s) ready in {}ms",
            prompts.len(),
            start.elapsed().as_millis()
        );
        Ok(GeneratedPrompts::new(prompts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardItem;
    use crate::error::TransportError;
    use crate::llm::{AnalysisRequest, ModelTransport};
    use crate::postprocess::AspectRatio;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Returns a fixed body; optionally waits for a signal first.
    struct ScriptedTransport {
        body: String,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl ModelTransport for ScriptedTransport {
        async fn generate(&self, _request: &AnalysisRequest) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(self.body.clone())
        }
    }

    fn pipeline(body: &str, gate: Option<Arc<Notify>>) -> (PromptPipeline, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            gate,
        });
        let client = StoryboardAnalysisClient::new(transport.clone());
        (PromptPipeline::new(client), transport)
    }

    #[tokio::test]
    async fn empty_submission_never_reaches_the_model() {
        let (pipeline, transport) = pipeline("[]", None);
        let submission = Submission::new("   \n", PromptOptionSelection::default());

        assert_eq!(pipeline.submit(&submission).await, Err(SubmitError::EmptyInput));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn prompts_are_post_processed() {
        let (pipeline, _) = pipeline(r#"["Scene A", "Scene B."]"#, None);
        let options = PromptOptionSelection::new(
            vec!["Dubbed in Korean.".to_string()],
            Some(AspectRatio::Landscape),
        );
        let submission = Submission::new("Scene 1 ... Scene 2 ...", options);

        let prompts = pipeline.submit(&submission).await.unwrap();
        assert_eq!(
            prompts.as_slice(),
            [
                "Scene A. Dubbed in Korean. Aspect ratio 16:9.",
                "Scene B. Dubbed in Korean. Aspect ratio 16:9.",
            ]
        );
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_running() {
        let gate = Arc::new(Notify::new());
        let (pipeline, transport) = pipeline(r#"["Scene A"]"#, Some(gate.clone()));
        let pipeline = Arc::new(pipeline);
        let submission = Submission::new("Scene 1", PromptOptionSelection::default());

        let first = {
            let pipeline = pipeline.clone();
            let submission = submission.clone();
            tokio::spawn(async move { pipeline.submit(&submission).await })
        };
        while transport.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(pipeline.is_busy());
        assert_eq!(pipeline.submit(&submission).await, Err(SubmitError::AlreadyRunning));

        gate.notify_one();
        let prompts = first.await.unwrap().unwrap();
        assert_eq!(prompts.as_slice(), ["Scene A."]);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn image_paste_replaces_image_text_paste_appends() {
        let mut submission = Submission::new("Scene 1. ", PromptOptionSelection::default());

        submission
            .apply_paste(PasteEvent::new(vec![ClipboardItem::text("text/plain", "Scene 2.")]))
            .await;
        assert_eq!(submission.text, "Scene 1. Scene 2.");
        assert!(submission.image.is_none());

        submission
            .apply_paste(PasteEvent::new(vec![
                ClipboardItem::text("text/plain", "ignored"),
                ClipboardItem::file("image/png", vec![1, 2, 3]),
            ]))
            .await;
        assert_eq!(submission.text, "Scene 1. Scene 2.");
        assert_eq!(submission.image.as_ref().unwrap().base64_data, "AQID");

        submission.remove_image();
        assert!(submission.image.is_none());
    }

    #[test]
    fn prompts_can_be_edited_in_place() {
        let mut prompts = GeneratedPrompts::new(vec!["A.".to_string(), "B.".to_string()]);
        assert!(prompts.edit(1, "B, revised."));
        assert!(!prompts.edit(2, "out of range"));
        assert_eq!(prompts.scene(2), Some("B, revised."));
        assert_eq!(prompts.scene(0), None);
        assert_eq!(prompts.len(), 2);
    }
}
