//! LLM domain — storyboard analysis against a hosted multimodal model.
//!
//! Public API for turning a storyboard into scene prompts.
//! External code should only use the items exported here.
//!
//! Layout:
//!   - prompts.rs   — fixed system instruction + response schema
//!   - types.rs     — request assembly (image part, text part)
//!   - transport.rs — `ModelTransport` seam
//!   - gemini.rs    — Google Gemini implementation of the transport
//!   - parse.rs     — strict JSON → line split → whole text
//!   - analyze.rs   — `StoryboardAnalysisClient`

mod analyze;
pub mod gemini;
pub mod parse;
pub mod prompts;
mod transport;
pub mod types;

pub use analyze::StoryboardAnalysisClient;
pub use gemini::GeminiTransport;
pub use transport::ModelTransport;
pub use types::{AnalysisRequest, RequestPart, ScenePrompt};
