//! Error types for every domain in the crate.
//!
//! The split mirrors how failures surface: transport errors keep their
//! detail for the logs, while `AnalysisError` is the single uniform
//! condition the caller sees when generation fails.

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures. Fatal — the process exits.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not found. Set it (or API_KEY) in the environment, .env.local or .env")]
    MissingApiKey,
}

/// Failures talking to the hosted model. Never shown to the caller directly.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model service response carried no text")]
    EmptyResponse,
}

/// The only failure `analyze` reports. Cause detail is logged, not returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Prompt generation failed. Check the API key or try again later.")]
    GenerationFailed,
}

/// Native clipboard and image-file failures.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard image buffer does not match {width}x{height} RGBA")]
    MalformedImage { width: u32, height: u32 },

    #[error("not a recognised image file: {}", .0.display())]
    UnrecognizedImage(PathBuf),
}

/// Submission-level failures raised by the form pipeline.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Enter storyboard text or paste an image first.")]
    EmptyInput,

    #[error("A generation request is already running.")]
    AlreadyRunning,

    #[error(transparent)]
    Generation(#[from] AnalysisError),
}

/// Preference file persistence failures.
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown aspect ratio '{0}' (expected 1:1, 16:9 or 9:16)")]
pub struct ParseAspectRatioError(pub String);

/// Failures of a CLI command, reported on stderr with a non-zero exit.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to format output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no scene {scene} to copy ({count} generated)")]
    NoSuchScene { scene: usize, count: usize },
}
