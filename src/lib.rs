//! Storyboard Prompts — turn a storyboard into one video prompt per scene.
//!
//! This is the library shell that wires the domains together. The
//! command-line front end calls [`run`]; everything else is reusable.
//!
//! Modules:
//!   - clipboard    — paste-event image extraction + native clipboard
//!   - llm          — storyboard analysis against Gemini
//!   - postprocess  — suffix phrases and aspect-ratio clause
//!   - pipeline     — validate → analyze → post-process, single in-flight guard
//!   - settings     — API key + model configuration (fatal if missing)
//!   - preferences  — persisted default option selection
//!   - commands     — CLI argument parsing and command handlers

pub mod clipboard;
pub mod commands;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod postprocess;
pub mod preferences;
pub mod settings;

use clap::Parser;
use commands::Cli;
use settings::Settings;
use std::process::ExitCode;

/// Entry point — called by the binary.
pub async fn run() -> ExitCode {
    // Load .env.local → .env from the working directory before logging
    // starts, so RUST_LOG can come from either file.
    if let Ok(cwd) = std::env::current_dir() {
        settings::load_env_files(&cwd);
    }

    env_logger::init();

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("[STARTUP] {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Storyboard Prompts starting up");

    match commands::dispatch(cli, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[STARTUP] Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
