//! CLI command handlers.
//!
//! Thin wrappers that bridge command-line arguments to the library:
//! gather storyboard input, run the pipeline, print and copy prompts.
//! Multi-step orchestration lives in pipeline.rs instead.

use crate::clipboard;
use crate::error::{CommandError, ParseAspectRatioError};
use crate::llm::StoryboardAnalysisClient;
use crate::pipeline::{GeneratedPrompts, PromptPipeline, Submission};
use crate::postprocess::{AspectRatio, PromptOption, PromptOptionSelection};
use crate::preferences::{self, Preferences};
use crate::settings::Settings;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Parser, Debug)]
#[command(name = "storyboard-prompts")]
#[command(about = "Turn a storyboard (text and/or image) into one video prompt per scene", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate scene prompts from a storyboard
    Generate(GenerateArgs),

    /// List preset suffix phrases and aspect ratios
    Options,

    /// Save the default option selection used by `generate`
    Defaults(OptionArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Storyboard text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read storyboard text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Storyboard image file
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Paste from the system clipboard (image, or text if no image)
    #[arg(long)]
    pub clipboard: bool,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Copy the prompt for this scene number to the clipboard
    #[arg(long, value_name = "SCENE")]
    pub copy: Option<usize>,

    /// Print prompts as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Stdin is only read when it is piped and no other source was given.
    /// An idle pipe would otherwise block `--image` / `--clipboard` runs.
    fn reads_stdin(&self, stdin_is_terminal: bool) -> bool {
        !stdin_is_terminal
            && self.text.is_none()
            && self.file.is_none()
            && self.image.is_none()
            && !self.clipboard
    }
}

#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Preset suffix phrase (repeatable)
    #[arg(short = 'o', long = "option", value_enum)]
    pub presets: Vec<PromptOption>,

    /// Custom suffix phrase (repeatable)
    #[arg(short = 's', long = "suffix")]
    pub suffixes: Vec<String>,

    /// Aspect ratio tag: 1:1, 16:9, 9:16 or none
    #[arg(short = 'a', long = "aspect-ratio", value_parser = parse_ratio_arg)]
    pub aspect_ratio: Option<RatioArg>,
}

/// `--aspect-ratio` value; `none` turns the clause off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioArg(pub Option<AspectRatio>);

fn parse_ratio_arg(s: &str) -> Result<RatioArg, ParseAspectRatioError> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(RatioArg(None));
    }
    s.parse().map(|ratio| RatioArg(Some(ratio)))
}

impl OptionArgs {
    /// Overlay the flags on a base selection.
    ///
    /// Any suffix flag replaces the base suffixes (presets first, then
    /// custom phrases); the aspect ratio flag replaces the base ratio.
    pub fn apply(&self, base: PromptOptionSelection) -> PromptOptionSelection {
        let mut selection = base;

        if !self.presets.is_empty() || !self.suffixes.is_empty() {
            selection.suffixes.clear();
            let phrases = self
                .presets
                .iter()
                .map(|preset| preset.phrase())
                .chain(self.suffixes.iter().map(String::as_str));
            for phrase in phrases {
                selection.select_suffix(phrase);
            }
        }

        if let Some(RatioArg(ratio)) = self.aspect_ratio {
            selection.aspect_ratio = ratio;
        }

        selection
    }
}

pub async fn dispatch(cli: Cli, settings: &Settings) -> Result<(), CommandError> {
    match cli.command {
        Command::Generate(args) => generate(args, settings).await,
        Command::Options => {
            list_options();
            Ok(())
        }
        Command::Defaults(args) => save_defaults(&args),
    }
}

async fn generate(args: GenerateArgs, settings: &Settings) -> Result<(), CommandError> {
    let options = args.options.apply(preferences::load().selection());
    let mut submission = Submission::new(read_storyboard_text(&args).await?, options);

    if let Some(path) = &args.image {
        submission
            .apply_paste(clipboard::paste_from_file(path)?)
            .await;
    }
    if args.clipboard {
        submission
            .apply_paste(clipboard::read_system_paste()?)
            .await;
    }
    if let Some(image) = &submission.image {
        eprintln!(
            "Pasted image: {} ({} base64 chars)",
            image.mime_type,
            image.base64_data.len()
        );
    }

    let pipeline = PromptPipeline::new(StoryboardAnalysisClient::gemini(settings));
    eprintln!("Generating prompts...");
    let prompts = pipeline.submit(&submission).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(prompts.as_slice())?);
    } else {
        print_prompts(&prompts);
    }

    if let Some(scene) = args.copy {
        let text = prompts.scene(scene).ok_or(CommandError::NoSuchScene {
            scene,
            count: prompts.len(),
        })?;
        clipboard::copy_to_clipboard(text)?;
        eprintln!("Copied scene {} to clipboard", scene);
    }

    Ok(())
}

/// Text from `--text`, `--file`, or piped stdin, in that order.
async fn read_storyboard_text(args: &GenerateArgs) -> Result<String, CommandError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(tokio::fs::read_to_string(path).await?);
    }
    if args.reads_stdin(std::io::stdin().is_terminal()) {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }
    Ok(String::new())
}

fn print_prompts(prompts: &GeneratedPrompts) {
    if prompts.is_empty() {
        println!("No scenes were detected in the storyboard.");
        return;
    }
    for (i, prompt) in prompts.as_slice().iter().enumerate() {
        println!("Scene {}", i + 1);
        println!("{}", prompt);
        println!();
    }
}

fn list_options() {
    let defaults = preferences::load();

    println!("Suffix presets (--option):");
    for preset in PromptOption::ALL {
        let name = preset
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        let marker = if defaults.suffixes.iter().any(|s| s == preset.phrase()) {
            "*"
        } else {
            " "
        };
        println!(" {} {:<14} {} — \"{}\"", marker, name, preset.label(), preset.phrase());
    }

    println!();
    println!("Aspect ratios (--aspect-ratio):");
    for ratio in AspectRatio::ALL {
        let marker = if defaults.aspect_ratio == Some(ratio) { "*" } else { " " };
        println!(" {} {:<14} {}", marker, ratio.as_str(), ratio.label());
    }
    let none_marker = if defaults.aspect_ratio.is_none() { "*" } else { " " };
    println!(" {} {:<14} no aspect ratio clause", none_marker, "none");

    println!();
    println!("* = default, from {}", preferences::preferences_path().display());
}

fn save_defaults(args: &OptionArgs) -> Result<(), CommandError> {
    let selection = args.apply(preferences::load().selection());
    let path = preferences::save(&Preferences::from(&selection))?;
    println!("Saved defaults to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("storyboard-prompts").chain(args.iter().copied()))
            .unwrap()
    }

    fn option_args(cli: Cli) -> OptionArgs {
        match cli.command {
            Command::Generate(args) => args.options,
            Command::Defaults(args) => args,
            Command::Options => panic!("no option args"),
        }
    }

    fn generate_args(cli: Cli) -> GenerateArgs {
        match cli.command {
            Command::Generate(args) => args,
            _ => panic!("not a generate command"),
        }
    }

    #[test]
    fn stdin_skipped_when_another_source_is_given() {
        let piped = false;
        assert!(generate_args(parse(&["generate"])).reads_stdin(piped));
        assert!(!generate_args(parse(&["generate"])).reads_stdin(true));

        for args in [
            vec!["generate", "-i", "board.png"],
            vec!["generate", "--clipboard"],
            vec!["generate", "-t", "Scene 1"],
            vec!["generate", "-f", "board.txt"],
        ] {
            assert!(
                !generate_args(parse(&args)).reads_stdin(piped),
                "stdin read for {:?}",
                args
            );
        }
    }

    #[test]
    fn flags_override_saved_defaults() {
        let cli = parse(&[
            "generate",
            "-t",
            "Scene 1",
            "-o",
            "no-subtitles",
            "-s",
            "Slow motion.",
            "-a",
            "9:16",
        ]);
        let base = PromptOptionSelection::new(
            vec!["Dubbed in Korean.".to_string()],
            Some(AspectRatio::Landscape),
        );

        let selection = option_args(cli).apply(base);
        assert_eq!(
            selection.suffixes,
            vec!["No subtitles or graphics.", "Slow motion."]
        );
        assert_eq!(selection.aspect_ratio, Some(AspectRatio::Portrait));
    }

    #[test]
    fn no_flags_keep_saved_defaults() {
        let base = PromptOptionSelection::new(
            vec!["Dubbed in Korean.".to_string()],
            Some(AspectRatio::Square),
        );
        let selection = option_args(parse(&["generate"])).apply(base.clone());
        assert_eq!(selection, base);
    }

    #[test]
    fn none_disables_aspect_ratio() {
        let selection = option_args(parse(&["defaults", "--aspect-ratio", "none"]))
            .apply(PromptOptionSelection::new(Vec::new(), Some(AspectRatio::Landscape)));
        assert_eq!(selection.aspect_ratio, None);
    }

    #[test]
    fn bad_aspect_ratio_is_a_usage_error() {
        let result = Cli::try_parse_from(["storyboard-prompts", "generate", "-a", "4:3"]);
        assert!(result.is_err());
    }

    #[test]
    fn text_and_file_conflict() {
        let result =
            Cli::try_parse_from(["storyboard-prompts", "generate", "-t", "x", "-f", "story.txt"]);
        assert!(result.is_err());
    }
}
