use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    storyboard_prompts_lib::run().await
}
