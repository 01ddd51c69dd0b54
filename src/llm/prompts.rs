//! LLM prompt constants for storyboard analysis.
//!
//! These strings and the response schema are the contract between this
//! tool and the model. They are passed verbatim into every request.

use serde_json::Value;

pub const MODEL: &str = "gemini-2.5-flash";

/// Storyboard analysis system instruction.
///
/// Asks for one English prompt per scene, returned as a bare JSON array.
pub const STORYBOARD_SYSTEM_PROMPT: &str = r#"You are an expert prompt engineer for the text-to-video AI model Google VEO. Your task is to analyze the provided storyboard and generate a series of prompts, one for each distinct scene.

The user will provide storyboard information, which may include scene numbers, composition details, dialogue, and actions, either as text or within an image.

**Instructions:**
1.  **Identify Scenes:** Carefully parse the input to identify distinct scenes. Scenes may be explicitly numbered (e.g., "씬 1", "Scene 2") or implied by changes in location, characters, or action.
2.  **Generate One Prompt Per Scene:** For each scene you identify, create a single, cohesive, and highly descriptive VEO prompt in English.
3.  **Describe Content:** Each prompt should detail the visuals (characters, setting, objects), camera composition (shot type, angle), character actions, and overall mood or tone.
4.  **Cinematic Language:** Use professional, cinematic language suitable for a high-quality video generation model.
5.  **Output Format:** Your final output **must** be a valid JSON array of strings. Each string in the array corresponds to the prompt for one scene, in chronological order. Do not include any other text, explanations, or markdown formatting.

Example Output:
["A medium shot of a middle-aged Asian man in a doctor's white coat, sitting at a modern desk in a consultation room, explaining with subtle hand gestures, looking directly at the camera with a reassuring expression. The lighting is bright and clean, creating a professional and trustworthy atmosphere.", "A close-up shot on a computer screen displaying a dental implant diagram, with the doctor's hand pointing to a specific detail."]"#;

/// Prefix placed before pasted storyboard text.
pub const PASTED_TEXT_INTRO: &str = "Here is the pasted text from the storyboard:";

/// Text part sent when the storyboard is an image alone.
pub const IMAGE_ONLY_INSTRUCTION: &str =
    "Analyze the storyboard in this image and create a prompt for each scene based on it.";

const SCENE_PROMPT_DESCRIPTION: &str =
    "A detailed VEO prompt for a single scene from the storyboard.";

/// Builds the text part for pasted storyboard text.
pub fn build_text_message(pasted_text: &str) -> String {
    format!("{}\n\n{}", PASTED_TEXT_INTRO, pasted_text)
}

/// Declared response shape: a JSON array of strings.
pub fn response_schema() -> Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "STRING",
            "description": SCENE_PROMPT_DESCRIPTION
        }
    })
}
