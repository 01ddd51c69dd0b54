//! Clipboard domain — public API.
//!
//! This module owns everything that turns a paste into storyboard input:
//! image extraction from paste events and native OS clipboard access.
//! External code should only use the items exported here.

mod data_url;
mod native;
mod paste;

pub use native::{copy_to_clipboard, paste_from_file, read_system_paste};
pub use paste::{extract_image_from_paste, ClipboardItem, ItemKind, PasteEvent, PendingImage};

use serde::{Deserialize, Serialize};

/// An image pasted into the storyboard input.
///
/// Created at most once per paste event and never mutated afterwards.
/// A new paste replaces it wholesale; removal clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastedImage {
    pub base64_data: String,
    pub mime_type: String,
}

impl PastedImage {
    /// Data URL suitable for previews (`data:<mime>;base64,<payload>`).
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}
