//! Data URL encoding and splitting for pasted image payloads.

use super::PastedImage;
use base64::Engine;
use regex::Regex;
use std::sync::OnceLock;

/// MIME type used when a pasted file declares none.
const FALLBACK_MIME: &str = "application/octet-stream";

fn mime_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r":(.*?);").expect("MIME pattern is a valid regex"))
}

/// Encode raw bytes as a base64 data URL.
pub(crate) fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        FALLBACK_MIME
    } else {
        mime_type
    };
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, payload)
}

/// Split a data URL into its MIME type and base64 payload.
///
/// Returns `None` when the payload is empty or the header has no
/// recoverable MIME type.
pub(crate) fn split_data_url(url: &str) -> Option<PastedImage> {
    let (header, data) = url.split_once(',')?;
    let mime_type = mime_pattern().captures(header)?.get(1)?.as_str();
    if data.is_empty() || mime_type.is_empty() {
        return None;
    }
    Some(PastedImage {
        base64_data: data.to_string(),
        mime_type: mime_type.to_string(),
    })
}
