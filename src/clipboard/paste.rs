//! Paste-event image extraction.
//!
//! A paste event exposes an ordered list of data items. The first item
//! whose declared type mentions `image` is decoded on a blocking worker
//! into a [`PastedImage`]; the result arrives later through a single-shot
//! channel. Everything else in the paste is left alone.

use super::{data_url, PastedImage};
use tokio::sync::oneshot;

/// How a clipboard item exposes its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    String,
    File,
}

/// One entry of a paste event's data transfer.
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    kind: ItemKind,
    mime_type: String,
    data: Vec<u8>,
}

impl ClipboardItem {
    pub fn text(mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::String,
            mime_type: mime_type.into(),
            data: text.into().into_bytes(),
        }
    }

    pub fn file(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind: ItemKind::File,
            mime_type: mime_type.into(),
            data: bytes,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.contains("image")
    }

    /// Binary payload, only for file items.
    pub fn as_file(&self) -> Option<&[u8]> {
        match self.kind {
            ItemKind::File => Some(&self.data),
            ItemKind::String => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.kind {
            ItemKind::String => std::str::from_utf8(&self.data).ok(),
            ItemKind::File => None,
        }
    }
}

/// A paste into the storyboard input.
#[derive(Debug, Clone, Default)]
pub struct PasteEvent {
    items: Vec<ClipboardItem>,
    default_prevented: bool,
}

impl PasteEvent {
    pub fn new(items: Vec<ClipboardItem>) -> Self {
        Self {
            items,
            default_prevented: false,
        }
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    /// Suppress the default "paste as text" action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Text the default paste action would insert, if it still applies.
    pub fn default_text(&self) -> Option<&str> {
        if self.default_prevented {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.mime_type == "text/plain")
            .and_then(ClipboardItem::as_text)
    }
}

/// An image decode in progress. Resolves to zero or one image.
#[derive(Debug)]
pub struct PendingImage {
    rx: oneshot::Receiver<PastedImage>,
}

impl PendingImage {
    /// Wait for the decode. `None` when it produced no payload or MIME type.
    pub async fn resolve(self) -> Option<PastedImage> {
        self.rx.await.ok()
    }
}

/// Start extracting the first image item of a paste.
///
/// Returns `None` (and leaves the default action untouched) when the paste
/// has no image item, or its first image item carries no file payload.
/// Otherwise the default action is suppressed immediately and the decoded
/// image arrives through the returned [`PendingImage`]. Later image items
/// in the same paste are ignored.
///
/// Must be called from within a Tokio runtime.
pub fn extract_image_from_paste(event: &mut PasteEvent) -> Option<PendingImage> {
    let position = event.items.iter().position(ClipboardItem::is_image)?;
    let item = &event.items[position];

    let Some(bytes) = item.as_file() else {
        log::debug!(
            "[CLIPBOARD] Image item #{} ({}) has no file payload — ignoring",
            position,
            item.mime_type
        );
        return None;
    };

    let mime_type = item.mime_type.clone();
    let bytes = bytes.to_vec();
    let skipped = event.items[position + 1..]
        .iter()
        .filter(|item| item.is_image())
        .count();
    if skipped > 0 {
        log::info!("[CLIPBOARD] Ignoring {} additional image item(s)", skipped);
    }

    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let start = std::time::Instant::now();
        let url = data_url::encode_data_url(&mime_type, &bytes);
        match data_url::split_data_url(&url) {
            Some(image) => {
                log::info!(
                    "[CLIPBOARD] Decoded {} image ({} bytes) in {}ms",
                    image.mime_type,
                    bytes.len(),
                    start.elapsed().as_millis()
                );
                // Receiver may already be gone if the paste was abandoned.
                let _ = tx.send(image);
            }
            None => {
                log::warn!("[CLIPBOARD] Decoded image had no payload or MIME type — dropped");
            }
        }
    });

    event.prevent_default();
    Some(PendingImage { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn single_image_item_yields_one_image() {
        let mut event = PasteEvent::new(vec![ClipboardItem::file("image/png", vec![1, 2, 3])]);

        let pending = extract_image_from_paste(&mut event).expect("image item found");
        assert!(event.is_default_prevented());

        let image = pending.resolve().await.expect("decode produced an image");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.base64_data, "AQID");
    }

    #[tokio::test]
    async fn text_only_paste_is_left_alone() {
        let mut event = PasteEvent::new(vec![
            ClipboardItem::text("text/plain", "Scene 1: a beach"),
            ClipboardItem::text("text/html", "<p>Scene 1: a beach</p>"),
        ]);

        assert!(extract_image_from_paste(&mut event).is_none());
        assert!(!event.is_default_prevented());
        assert_eq!(event.default_text(), Some("Scene 1: a beach"));
    }

    #[tokio::test]
    async fn only_first_image_is_processed() {
        let mut event = PasteEvent::new(vec![
            ClipboardItem::text("text/plain", "caption"),
            ClipboardItem::file("image/jpeg", vec![0xff, 0xd8]),
            ClipboardItem::file("image/png", vec![0x89, 0x50]),
        ]);

        let image = extract_image_from_paste(&mut event)
            .unwrap()
            .resolve()
            .await
            .unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(event.default_text(), None);
    }

    #[tokio::test]
    async fn empty_image_payload_resolves_to_none() {
        let mut event = PasteEvent::new(vec![ClipboardItem::file("image/png", Vec::new())]);

        let pending = extract_image_from_paste(&mut event).unwrap();
        assert!(event.is_default_prevented());
        assert!(pending.resolve().await.is_none());
    }

    #[tokio::test]
    async fn image_typed_string_item_stops_the_scan() {
        let mut event = PasteEvent::new(vec![
            ClipboardItem::text("image/svg+xml", "<svg/>"),
            ClipboardItem::file("image/png", vec![1]),
        ]);

        assert!(extract_image_from_paste(&mut event).is_none());
        assert!(!event.is_default_prevented());
    }
}
