//! Native clipboard access and image-file pastes.
//!
//! Uses arboard for OS clipboard access. Clipboard images come back as raw
//! RGBA and are re-encoded to PNG so they travel like any pasted file.

use super::{ClipboardItem, PasteEvent};
use crate::error::ClipboardError;
use std::path::Path;

/// Snapshot the OS clipboard as a paste event.
///
/// An image becomes an `image/png` file item, text a `text/plain` item.
/// Missing content types are skipped, not errors.
pub fn read_system_paste() -> Result<PasteEvent, ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    let mut items = Vec::new();

    match clipboard.get_image() {
        Ok(image) => {
            let png = encode_png(image)?;
            log::info!("[CLIPBOARD] System clipboard image: {} PNG bytes", png.len());
            items.push(ClipboardItem::file("image/png", png));
        }
        Err(arboard::Error::ContentNotAvailable) => {}
        Err(e) => return Err(e.into()),
    }

    match clipboard.get_text() {
        Ok(text) => {
            log::info!("[CLIPBOARD] System clipboard text: {} chars", text.len());
            items.push(ClipboardItem::text("text/plain", text));
        }
        Err(arboard::Error::ContentNotAvailable) => {}
        Err(e) => return Err(e.into()),
    }

    Ok(PasteEvent::new(items))
}

/// Build a single-item paste event from an image file on disk.
pub fn paste_from_file(path: &Path) -> Result<PasteEvent, ClipboardError> {
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)
        .map_err(|_| ClipboardError::UnrecognizedImage(path.to_path_buf()))?;
    let mime_type = format.to_mime_type();
    log::info!(
        "[CLIPBOARD] Loaded {} ({}, {} bytes)",
        path.display(),
        mime_type,
        bytes.len()
    );
    Ok(PasteEvent::new(vec![ClipboardItem::file(mime_type, bytes)]))
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    log::info!("[CLIPBOARD] Copied {} chars to clipboard", text.len());
    Ok(())
}

fn encode_png(image: arboard::ImageData<'_>) -> Result<Vec<u8>, ClipboardError> {
    let width = image.width as u32;
    let height = image.height as u32;
    let rgba = image::RgbaImage::from_raw(width, height, image.bytes.into_owned())
        .ok_or(ClipboardError::MalformedImage { width, height })?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::io::Write;

    #[test]
    fn encodes_rgba_buffer_as_png() {
        let image = arboard::ImageData {
            width: 2,
            height: 1,
            bytes: Cow::Owned(vec![255, 0, 0, 255, 0, 255, 0, 255]),
        };
        let png = encode_png(image).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), image::ImageFormat::Png);
    }

    #[test]
    fn short_rgba_buffer_is_rejected() {
        let image = arboard::ImageData {
            width: 4,
            height: 4,
            bytes: Cow::Owned(vec![0; 8]),
        };
        assert!(matches!(
            encode_png(image),
            Err(ClipboardError::MalformedImage { width: 4, height: 4 })
        ));
    }

    #[test]
    fn image_file_becomes_file_item() {
        let mut png = Vec::new();
        image::DynamicImage::new_rgba8(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&png).unwrap();

        let event = paste_from_file(file.path()).unwrap();
        assert_eq!(event.items().len(), 1);
        assert_eq!(event.items()[0].mime_type(), "image/png");
        assert_eq!(event.items()[0].as_file(), Some(png.as_slice()));
    }

    #[test]
    fn non_image_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Scene 1. A quiet street.").unwrap();

        assert!(matches!(
            paste_from_file(file.path()),
            Err(ClipboardError::UnrecognizedImage(_))
        ));
    }
}
