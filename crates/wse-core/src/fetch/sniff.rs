//! Choose a file extension from the first bytes of a payload.

/// Image types recognized by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Gif,
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageKind::Gif)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Gif => "gif",
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

/// Extension for sticker `id` with payload `data`; unrecognized payloads get
/// `fallback` and a warning.
pub fn extension_for(id: &str, data: &[u8], fallback: &str) -> String {
    match ImageKind::sniff(data) {
        Some(kind) => kind.extension().to_string(),
        None => {
            tracing::warn!(
                "sticker {}: unrecognized content type, falling back to .{} extension",
                id,
                fallback
            );
            fallback.to_string()
        }
    }
}
