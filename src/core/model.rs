// Useful Tools - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI.
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Tool records
// =============================================================================

/// One entry in the tool directory.
///
/// Records are loaded once at startup as part of a `ToolCatalog` and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRecord {
    /// Unique identifier within the catalog.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Search tags. Empty when the catalog entry declares none.
    pub tags: Vec<String>,
    /// Display image reference, relative to the catalog file.
    pub screenshot: String,
    /// Destination link: `app://<view>`, an absolute URL, or a site-relative path.
    pub url: String,
}

/// Raw deserialisable shape of a `[[tools]]` table.
///
/// `tags` stays optional here so the loader can tell an absent list apart
/// from an explicitly empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolDefinition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub screenshot: String,
    #[serde(default)]
    pub url: String,
    pub tags: Option<Vec<String>>,
}

// =============================================================================
// Loaded files
// =============================================================================

/// In-memory content of a loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Text-oriented files, decoded as (lossy) UTF-8.
    Text(String),
    /// Images and other binary payloads, kept as opaque bytes.
    Binary(Vec<u8>),
}

/// A file the user picked or dropped, fully read into memory.
///
/// Replaced wholesale on each new selection.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Display name (final path component).
    pub name: String,
    pub path: PathBuf,
    /// Media type derived from the file extension, e.g. `text/plain`.
    pub media_type: &'static str,
    /// Size in bytes as read from disk.
    pub size: u64,
    pub content: FileContent,
    /// True when the user opened a folder and `content` is the placeholder text.
    pub is_folder: bool,
    /// Local time the content was read.
    pub loaded_at: DateTime<Local>,
}

impl LoadedFile {
    /// Text content, if this file was read as text.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(text) => Some(text),
            FileContent::Binary(_) => None,
        }
    }

    /// Raw bytes, if this file was read as binary.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            FileContent::Binary(bytes) => Some(bytes),
            FileContent::Text(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(self.media_type)
    }
}

/// Metadata of the image currently selected in the converter.
///
/// Bytes are not read until a conversion starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub name: String,
    pub media_type: &'static str,
    pub size: u64,
}

impl SelectedImage {
    /// Upper-case subtype of the media type, e.g. `PNG` for `image/png`.
    pub fn format_label(&self) -> String {
        self.media_type
            .split('/')
            .nth(1)
            .unwrap_or(self.media_type)
            .to_uppercase()
    }
}

/// Media type for a file path, derived from its extension.
///
/// Unknown extensions map to `application/octet-stream`, which the ingest
/// layer treats as text (lossy decode).
pub fn media_type_for(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "toml" => "application/toml",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

// =============================================================================
// Image conversion
// =============================================================================

/// Target encodings offered by the image converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    Jpeg,
    #[default]
    Png,
    Webp,
    Gif,
    Bmp,
}

impl TargetFormat {
    /// Returns all variants in display order.
    pub fn all() -> &'static [TargetFormat] {
        &[
            TargetFormat::Jpeg,
            TargetFormat::Png,
            TargetFormat::Webp,
            TargetFormat::Gif,
            TargetFormat::Bmp,
        ]
    }

    pub fn mime(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::Webp => "image/webp",
            TargetFormat::Gif => "image/gif",
            TargetFormat::Bmp => "image/bmp",
        }
    }

    /// Upper-case label for buttons and messages.
    pub fn label(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "JPEG",
            TargetFormat::Png => "PNG",
            TargetFormat::Webp => "WEBP",
            TargetFormat::Gif => "GIF",
            TargetFormat::Bmp => "BMP",
        }
    }

    /// Conventional file extension, including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => ".jpg",
            TargetFormat::Png => ".png",
            TargetFormat::Webp => ".webp",
            TargetFormat::Gif => ".gif",
            TargetFormat::Bmp => ".bmp",
        }
    }

    /// Encoder quality factor, for formats that take one.
    pub fn quality(&self) -> Option<u8> {
        match self {
            TargetFormat::Jpeg | TargetFormat::Webp => {
                Some(crate::util::constants::ENCODE_QUALITY)
            }
            TargetFormat::Png | TargetFormat::Gif | TargetFormat::Bmp => None,
        }
    }

    /// File name of the saved artifact, e.g. `converted-image.jpg`.
    pub fn download_name(&self) -> String {
        format!(
            "{}{}",
            crate::util::constants::DOWNLOAD_STEM,
            self.extension()
        )
    }

    /// Parse a user-facing identifier: a MIME type (`image/webp`) or a short
    /// name (`webp`, `jpg`). Case-insensitive.
    pub fn parse(value: &str) -> Option<TargetFormat> {
        let lower = value.trim().to_ascii_lowercase();
        let short = lower.strip_prefix("image/").unwrap_or(&lower);
        match short {
            "jpeg" | "jpg" => Some(TargetFormat::Jpeg),
            "png" => Some(TargetFormat::Png),
            "webp" => Some(TargetFormat::Webp),
            "gif" => Some(TargetFormat::Gif),
            "bmp" => Some(TargetFormat::Bmp),
            _ => None,
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The re-encoded output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: TargetFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Outcome of one conversion attempt. Immutable once created.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub success: bool,
    pub message: String,
    /// Present only on success.
    pub image: Option<EncodedImage>,
    pub original_size: u64,
    pub converted_size: u64,
}

impl ConversionResult {
    pub fn succeeded(image: EncodedImage, original_size: u64) -> Self {
        Self {
            success: true,
            message: format!("Successfully converted to {}", image.format.label()),
            converted_size: image.bytes.len() as u64,
            image: Some(image),
            original_size,
        }
    }

    pub fn failed(message: impl Into<String>, original_size: u64) -> Self {
        Self {
            success: false,
            message: message.into(),
            image: None,
            original_size,
            converted_size: 0,
        }
    }

    /// Size difference between input and output, if the conversion succeeded.
    pub fn size_change(&self) -> Option<SizeChange> {
        if !self.success {
            return None;
        }
        Some(SizeChange {
            smaller: self.converted_size < self.original_size,
            delta: self.converted_size.abs_diff(self.original_size),
        })
    }
}

/// Direction and magnitude of the size change produced by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChange {
    pub smaller: bool,
    /// Absolute difference in bytes.
    pub delta: u64,
}

// =============================================================================
// Background progress messages
// =============================================================================

/// Messages sent from a file-ingest worker to the UI thread.
#[derive(Debug)]
pub enum IngestProgress {
    Loaded { file: Box<LoadedFile> },
    Failed { path: PathBuf, error: String },
}

/// Messages sent from a conversion worker to the UI thread.
#[derive(Debug)]
pub enum ConvertProgress {
    Started { name: String, format: TargetFormat },
    Decoded { width: u32, height: u32 },
    Finished {
        result: ConversionResult,
        /// The encoded output decoded back to RGBA for on-screen display.
        preview: Option<image::RgbaImage>,
    },
}

// =============================================================================
// Display helpers
// =============================================================================

/// Human-readable byte size: `512 B`, `1.50 KB`, `2.00 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
    }

    #[test]
    fn test_download_names_use_conventional_extensions() {
        let names: Vec<String> = TargetFormat::all()
            .iter()
            .map(|f| f.download_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "converted-image.jpg",
                "converted-image.png",
                "converted-image.webp",
                "converted-image.gif",
                "converted-image.bmp",
            ]
        );
    }

    #[test]
    fn test_lossy_formats_take_quality() {
        assert_eq!(TargetFormat::Jpeg.quality(), Some(90));
        assert_eq!(TargetFormat::Webp.quality(), Some(90));
        for format in [TargetFormat::Png, TargetFormat::Gif, TargetFormat::Bmp] {
            assert_eq!(format.quality(), None, "{format}");
        }
    }

    #[test]
    fn test_target_format_parse_accepts_mime_and_short_names() {
        assert_eq!(TargetFormat::parse("image/webp"), Some(TargetFormat::Webp));
        assert_eq!(TargetFormat::parse("JPG"), Some(TargetFormat::Jpeg));
        assert_eq!(TargetFormat::parse(" bmp "), Some(TargetFormat::Bmp));
        assert_eq!(TargetFormat::parse("image/tiff"), None);
    }

    #[test]
    fn test_media_type_for_extensions() {
        assert_eq!(media_type_for(Path::new("app.LOG")), "text/plain");
        assert_eq!(media_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
        assert!(is_image_media_type(media_type_for(Path::new("a.webp"))));
    }

    #[test]
    fn test_failed_result_has_no_image_or_size_change() {
        let result = ConversionResult::failed("Failed to load image", 42);
        assert!(!result.success);
        assert!(result.image.is_none());
        assert_eq!(result.size_change(), None);
    }

    #[test]
    fn test_size_change_reports_direction() {
        let image = EncodedImage {
            format: TargetFormat::Webp,
            width: 1,
            height: 1,
            bytes: vec![0; 40],
        };
        let result = ConversionResult::succeeded(image, 100);
        assert_eq!(result.converted_size, 40);
        assert_eq!(result.message, "Successfully converted to WEBP");
        assert_eq!(
            result.size_change(),
            Some(SizeChange {
                smaller: true,
                delta: 60
            })
        );
    }
}
