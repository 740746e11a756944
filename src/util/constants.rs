// Useful Tools - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Useful Tools";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "UsefulTools";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tagline shown under the directory heading.
pub const APP_TAGLINE: &str = "A collection of handy tools for developers";

// =============================================================================
// Text file viewer
// =============================================================================

/// Number of lines shown when tailing before the user picks a value.
pub const DEFAULT_TAIL_LINES: usize = 20;

/// Largest accepted tail line count. Larger inputs are clamped to this.
pub const MAX_TAIL_LINES: usize = 10_000;

/// File name suffixes that switch the viewer into tailing automatically.
pub const AUTO_TAIL_EXTENSIONS: &[&str] = &[".log", ".txt"];

/// Extensions offered by the "Open File" dialog in the viewer.
pub const TEXT_PICKER_EXTENSIONS: &[&str] = &["txt", "log", "md"];

/// Extensions offered by the "Open Image" dialog in the converter.
pub const IMAGE_PICKER_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Files at or above this size are flagged as large and open tailed, so only
/// the last N lines are laid out.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MB

/// Placeholder text shown when a folder is opened instead of a file.
/// `{name}` is replaced with the folder name.
pub const FOLDER_PLACEHOLDER: &str = "Folder: {name}\n\n(Use a file browser to open files)";

// =============================================================================
// Image converter
// =============================================================================

/// Quality factor (0-100) used by encoders that accept one (JPEG, WEBP).
pub const ENCODE_QUALITY: u8 = 90;

/// Largest pixel surface the converter will allocate (width * height).
/// 16384 x 16384 is the common GPU canvas ceiling.
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// File stem of the saved conversion artifact.
pub const DOWNLOAD_STEM: &str = "converted-image";

/// Largest texture edge used for the converted-image preview.
pub const MAX_PREVIEW_EDGE: u32 = 2_048;

// =============================================================================
// Tool search
// =============================================================================

/// Maximum accepted match score (0.0 = exact, 1.0 = anything).
pub const SEARCH_THRESHOLD: f64 = 0.3;

/// How far from the expected location (start of field) a match may drift
/// before the location penalty alone exceeds 1.0.
pub const SEARCH_DISTANCE: usize = 100;

// =============================================================================
// Tool catalog
// =============================================================================

/// Maximum size of a user catalog TOML file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Maximum number of tools in a single catalog.
pub const MAX_CATALOG_TOOLS: usize = 1_000;

/// URL scheme used by catalog entries that open a built-in view.
pub const APP_URL_SCHEME: &str = "app://";

/// Side length of the square thumbnail shown on each tool card (points).
pub const THUMBNAIL_SIZE: f32 = 96.0;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of non-fatal warnings kept for the status area.
pub const MAX_WARNINGS: usize = 200;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
