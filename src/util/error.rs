// Useful Tools - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error keeps its causal source for diagnostic logging; the
// user-facing wording for conversion failures lives in `user_message`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Useful Tools operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ToolboxError {
    /// Reading a picked or dropped file failed.
    Ingest(IngestError),

    /// Image decode or re-encode failed.
    Recode(RecodeError),

    /// Tool catalog loading or validation failed.
    Catalog(CatalogError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ToolboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "File error: {e}"),
            Self::Recode(e) => write!(f, "Conversion error: {e}"),
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ToolboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Recode(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Errors related to reading a user-selected file into memory.
#[derive(Debug)]
pub enum IngestError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The converter was handed a file whose media type is not an image.
    NotAnImage { path: PathBuf, media_type: String },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read '{}': {source}", path.display())
            }
            Self::NotAnImage { path, media_type } => write!(
                f,
                "'{}' is not an image (media type {media_type})",
                path.display()
            ),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotAnImage { .. } => None,
        }
    }
}

impl From<IngestError> for ToolboxError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Recode errors
// ---------------------------------------------------------------------------

/// Errors raised by the decode → surface → encode pipeline.
#[derive(Debug)]
pub enum RecodeError {
    /// The source file could not be read.
    Read(IngestError),

    /// The source bytes are not a decodable image.
    Decode { source: image::ImageError },

    /// No pixel surface could be allocated for the decoded image.
    Surface { width: u32, height: u32 },

    /// The target encoder rejected the surface.
    Encode {
        format: &'static str,
        source: image::ImageError,
    },
}

impl RecodeError {
    /// Short message suitable for the conversion result panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Read(_) => "Failed to read file".to_string(),
            Self::Decode { .. } => "Failed to load image".to_string(),
            Self::Surface { width, height } => format!(
                "Conversion failed: could not allocate a {width}x{height} pixel surface"
            ),
            Self::Encode { format, source } => {
                format!("Conversion failed: {format} encoder error: {source}")
            }
        }
    }
}

impl fmt::Display for RecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "{e}"),
            Self::Decode { source } => write!(f, "Image decode failed: {source}"),
            Self::Surface { width, height } => write!(
                f,
                "Pixel surface {width}x{height} is empty or exceeds the allowed size"
            ),
            Self::Encode { format, source } => {
                write!(f, "Encoding to {format} failed: {source}")
            }
        }
    }
}

impl std::error::Error for RecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Decode { source } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Surface { .. } => None,
        }
    }
}

impl From<IngestError> for RecodeError {
    fn from(e: IngestError) -> Self {
        Self::Read(e)
    }
}

impl From<RecodeError> for ToolboxError {
    fn from(e: RecodeError) -> Self {
        Self::Recode(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to tool catalog loading and validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is empty.
    MissingField { index: usize, field: &'static str },

    /// Two records share the same identifier.
    DuplicateId { id: String },

    /// A record declares `tags = []`; tag lists must be absent or non-empty.
    EmptyTags { id: String },

    /// The catalog holds no tools at all.
    Empty { path: PathBuf },

    /// Maximum number of tools exceeded.
    TooManyTools { count: usize, max: usize },

    /// I/O error reading the catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalog '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { index, field } => {
                write!(f, "Tool #{index}: missing required field '{field}'")
            }
            Self::DuplicateId { id } => write!(f, "Duplicate tool id '{id}'"),
            Self::EmptyTags { id } => {
                write!(f, "Tool '{id}': tag list is present but empty")
            }
            Self::Empty { path } => {
                write!(f, "Catalog '{}' does not define any tools", path.display())
            }
            Self::TooManyTools { count, max } => {
                write!(f, "Too many tools in catalog ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading catalog '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for ToolboxError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ToolboxError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Useful Tools results.
pub type Result<T> = std::result::Result<T, ToolboxError>;
