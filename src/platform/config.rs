// Useful Tools - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::TargetFormat;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Useful Tools configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/usefultools/ or %APPDATA%\UsefulTools\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub viewer: ViewerSection,
    pub converter: ConverterSection,
    pub catalog: CatalogSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

/// `[viewer]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewerSection {
    /// Initial tail line count.
    pub default_tail_lines: Option<i64>,
    /// Size in bytes at which a file is treated as large.
    pub large_file_threshold_bytes: Option<i64>,
}

/// `[converter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConverterSection {
    /// Initially selected target format: "png", "jpg", "image/webp", ...
    pub default_format: Option<String>,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// User catalog file replacing the built-in tool list.
    pub file: Option<String>,
    /// Base URL for site-relative tool links.
    pub base_url: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Viewer --
    pub default_tail_lines: usize,
    pub large_file_threshold: u64,

    // -- Converter --
    pub default_format: TargetFormat,

    // -- Catalog --
    pub catalog_file: Option<PathBuf>,
    pub base_url: Option<String>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_tail_lines: constants::DEFAULT_TAIL_LINES,
            large_file_threshold: constants::DEFAULT_LARGE_FILE_THRESHOLD,
            default_format: TargetFormat::default(),
            catalog_file: None,
            base_url: None,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning so the
/// application still starts and the user is told why settings were ignored.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let (config, parse_warnings) = parse_config(&content, &config_path);
    warnings.extend(parse_warnings);
    (config, warnings)
}

/// Parse and validate config.toml content. `config_path` is used for
/// messages and to resolve a relative `[catalog] file`.
pub fn parse_config(content: &str, config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Viewer: default_tail_lines --
    if let Some(lines) = raw.viewer.default_tail_lines {
        if (1..=constants::MAX_TAIL_LINES as i64).contains(&lines) {
            config.default_tail_lines = lines as usize;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "viewer.default_tail_lines".to_string(),
                value: lines.to_string(),
                expected: format!("1-{}", constants::MAX_TAIL_LINES),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_TAIL_LINES
            ));
        }
    }

    // -- Viewer: large_file_threshold_bytes --
    if let Some(bytes) = raw.viewer.large_file_threshold_bytes {
        if bytes > 0 {
            config.large_file_threshold = bytes as u64;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "viewer.large_file_threshold_bytes".to_string(),
                value: bytes.to_string(),
                expected: "a positive byte count".to_string(),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_LARGE_FILE_THRESHOLD
            ));
        }
    }

    // -- Converter: default_format --
    if let Some(ref format) = raw.converter.default_format {
        match TargetFormat::parse(format) {
            Some(f) => config.default_format = f,
            None => warnings.push(format!(
                "[converter] default_format = \"{format}\" is not recognised. \
                 Expected one of jpeg, png, webp, gif, bmp. Using default (png).",
            )),
        }
    }

    // -- Catalog: file --
    if let Some(ref file) = raw.catalog.file {
        if !file.is_empty() {
            let path = PathBuf::from(file);
            let resolved = if path.is_relative() {
                config_path.parent().unwrap_or(Path::new(".")).join(path)
            } else {
                path
            };
            config.catalog_file = Some(resolved);
        }
    }

    // -- Catalog: base_url --
    if let Some(ref url) = raw.catalog.base_url {
        if url.starts_with("http://") || url.starts_with("https://") {
            config.base_url = Some(url.trim_end_matches('/').to_string());
        } else if !url.is_empty() {
            warnings.push(format!(
                "[catalog] base_url = \"{url}\" must start with http:// or https://. Ignoring it.",
            ));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_FONT_SIZE,
                    constants::MAX_FONT_SIZE
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("/etc/usefultools/config.toml"))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.default_tail_lines, constants::DEFAULT_TAIL_LINES);
        assert_eq!(config.default_format, TargetFormat::Png);
    }

    #[test]
    fn test_valid_values_are_applied() {
        let (config, warnings) = parse(
            r#"
            [viewer]
            default_tail_lines = 50
            large_file_threshold_bytes = 1048576

            [converter]
            default_format = "image/webp"

            [catalog]
            file = "tools.toml"
            base_url = "https://tools.example.com/"

            [ui]
            theme = "light"

            [logging]
            level = "DEBUG"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_tail_lines, 50);
        assert_eq!(config.large_file_threshold, 1_048_576);
        assert_eq!(config.default_format, TargetFormat::Webp);
        assert_eq!(
            config.catalog_file,
            Some(PathBuf::from("/etc/usefultools/tools.toml"))
        );
        assert_eq!(config.base_url.as_deref(), Some("https://tools.example.com"));
        assert!(!config.dark_mode);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            r#"
            [viewer]
            default_tail_lines = 0
            large_file_threshold_bytes = -1

            [converter]
            default_format = "tiff"

            [catalog]
            base_url = "ftp://nope"

            [ui]
            font_size = 99.0
            "#,
        );
        assert_eq!(warnings.len(), 5, "{warnings:?}");
        assert_eq!(config.default_tail_lines, constants::DEFAULT_TAIL_LINES);
        assert_eq!(
            config.large_file_threshold,
            constants::DEFAULT_LARGE_FILE_THRESHOLD
        );
        assert_eq!(config.default_format, TargetFormat::Png);
        assert!(config.base_url.is_none());
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_unparseable_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[viewer\n").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert_eq!(config.default_tail_lines, constants::DEFAULT_TAIL_LINES);
    }
}
