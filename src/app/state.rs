// Useful Tools - app/state.rs
//
// Application state management. Holds the tool directory query and results,
// the viewer's loaded file and tail settings, and the converter's selection
// and last result. Owned by the eframe::App implementation.
//
// The three tool states are independent; none reads another's fields.

use crate::app::ingest::should_auto_tail;
use crate::core::catalog::ToolCatalog;
use crate::core::model::{
    is_image_media_type, media_type_for, ConversionResult, LoadedFile, SelectedImage, TargetFormat,
};
use crate::core::search::{SearchOptions, ToolSearchIndex};
use crate::core::tail::TailState;
use crate::platform::config::AppConfig;
use crate::util::constants::MAX_WARNINGS;
use std::path::PathBuf;
use std::sync::Arc;

/// Which tool occupies the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    #[default]
    Directory,
    TextViewer,
    ImageConverter,
}

impl ActiveTool {
    pub fn all() -> &'static [ActiveTool] {
        &[
            ActiveTool::Directory,
            ActiveTool::TextViewer,
            ActiveTool::ImageConverter,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTool::Directory => "Tool Directory",
            ActiveTool::TextViewer => "Text File Viewer",
            ActiveTool::ImageConverter => "Image Converter",
        }
    }

    /// Map the view name of an `app://` link to a tool.
    pub fn from_app_view(view: &str) -> Option<ActiveTool> {
        match view {
            "directory" => Some(ActiveTool::Directory),
            "text-viewer" => Some(ActiveTool::TextViewer),
            "image-converter" => Some(ActiveTool::ImageConverter),
            _ => None,
        }
    }

    /// Parse the `--tool` command-line value.
    pub fn from_cli(value: &str) -> Option<ActiveTool> {
        match value.to_ascii_lowercase().as_str() {
            "directory" | "tools" => Some(ActiveTool::Directory),
            "viewer" | "text-viewer" => Some(ActiveTool::TextViewer),
            "converter" | "image-converter" => Some(ActiveTool::ImageConverter),
            _ => None,
        }
    }
}

// =============================================================================
// Tool directory
// =============================================================================

/// Search query and the catalog indices currently shown.
#[derive(Debug)]
pub struct DirectoryState {
    catalog: Arc<ToolCatalog>,
    pub query: String,
    /// Indices into the catalog, best match first.
    pub results: Vec<usize>,
}

impl DirectoryState {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        let results = (0..catalog.len()).collect();
        Self {
            catalog,
            query: String::new(),
            results,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Replace the query and recompute the result list.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    /// Re-run the search for the current query.
    pub fn refresh(&mut self) {
        let index = ToolSearchIndex::new(self.catalog.records(), SearchOptions::default());
        self.results = index.search(&self.query).iter().map(|hit| hit.index).collect();
        tracing::debug!(
            query = %self.query,
            results = self.results.len(),
            "Directory search updated"
        );
    }
}

// =============================================================================
// Text file viewer
// =============================================================================

#[derive(Debug)]
pub struct ViewerState {
    /// The most recently loaded file; replaced wholesale on each load.
    pub file: Option<LoadedFile>,
    pub tail: TailState,
    /// Contents of the line-count text field.
    pub line_count_input: String,
    pub loading: bool,
    /// Message from the last failed load, cleared on success.
    pub error: Option<String>,
    /// Size in bytes at which a loaded file counts as large.
    pub large_file_threshold: u64,
}

impl ViewerState {
    pub fn new(default_tail_lines: usize, large_file_threshold: u64) -> Self {
        let tail = TailState::new(default_tail_lines);
        Self {
            file: None,
            line_count_input: tail.line_count().to_string(),
            tail,
            loading: false,
            error: None,
            large_file_threshold,
        }
    }

    /// Install a freshly loaded file, replacing the previous one.
    ///
    /// `.log`/`.txt` files switch tailing on, and so do large files so that
    /// only the last N lines are laid out. Returns true for a large file.
    pub fn apply_loaded(&mut self, file: LoadedFile) -> bool {
        let large = !file.is_folder && file.size >= self.large_file_threshold;
        if large || (!file.is_folder && should_auto_tail(&file.name)) {
            self.tail.enable();
        }
        self.error = None;
        self.file = Some(file);
        large
    }

    /// Commit the text field. Invalid input restores the field to the
    /// current count.
    pub fn commit_line_count_input(&mut self) -> bool {
        let accepted = self.tail.apply_line_count_input(&self.line_count_input);
        self.line_count_input = self.tail.line_count().to_string();
        accepted
    }

    /// Text to render for the current file, honouring tail mode.
    pub fn display_text(&self) -> Option<&str> {
        let text = self.file.as_ref()?.text()?;
        Some(self.tail.display(text))
    }
}

// =============================================================================
// Image converter
// =============================================================================

#[derive(Debug)]
pub struct ConverterState {
    pub selected: Option<SelectedImage>,
    pub target: TargetFormat,
    pub result: Option<ConversionResult>,
    pub converting: bool,
    /// Surface dimensions reported by the running conversion.
    pub decoded: Option<(u32, u32)>,
    /// Where the last result was saved, for "Show in folder".
    pub saved_to: Option<PathBuf>,
}

impl ConverterState {
    pub fn new(target: TargetFormat) -> Self {
        Self {
            selected: None,
            target,
            result: None,
            converting: false,
            decoded: None,
            saved_to: None,
        }
    }

    /// Replace the selection and clear everything derived from the old one.
    pub fn select(&mut self, image: SelectedImage) {
        self.selected = Some(image);
        self.clear_result();
    }

    /// "Convert another": drop the selection and everything derived from it.
    /// The target format is kept.
    pub fn reset(&mut self) {
        self.selected = None;
        self.converting = false;
        self.clear_result();
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.decoded = None;
        self.saved_to = None;
    }

    pub fn can_convert(&self) -> bool {
        self.selected.is_some() && !self.converting
    }
}

// =============================================================================
// AppState
// =============================================================================

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub active_tool: ActiveTool,
    pub directory: DirectoryState,
    pub viewer: ViewerState,
    pub converter: ConverterState,

    /// Base URL for site-relative tool links.
    pub base_url: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings from startup (config, catalog).
    pub warnings: Vec<String>,

    pub show_about: bool,
    pub show_warnings: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    pub dark_mode: bool,
    pub font_size: f32,

    // -- Requests raised by panels and consumed by the app each frame --
    /// Path to load into the viewer.
    pub pending_open: Option<PathBuf>,
    /// Re-read the viewer's current file.
    pub request_reload: bool,
    /// Image path to select in the converter.
    pub pending_image: Option<PathBuf>,
    /// Start converting the current selection.
    pub request_convert: bool,
    /// Show the save dialog for the current result.
    pub request_save: bool,
    /// Clear the converter for a new image.
    pub request_convert_another: bool,
    /// Show the picker for the active tool.
    pub request_pick_file: bool,
    pub request_pick_folder: bool,
    pub request_pick_image: bool,
    /// URL to open in the browser.
    pub pending_url: Option<String>,
    /// Saved file to reveal in the system file manager.
    pub pending_reveal: Option<PathBuf>,
}

impl AppState {
    pub fn new(catalog: Arc<ToolCatalog>, config: &AppConfig, debug_mode: bool) -> Self {
        Self {
            active_tool: ActiveTool::Directory,
            directory: DirectoryState::new(catalog),
            viewer: ViewerState::new(config.default_tail_lines, config.large_file_threshold),
            converter: ConverterState::new(config.default_format),
            base_url: config.base_url.clone(),
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            show_warnings: false,
            debug_mode,
            dark_mode: config.dark_mode,
            font_size: config.font_size,
            pending_open: None,
            request_reload: false,
            pending_image: None,
            request_convert: false,
            request_save: false,
            request_convert_another: false,
            request_pick_file: false,
            request_pick_folder: false,
            request_pick_image: false,
            pending_url: None,
            pending_reveal: None,
        }
    }

    /// Record a non-fatal warning, keeping at most `MAX_WARNINGS`.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        if self.warnings.len() < MAX_WARNINGS {
            self.warnings.push(warning.into());
        }
    }

    /// Open `path` in the tool that handles its type: images in the
    /// converter, everything else in the viewer.
    pub fn open_path(&mut self, path: PathBuf) {
        let is_image = !path.is_dir() && is_image_media_type(media_type_for(&path));
        if is_image {
            self.active_tool = ActiveTool::ImageConverter;
            self.pending_image = Some(path);
        } else {
            self.active_tool = ActiveTool::TextViewer;
            self.pending_open = Some(path);
        }
    }

    /// Route a dropped path to the active tool. From the directory the path
    /// is opened by type.
    pub fn route_path(&mut self, path: PathBuf) {
        match self.active_tool {
            ActiveTool::ImageConverter => self.pending_image = Some(path),
            ActiveTool::TextViewer => self.pending_open = Some(path),
            ActiveTool::Directory => self.open_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{FileContent, ToolRecord};
    use crate::util::constants::DEFAULT_LARGE_FILE_THRESHOLD;

    fn record(id: &str, title: &str, tags: &[&str]) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            screenshot: String::new(),
            url: format!("/tools/{id}"),
        }
    }

    fn loaded(name: &str, size: u64, is_folder: bool) -> LoadedFile {
        LoadedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            media_type: "text/plain",
            size,
            content: FileContent::Text("a\nb\nc".to_string()),
            is_folder,
            loaded_at: chrono::Local::now(),
        }
    }

    fn new_state() -> AppState {
        let catalog = ToolCatalog::from_records(vec![
            record("json", "JSON Formatter", &["json"]),
            record("b64", "Base64 Encoder", &["encoding"]),
        ]);
        AppState::new(Arc::new(catalog), &AppConfig::default(), false)
    }

    #[test]
    fn test_directory_query_filters_and_resets() {
        let mut state = new_state();
        assert_eq!(state.directory.results, vec![0, 1]);

        state.directory.set_query("base64");
        assert_eq!(state.directory.results, vec![1]);

        state.directory.set_query("zzzzqqqq");
        assert!(state.directory.results.is_empty());

        state.directory.set_query("");
        assert_eq!(state.directory.results, vec![0, 1]);
    }

    #[test]
    fn test_invalid_line_count_input_restores_field() {
        let mut viewer = ViewerState::new(20, DEFAULT_LARGE_FILE_THRESHOLD);
        viewer.line_count_input = "abc".to_string();
        assert!(!viewer.commit_line_count_input());
        assert_eq!(viewer.line_count_input, "20");
        assert_eq!(viewer.tail.line_count(), 20);

        viewer.line_count_input = " 5 ".to_string();
        assert!(viewer.commit_line_count_input());
        assert_eq!(viewer.tail.line_count(), 5);
        assert_eq!(viewer.line_count_input, "5");
    }

    #[test]
    fn test_loading_log_file_enables_tail() {
        let mut viewer = ViewerState::new(20, DEFAULT_LARGE_FILE_THRESHOLD);
        viewer.error = Some("Failed to read file".to_string());

        assert!(!viewer.apply_loaded(loaded("service.log", 5, false)));
        assert!(viewer.tail.is_enabled());
        assert!(viewer.error.is_none());
        assert_eq!(viewer.file.as_ref().map(|f| f.name.as_str()), Some("service.log"));
    }

    #[test]
    fn test_loading_other_files_leaves_tail_alone() {
        let mut viewer = ViewerState::new(20, DEFAULT_LARGE_FILE_THRESHOLD);
        viewer.apply_loaded(loaded("notes.md", 5, false));
        assert!(!viewer.tail.is_enabled());

        // A folder named like a log is still only the placeholder.
        viewer.apply_loaded(loaded("archive.log", 5, true));
        assert!(!viewer.tail.is_enabled());

        viewer.tail.enable();
        viewer.apply_loaded(loaded("data.csv", 5, false));
        assert!(viewer.tail.is_enabled(), "an explicit choice survives a load");
    }

    #[test]
    fn test_large_file_is_flagged_and_tailed() {
        let mut viewer = ViewerState::new(2, 100);
        assert!(viewer.apply_loaded(loaded("dump.csv", 100, false)));
        assert!(viewer.tail.is_enabled());
        assert_eq!(viewer.display_text(), Some("b\nc"));

        let mut viewer = ViewerState::new(3, 100);
        assert!(!viewer.apply_loaded(loaded("dump.csv", 99, false)));
        assert!(!viewer.tail.is_enabled());
    }

    #[test]
    fn test_route_path_from_directory() {
        let mut state = new_state();
        state.route_path(PathBuf::from("photo.PNG"));
        assert_eq!(state.active_tool, ActiveTool::ImageConverter);
        assert_eq!(state.pending_image, Some(PathBuf::from("photo.PNG")));

        let mut state = new_state();
        state.route_path(PathBuf::from("server.log"));
        assert_eq!(state.active_tool, ActiveTool::TextViewer);
        assert_eq!(state.pending_open, Some(PathBuf::from("server.log")));
    }

    #[test]
    fn test_route_path_respects_active_tool() {
        let mut state = new_state();
        state.active_tool = ActiveTool::TextViewer;
        state.route_path(PathBuf::from("photo.png"));
        assert_eq!(state.pending_open, Some(PathBuf::from("photo.png")));
        assert!(state.pending_image.is_none());
    }

    #[test]
    fn test_open_path_ignores_active_tool() {
        let mut state = new_state();
        state.active_tool = ActiveTool::ImageConverter;
        state.open_path(PathBuf::from("notes.txt"));
        assert_eq!(state.active_tool, ActiveTool::TextViewer);
        assert_eq!(state.pending_open, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_app_view_names() {
        assert_eq!(
            ActiveTool::from_app_view("text-viewer"),
            Some(ActiveTool::TextViewer)
        );
        assert_eq!(
            ActiveTool::from_app_view("image-converter"),
            Some(ActiveTool::ImageConverter)
        );
        assert_eq!(ActiveTool::from_app_view("nope"), None);
        assert_eq!(ActiveTool::from_cli("Viewer"), Some(ActiveTool::TextViewer));
    }

    #[test]
    fn test_selecting_image_clears_result() {
        let mut converter = ConverterState::new(TargetFormat::Png);
        converter.result = Some(ConversionResult::failed("x", 1));
        converter.decoded = Some((1, 1));
        converter.select(SelectedImage {
            path: PathBuf::from("a.png"),
            name: "a.png".to_string(),
            media_type: "image/png",
            size: 3,
        });
        assert!(converter.result.is_none());
        assert!(converter.decoded.is_none());
        assert!(converter.can_convert());
    }

    #[test]
    fn test_convert_another_clears_selection_keeps_target() {
        let mut converter = ConverterState::new(TargetFormat::Webp);
        converter.select(SelectedImage {
            path: PathBuf::from("a.png"),
            name: "a.png".to_string(),
            media_type: "image/png",
            size: 3,
        });
        converter.result = Some(ConversionResult::failed("x", 3));
        converter.saved_to = Some(PathBuf::from("converted-image.webp"));

        converter.reset();
        assert!(converter.selected.is_none());
        assert!(converter.result.is_none());
        assert!(converter.saved_to.is_none());
        assert!(!converter.can_convert());
        assert_eq!(converter.target, TargetFormat::Webp);
    }
}
