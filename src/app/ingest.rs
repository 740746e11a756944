// Useful Tools - app/ingest.rs
//
// File ingest: reads a picked or dropped path into a `LoadedFile`.
//
// Architecture:
//   - `load_path` is the synchronous read, used directly by the converter
//     worker and by tests.
//   - `IngestManager` lives on the UI thread and runs `load_path` on a
//     short-lived background thread, reporting over an mpsc channel.
//   - Every request carries a generation number. Starting a new request
//     bumps it, and `poll_progress` drops messages from older generations so
//     a slow read can never overwrite a newer selection.
//
// A failed read reports `IngestProgress::Failed`; the caller keeps whatever
// content it already had.

use crate::core::model::{
    is_image_media_type, media_type_for, FileContent, IngestProgress, LoadedFile, SelectedImage,
};
use crate::platform::fs;
use crate::util::constants::{AUTO_TAIL_EXTENSIONS, FOLDER_PLACEHOLDER};
use crate::util::error::IngestError;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Read `path` fully into memory.
///
/// - Directories produce the folder placeholder text (`is_folder = true`).
/// - `image/*` media types are read as opaque bytes.
/// - Everything else is decoded as lossy UTF-8 text.
pub fn load_path(path: &Path) -> Result<LoadedFile, IngestError> {
    let name = display_name(path);

    if path.is_dir() {
        tracing::debug!(dir = %path.display(), "Folder opened; showing placeholder");
        let text = FOLDER_PLACEHOLDER.replace("{name}", &name);
        return Ok(LoadedFile {
            name,
            path: path.to_path_buf(),
            media_type: "inode/directory",
            size: text.len() as u64,
            content: FileContent::Text(text),
            is_folder: true,
            loaded_at: Local::now(),
        });
    }

    let media_type = media_type_for(path);
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let (content, size) = if is_image_media_type(media_type) {
        let bytes = fs::read_bytes(path).map_err(io_err)?;
        let size = bytes.len() as u64;
        (FileContent::Binary(bytes), size)
    } else {
        let size = fs::file_size(path).map_err(io_err)?;
        let text = fs::read_file_lossy(path).map_err(io_err)?;
        (FileContent::Text(text), size)
    };

    tracing::info!(
        file = %path.display(),
        media_type,
        size,
        "File loaded"
    );

    Ok(LoadedFile {
        name,
        path: path.to_path_buf(),
        media_type,
        size,
        content,
        is_folder: false,
        loaded_at: Local::now(),
    })
}

/// First `.txt`/`.log` file directly inside `dir`, in name order.
pub fn first_text_file(dir: &Path) -> Option<PathBuf> {
    fs::first_matching_file(dir, AUTO_TAIL_EXTENSIONS)
}

/// Resolve the "Open Folder" action: the first text file in `dir`, or `dir`
/// itself (which loads as the folder placeholder).
pub fn folder_target(dir: &Path) -> PathBuf {
    match first_text_file(dir) {
        Some(file) => {
            tracing::debug!(dir = %dir.display(), file = %file.display(), "Opening first text file in folder");
            file
        }
        None => dir.to_path_buf(),
    }
}

/// Metadata for a file picked or dropped onto the converter.
///
/// Only image media types are accepted; anything else leaves the current
/// selection untouched.
pub fn describe_image(path: &Path) -> Result<SelectedImage, IngestError> {
    let media_type = media_type_for(path);
    if !is_image_media_type(media_type) || path.is_dir() {
        return Err(IngestError::NotAnImage {
            path: path.to_path_buf(),
            media_type: media_type.to_string(),
        });
    }
    let size = fs::file_size(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SelectedImage {
        path: path.to_path_buf(),
        name: display_name(path),
        media_type,
        size,
    })
}

/// Whether a file with this name should switch the viewer into tail mode.
pub fn should_auto_tail(name: &str) -> bool {
    AUTO_TAIL_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// IngestManager
// =============================================================================

/// Runs file reads on a background thread and hands results to the UI.
pub struct IngestManager {
    progress_rx: Option<mpsc::Receiver<(u64, IngestProgress)>>,
    generation: u64,
    in_flight: bool,
}

impl IngestManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            generation: 0,
            in_flight: false,
        }
    }

    /// Start reading `path`. Any earlier request is superseded.
    pub fn start_load(&mut self, path: PathBuf) {
        self.generation += 1;
        let generation = self.generation;

        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);
        self.in_flight = true;

        tracing::debug!(file = %path.display(), generation, "Ingest started");

        std::thread::spawn(move || {
            let msg = match load_path(&path) {
                Ok(file) => IngestProgress::Loaded {
                    file: Box::new(file),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Ingest failed");
                    IngestProgress::Failed {
                        path,
                        error: e.to_string(),
                    }
                }
            };
            // Receiver dropped (superseded or UI closed); nothing to do.
            let _ = tx.send((generation, msg));
        });
    }

    /// Returns `true` while the current request has not reported back.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Drain pending messages for the current generation.
    pub fn poll_progress(&mut self) -> Vec<IngestProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok((generation, msg)) = rx.try_recv() {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "Dropping stale ingest result");
                    continue;
                }
                messages.push(msg);
            }
        }
        if !messages.is_empty() {
            self.in_flight = false;
        }
        messages
    }
}

impl Default for IngestManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(manager: &mut IngestManager) -> Vec<IngestProgress> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let messages = manager.poll_progress();
            if !messages.is_empty() || Instant::now() > deadline {
                return messages;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_text_file_loads_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "line 1\nline 2").unwrap();

        let file = load_path(&path).unwrap();
        assert_eq!(file.name, "app.log");
        assert_eq!(file.media_type, "text/plain");
        assert_eq!(file.size, 13);
        assert_eq!(file.text(), Some("line 1\nline 2"));
        assert!(!file.is_folder);
    }

    #[test]
    fn test_image_file_loads_as_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = load_path(&path).unwrap();
        assert!(file.is_image());
        assert_eq!(file.bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(file.text(), None);
    }

    #[test]
    fn test_directory_loads_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_path(dir.path()).unwrap();
        assert!(file.is_folder);
        let text = file.text().unwrap();
        assert!(text.starts_with("Folder: "));
        assert!(text.ends_with("(Use a file browser to open files)"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_folder_target_prefers_text_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(folder_target(dir.path()), dir.path());
        std::fs::write(dir.path().join("server.log"), "x").unwrap();
        assert_eq!(folder_target(dir.path()), dir.path().join("server.log"));
    }

    #[test]
    fn test_describe_image_accepts_images_only() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("photo.png");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&png, [0u8; 10]).unwrap();
        std::fs::write(&txt, "hi").unwrap();

        let selected = describe_image(&png).unwrap();
        assert_eq!(selected.name, "photo.png");
        assert_eq!(selected.size, 10);
        assert_eq!(selected.format_label(), "PNG");

        let err = describe_image(&txt).unwrap_err();
        assert!(matches!(err, IngestError::NotAnImage { .. }));
    }

    #[test]
    fn test_should_auto_tail() {
        assert!(should_auto_tail("server.log"));
        assert!(should_auto_tail("notes.txt"));
        assert!(!should_auto_tail("README.md"));
        assert!(!should_auto_tail("log"));
    }

    #[test]
    fn test_manager_reports_latest_generation_only() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "first").unwrap();
        std::fs::write(&second, "second").unwrap();

        let mut manager = IngestManager::new();
        manager.start_load(first);
        manager.start_load(second);
        assert!(manager.is_loading());

        let messages = wait_for(&mut manager);
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            IngestProgress::Loaded { file } => assert_eq!(file.text(), Some("second")),
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(!manager.is_loading());
    }

    #[test]
    fn test_manager_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = IngestManager::new();
        manager.start_load(dir.path().join("nope.log"));
        let messages = wait_for(&mut manager);
        assert!(matches!(messages.as_slice(), [IngestProgress::Failed { .. }]));
    }
}
