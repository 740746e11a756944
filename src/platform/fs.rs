// Useful Tools - platform/fs.rs
//
// Filesystem helpers used by the ingest and converter workers.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read the full content of a file as raw bytes.
pub fn read_bytes(path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Size of a file in bytes.
pub fn file_size(path: &Path) -> io::Result<u64> {
    std::fs::metadata(path).map(|m| m.len())
}

/// First file directly inside `dir` whose name ends with one of `suffixes`,
/// in file-name order. Subdirectories are not searched.
///
/// Unreadable entries are skipped with a debug log.
pub fn first_matching_file(dir: &Path, suffixes: &[&str]) -> Option<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .find(|e| {
            let name = e.file_name().to_string_lossy();
            suffixes.iter().any(|s| name.ends_with(s))
        })
        .map(|e| e.into_path())
}

/// Write a conversion artifact to `dest`.
pub fn write_artifact(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::write(dest, bytes)?;
    tracing::info!(
        path = %dest.display(),
        bytes = bytes.len(),
        "Saved converted image"
    );
    Ok(())
}

/// Open the system file manager and highlight `path` within it.
///
/// Platform behaviour:
/// - **Windows**: `explorer.exe /select,"<path>"`
/// - **macOS**: `open -R "<path>"`
/// - **Linux**: `xdg-open "<parent>"` (most Linux file managers have no
///   standard per-file selection argument)
///
/// The subprocess is spawned detached; launch failures are logged at WARN
/// level and never propagated.
pub fn reveal_in_file_manager(path: &Path) {
    #[cfg(target_os = "windows")]
    {
        // `/select,<path>` must be a single argument with no space after the comma.
        let arg = format!("/select,{}", path.display());
        if let Err(e) = std::process::Command::new("explorer").arg(arg).spawn() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Explorer");
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to reveal file in Finder");
        }
    }
    #[cfg(target_os = "linux")]
    {
        let parent = path.parent().unwrap_or(path);
        if let Err(e) = std::process::Command::new("xdg-open").arg(parent).spawn() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to open parent directory in file manager"
            );
        }
    }
}
