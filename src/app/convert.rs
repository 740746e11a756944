// Useful Tools - app/convert.rs
//
// Conversion lifecycle for the image converter view.
//
// `ConvertManager` lives on the UI thread; `run_conversion` runs on a
// background thread and reports `ConvertProgress` messages over an mpsc
// channel. As with ingest, each request is tagged with a generation number
// and `poll_progress` discards anything from a superseded request.
//
// Failures never escape as errors: every path ends in a `Finished` message
// carrying a `ConversionResult` with `success = false` and a short
// user-facing message.

use crate::app::ingest;
use crate::core::model::{
    ConversionResult, ConvertProgress, EncodedImage, SelectedImage, TargetFormat,
};
use crate::core::recode;
use crate::util::constants::MAX_PREVIEW_EDGE;
use crate::util::error::RecodeError;
use std::path::Path;
use std::sync::mpsc;

/// Convert the image at `path` synchronously.
///
/// `original_size` is the byte length of the source file (0 if it could not
/// be read).
pub fn convert_file(path: &Path, format: TargetFormat) -> ConversionResult {
    let mut original_size = 0;
    let outcome = ingest::load_path(path)
        .map_err(RecodeError::from)
        .and_then(|file| {
            let bytes = file.bytes().unwrap_or_default();
            original_size = file.size;
            recode::recode(bytes, format)
        });
    finish(outcome, original_size, path)
}

fn finish(
    outcome: Result<EncodedImage, RecodeError>,
    original_size: u64,
    path: &Path,
) -> ConversionResult {
    match outcome {
        Ok(image) => {
            tracing::info!(
                file = %path.display(),
                format = image.format.label(),
                original_size,
                converted_size = image.bytes.len(),
                "Conversion succeeded"
            );
            ConversionResult::succeeded(image, original_size)
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Conversion failed");
            ConversionResult::failed(e.user_message(), original_size)
        }
    }
}

// =============================================================================
// ConvertManager
// =============================================================================

/// Runs conversions on a background thread.
pub struct ConvertManager {
    progress_rx: Option<mpsc::Receiver<(u64, ConvertProgress)>>,
    generation: u64,
    in_flight: bool,
}

impl ConvertManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            generation: 0,
            in_flight: false,
        }
    }

    /// Start converting `image` to `format`, superseding any running request.
    pub fn start_convert(&mut self, image: SelectedImage, format: TargetFormat) {
        self.generation += 1;
        let generation = self.generation;

        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);
        self.in_flight = true;

        std::thread::spawn(move || {
            run_conversion(image, format, generation, tx);
        });

        tracing::info!(format = format.label(), generation, "Conversion started");
    }

    /// Forget the running request; its results will be dropped.
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.progress_rx = None;
        self.in_flight = false;
    }

    pub fn is_converting(&self) -> bool {
        self.in_flight
    }

    /// Drain pending messages for the current generation.
    pub fn poll_progress(&mut self) -> Vec<ConvertProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok((generation, msg)) = rx.try_recv() {
                if generation == self.generation {
                    messages.push(msg);
                }
            }
        }
        if messages
            .iter()
            .any(|m| matches!(m, ConvertProgress::Finished { .. }))
        {
            self.in_flight = false;
        }
        messages
    }
}

impl Default for ConvertManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Background pipeline: read → decode → encode → preview.
fn run_conversion(
    image: SelectedImage,
    format: TargetFormat,
    generation: u64,
    tx: mpsc::Sender<(u64, ConvertProgress)>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send((generation, $msg)).is_err() {
                return; // Superseded or UI closed.
            }
        };
    }

    send!(ConvertProgress::Started {
        name: image.name.clone(),
        format,
    });

    let file = match ingest::load_path(&image.path) {
        Ok(f) => f,
        Err(e) => {
            let e = RecodeError::from(e);
            send!(ConvertProgress::Finished {
                result: finish(Err(e), image.size, &image.path),
                preview: None,
            });
            return;
        }
    };
    let bytes = file.bytes().unwrap_or_default();

    let surface = match recode::decode_surface(bytes) {
        Ok(s) => s,
        Err(e) => {
            send!(ConvertProgress::Finished {
                result: finish(Err(e), file.size, &image.path),
                preview: None,
            });
            return;
        }
    };
    send!(ConvertProgress::Decoded {
        width: surface.width(),
        height: surface.height(),
    });

    let outcome = recode::encode_surface(&surface, format).map(|bytes| EncodedImage {
        format,
        width: surface.width(),
        height: surface.height(),
        bytes,
    });
    drop(surface);

    let result = finish(outcome, file.size, &image.path);
    let preview = result
        .image
        .as_ref()
        .and_then(|img| recode::decode_preview(&img.bytes, MAX_PREVIEW_EDGE));

    send!(ConvertProgress::Finished { result, preview });
}
