// Useful Tools - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Tool catalog loading (CLI > config > built-in)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can use `crate::app::...`, `crate::core::...` etc.
pub use usefultools::app;

pub use usefultools::core;
pub use usefultools::platform;
pub use usefultools::ui;
pub use usefultools::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Useful Tools - a small desktop toolbox.
///
/// Browse the tool directory, tail text and log files, and convert images
/// between JPEG, PNG, WEBP, GIF and BMP.
#[derive(Parser, Debug)]
#[command(name = "usefultools", version, about)]
struct Cli {
    /// File or folder to open. Images open in the converter, anything else
    /// in the text viewer.
    path: Option<PathBuf>,

    /// Tool to show at startup: directory, viewer, or converter.
    #[arg(short = 't', long = "tool")]
    tool: Option<String>,

    /// Tool catalog file replacing the built-in list.
    #[arg(short = 'c', long = "catalog")]
    catalog: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config must be read before logging so its level and file apply.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %platform_paths.config_dir.display(),
        "Useful Tools starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let mut warnings = config_warnings;

    // Catalog: CLI override > config file > built-in
    let catalog_path = cli.catalog.clone().or_else(|| config.catalog_file.clone());
    let catalog = match catalog_path {
        Some(ref path) => match crate::core::catalog::ToolCatalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to built-in catalog");
                warnings.push(format!("{e}. Using the built-in catalog."));
                crate::core::catalog::ToolCatalog::builtin()
            }
        },
        None => crate::core::catalog::ToolCatalog::builtin(),
    };

    tracing::info!(tools = catalog.len(), "Ready to launch GUI");

    let mut state = app::state::AppState::new(Arc::new(catalog), &config, cli.debug);
    for warning in warnings {
        state.add_warning(warning);
    }
    if !state.warnings.is_empty() {
        state.status_message = format!(
            "Ready. {} startup warning(s); see View > Startup Warnings.",
            state.warnings.len()
        );
    }

    if let Some(ref tool) = cli.tool {
        match app::state::ActiveTool::from_cli(tool) {
            Some(t) => state.active_tool = t,
            None => tracing::warn!(tool = %tool, "Unknown --tool value; showing the directory"),
        }
    }

    // A CLI path opens by type; a folder behaves like Open Folder.
    if let Some(path) = cli.path {
        if path.is_dir() {
            state.open_path(app::ingest::folder_target(&path));
        } else {
            state.open_path(path);
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::ToolboxApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Useful Tools GUI: {e}");
        std::process::exit(1);
    }
}
