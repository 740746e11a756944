// Useful Tools - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories, walkdir.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
