// Useful Tools - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, data crates (serde, image, strsim).
// Must NOT depend on: ui, platform, app.

pub mod catalog;
pub mod model;
pub mod recode;
pub mod search;
pub mod tail;
