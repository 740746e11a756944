// Useful Tools - app/mod.rs
//
// Application layer: orchestration, state management, background workers.
// Dependencies: core layer, platform layer.
// Must NOT depend on: ui.

pub mod convert;
pub mod ingest;
pub mod state;
