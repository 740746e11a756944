// Useful Tools - ui/panels/mod.rs

pub mod about;
pub mod converter;
pub mod directory;
pub mod viewer;
pub mod warnings;
