pub mod api;
pub mod config;
pub mod error;
pub mod score_art;
pub mod score_range;
pub mod tables;
// cmd and reports belong to the binary crate (main.rs).
