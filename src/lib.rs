// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod api;
pub mod app;
pub mod averages;
pub mod config;
pub mod protocol;
pub mod selection;
pub mod stats;
pub mod tui;
