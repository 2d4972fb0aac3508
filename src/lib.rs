pub mod api;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod shared;
