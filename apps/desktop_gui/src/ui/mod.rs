//! UI layer: the single upload-form window.

pub mod app;

pub use app::{AnagramsApp, StartupConfig};
