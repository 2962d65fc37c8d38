//! # Pill Mock I/O
//!
//! Text formats read at startup: the technology layer map and the JSON
//! configuration of the mock environment.

pub mod config;
pub mod layermap;

pub use config::MockConfig;
pub use layermap::DEFAULT_LAYERMAP;
