//! CLI-specific utilities for butterfly-stitch
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod format;
pub mod progress;

pub use format::{parse_waypoints, render_path, OutputFormat};
pub use progress::ProgressManager;
